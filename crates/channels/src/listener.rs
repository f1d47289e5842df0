use std::sync::Arc;

use {
    formrelay_config::DiscordConfig,
    formrelay_form::FormSubmitter,
    formrelay_parser::parse,
    tokio::sync::Mutex,
    tracing::{debug, info, warn},
};

use crate::{
    command::{Command, parse_command},
    error::Error,
    gating::{is_allowed, is_listed},
    replies,
    target::TargetChannel,
};

/// A chat message, already stripped of transport details.
#[derive(Debug, Clone, Default)]
pub struct InboundMessage {
    pub channel_id: String,
    pub author_id: String,
    pub author_name: Option<String>,
    pub author_is_bot: bool,
    /// The transport says the author administers the server.
    pub author_is_admin: bool,
    pub text: String,
}

/// What the listener decided to do with a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    Ignored(IgnoreReason),
    /// Post this text back into the originating channel.
    Reply(String),
}

impl Disposition {
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        match self {
            Self::Reply(text) => Some(text),
            Self::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    BotAuthor,
    NotTargetChannel,
    NotOnAllowlist,
}

/// Listener settings taken from the `[discord]` config section.
#[derive(Debug, Clone)]
pub struct ListenerConfig {
    pub command_prefix: String,
    pub user_allowlist: Vec<String>,
    pub admin_allowlist: Vec<String>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self::from(&DiscordConfig::default())
    }
}

impl From<&DiscordConfig> for ListenerConfig {
    fn from(config: &DiscordConfig) -> Self {
        Self {
            command_prefix: config.command_prefix.clone(),
            user_allowlist: config.user_allowlist.clone(),
            admin_allowlist: config.admin_allowlist.clone(),
        }
    }
}

/// Turns chat messages into form submissions.
pub struct RelayListener {
    config: ListenerConfig,
    target: Arc<TargetChannel>,
    submitter: Arc<dyn FormSubmitter>,
    /// One submission in flight at a time.
    submit_gate: Mutex<()>,
}

impl RelayListener {
    pub fn new(
        config: ListenerConfig,
        target: Arc<TargetChannel>,
        submitter: Arc<dyn FormSubmitter>,
    ) -> Self {
        Self {
            config,
            target,
            submitter,
            submit_gate: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn target(&self) -> &Arc<TargetChannel> {
        &self.target
    }

    pub async fn handle(&self, msg: &InboundMessage) -> Disposition {
        if msg.author_is_bot {
            return Disposition::Ignored(IgnoreReason::BotAuthor);
        }

        if let Some(command) = parse_command(&msg.text, &self.config.command_prefix) {
            return Disposition::Reply(self.run_command(command, msg).await);
        }

        if !self.target.is_target(&msg.channel_id) {
            return Disposition::Ignored(IgnoreReason::NotTargetChannel);
        }

        if !self.on_user_allowlist(msg) {
            debug!(
                author_id = %msg.author_id,
                channel_id = %msg.channel_id,
                "author not on allowlist"
            );
            return Disposition::Ignored(IgnoreReason::NotOnAllowlist);
        }

        let request = match parse(&msg.text) {
            Ok(request) => request,
            Err(e) => {
                debug!(author_id = %msg.author_id, error = %e, "rejected malformed submission");
                return Disposition::Reply(replies::invalid_format(&e));
            },
        };

        let _guard = self.submit_gate.lock().await;
        match self.submitter.submit(&request).await {
            Ok(()) => {
                info!(
                    author_id = %msg.author_id,
                    channel_id = %msg.channel_id,
                    "submission forwarded"
                );
                Disposition::Reply(replies::SUBMITTED.to_string())
            },
            Err(e) => {
                warn!(author_id = %msg.author_id, error = %e, "form submission failed");
                Disposition::Reply(replies::SUBMIT_FAILED.to_string())
            },
        }
    }

    async fn run_command(&self, command: Command, msg: &InboundMessage) -> String {
        let prefix = &self.config.command_prefix;

        if command.requires_admin() && !self.is_admin(msg) {
            info!(author_id = %msg.author_id, ?command, "refused admin command");
            return replies::NOT_ADMIN.to_string();
        }

        match command {
            Command::SetChannel(arg) => {
                let channel_id = arg.unwrap_or_else(|| msg.channel_id.clone());
                match self.target.set(&channel_id).await {
                    Ok(()) => replies::channel_set(channel_id.trim()),
                    Err(Error::InvalidInput { .. }) => replies::invalid_channel(channel_id.trim()),
                    Err(e) => {
                        warn!(channel_id = %channel_id, error = %e, "failed to change monitored channel");
                        replies::SAVE_FAILED.to_string()
                    },
                }
            },
            Command::ShowChannel => {
                replies::current_channel(self.target.current().as_deref(), prefix)
            },
            Command::Help => replies::help(prefix),
        }
    }

    /// Admin allowlist entries match the author ID only; display names are
    /// chosen by the author.
    fn is_admin(&self, msg: &InboundMessage) -> bool {
        msg.author_is_admin || is_listed(&msg.author_id, &self.config.admin_allowlist)
    }

    fn on_user_allowlist(&self, msg: &InboundMessage) -> bool {
        let list = &self.config.user_allowlist;
        is_allowed(&msg.author_id, list)
            || msg
                .author_name
                .as_deref()
                .is_some_and(|name| is_allowed(name, list))
    }
}
