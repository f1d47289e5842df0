//! Discord event handler for serenity.

use std::sync::Arc;

use {
    serenity::{
        all::{Context, EventHandler, GatewayIntents, GuildId, Message, Ready},
        async_trait,
    },
    tracing::{debug, info, warn},
};

use formrelay_channels::{Disposition, InboundMessage, RelayListener};

/// Handler for Discord gateway events.
pub struct DiscordHandler {
    listener: Arc<RelayListener>,
}

impl DiscordHandler {
    pub fn new(listener: Arc<RelayListener>) -> Self {
        Self { listener }
    }

    /// Required gateway intents for the bot.
    pub fn intents() -> GatewayIntents {
        GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT
    }
}

/// Convert a serenity message into the listener's view of it.
fn inbound_message(msg: &Message, author_is_admin: bool) -> InboundMessage {
    InboundMessage {
        channel_id: msg.channel_id.to_string(),
        author_id: msg.author.id.to_string(),
        author_name: Some(msg.author.name.clone()),
        author_is_bot: msg.author.bot,
        author_is_admin,
        text: msg.content.clone(),
    }
}

#[async_trait]
impl EventHandler for DiscordHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        info!(
            bot_name = %ready.user.name,
            guilds = ready.guilds.len(),
            "discord bot ready"
        );
        match self.listener.target().current() {
            Some(channel_id) => info!(channel_id = %channel_id, "listening for submissions"),
            None => warn!("no channel is monitored yet; an administrator must run setchannel"),
        }
    }

    async fn message(&self, ctx: Context, msg: Message) {
        // Skip bot messages to prevent loops
        if msg.author.bot {
            return;
        }

        // DMs resolve to DM permissions, which never include ADMINISTRATOR.
        let author_is_admin = msg
            .author_permissions(&ctx.cache)
            .is_some_and(|p| p.administrator());

        let inbound = inbound_message(&msg, author_is_admin);
        let reply = match self.listener.handle(&inbound).await {
            Disposition::Reply(text) => text,
            Disposition::Ignored(reason) => {
                debug!(
                    channel_id = %inbound.channel_id,
                    author_id = %inbound.author_id,
                    ?reason,
                    "message ignored"
                );
                return;
            },
        };

        if let Err(e) = msg.channel_id.say(&ctx.http, &reply).await {
            warn!(channel_id = %inbound.channel_id, error = %e, "failed to send reply");
        }
    }

    async fn cache_ready(&self, _ctx: Context, guilds: Vec<GuildId>) {
        debug!(guild_count = guilds.len(), "discord cache ready");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents_include_message_content() {
        let intents = DiscordHandler::intents();
        assert!(intents.contains(GatewayIntents::MESSAGE_CONTENT));
        assert!(intents.contains(GatewayIntents::GUILD_MESSAGES));
        assert!(intents.contains(GatewayIntents::DIRECT_MESSAGES));
        assert!(intents.contains(GatewayIntents::GUILDS));
        assert!(!intents.contains(GatewayIntents::GUILD_PRESENCES));
    }
}
