/// Bot commands recognised before a message is treated as a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Change the monitored channel. `None` means "the channel this was sent in".
    SetChannel(Option<String>),
    /// Report the monitored channel.
    ShowChannel,
    Help,
}

impl Command {
    /// Whether only administrators may run this command.
    #[must_use]
    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::SetChannel(_))
    }
}

/// Parse `text` as a command using `prefix`.
///
/// Returns `None` for anything that is not a known command, so the caller can
/// fall through to regular handling. Command names are case-insensitive and a
/// Discord channel mention (`<#123>`) is accepted in place of a bare ID.
pub fn parse_command(text: &str, prefix: &str) -> Option<Command> {
    if prefix.is_empty() {
        return None;
    }
    let rest = text.trim().strip_prefix(prefix)?;
    let mut words = rest.split_whitespace();
    let name = words.next()?.to_lowercase();
    let arg = words.next().map(normalize_channel_arg);

    match name.as_str() {
        "setchannel" => Some(Command::SetChannel(arg)),
        "channel" => Some(Command::ShowChannel),
        "help" => Some(Command::Help),
        _ => None,
    }
}

fn normalize_channel_arg(arg: &str) -> String {
    arg.strip_prefix("<#")
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(arg)
        .to_string()
}
