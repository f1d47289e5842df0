//! User-facing reply texts.

use formrelay_parser::{ParseError, USAGE_TEMPLATE};

pub const SUBMITTED: &str = "Request submitted successfully.";
pub const SUBMIT_FAILED: &str = "❌ Failed to submit the request. Try again later.";
pub const NOT_ADMIN: &str = "❌ Only administrators can change the monitored channel.";
pub const SAVE_FAILED: &str = "❌ Failed to save the monitored channel. Try again later.";

#[must_use]
pub fn invalid_channel(channel_id: &str) -> String {
    format!("❌ '{channel_id}' is not a channel ID. Mention the channel or use its numeric ID.")
}

/// Reply for a message that could not be parsed.
#[must_use]
pub fn invalid_format(error: &ParseError) -> String {
    format!("❌ {error}\nUse:\n```\n{USAGE_TEMPLATE}\n```")
}

#[must_use]
pub fn channel_set(channel_id: &str) -> String {
    format!("✅ Now monitoring channel {channel_id}.")
}

#[must_use]
pub fn current_channel(channel_id: Option<&str>, prefix: &str) -> String {
    match channel_id {
        Some(id) => format!("Currently monitoring channel {id}."),
        None => format!(
            "No channel is being monitored. An administrator can run {prefix}setchannel."
        ),
    }
}

#[must_use]
pub fn help(prefix: &str) -> String {
    format!(
        "Post a request in the monitored channel using this format:\n```\n{USAGE_TEMPLATE}\n```\n\
         Commands:\n\
         `{prefix}setchannel [id]` monitor this channel (or the given one), administrators only\n\
         `{prefix}channel` show the monitored channel\n\
         `{prefix}help` show this message"
    )
}

#[cfg(test)]
mod tests {
    use formrelay_parser::FieldName;

    use super::*;

    #[test]
    fn invalid_format_layout() {
        let reply = invalid_format(&ParseError::MissingFields(vec![
            FieldName::Amount,
            FieldName::Note,
        ]));
        assert_eq!(
            reply,
            "❌ Missing required fields: amount, note\nUse:\n```\nReason: ...\nAmount: ...\nDeadline: ...\nNote: ...\n```"
        );
    }

    #[test]
    fn current_channel_texts() {
        assert_eq!(
            current_channel(Some("42"), "!"),
            "Currently monitoring channel 42."
        );
        assert_eq!(
            current_channel(None, "!"),
            "No channel is being monitored. An administrator can run !setchannel."
        );
    }

    #[test]
    fn help_uses_prefix() {
        let text = help("?");
        assert!(text.contains("`?setchannel [id]`"));
        assert!(text.contains(USAGE_TEMPLATE));
    }
}
