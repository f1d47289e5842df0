//! Config schema types (discord, form, storage).

use std::path::PathBuf;

use {
    secrecy::{ExposeSecret, Secret},
    serde::{Deserialize, Serialize},
};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    pub discord: DiscordConfig,
    pub form: FormConfig,
    pub storage: StorageConfig,
}

/// Discord bot settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Bot token from the Discord developer portal.
    #[serde(serialize_with = "serialize_secret")]
    pub token: Secret<String>,

    /// Channel monitored for submissions until an administrator picks one.
    /// A channel saved with `!setchannel` takes precedence.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,

    /// Prefix for bot commands (`!setchannel`, `!channel`, `!help`).
    pub command_prefix: String,

    /// Authors allowed to submit (IDs or names, `*` wildcards). Empty = everyone.
    pub user_allowlist: Vec<String>,

    /// Authors treated as administrators in addition to members holding the
    /// Discord ADMINISTRATOR permission.
    pub admin_allowlist: Vec<String>,
}

impl DiscordConfig {
    #[must_use]
    pub fn has_token(&self) -> bool {
        !self.token.expose_secret().trim().is_empty()
    }
}

impl std::fmt::Debug for DiscordConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiscordConfig")
            .field("token", &"[REDACTED]")
            .field("channel_id", &self.channel_id)
            .field("command_prefix", &self.command_prefix)
            .field("user_allowlist", &self.user_allowlist)
            .field("admin_allowlist", &self.admin_allowlist)
            .finish()
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: Secret::new(String::new()),
            channel_id: None,
            command_prefix: "!".into(),
            user_allowlist: Vec::new(),
            admin_allowlist: Vec::new(),
        }
    }
}

fn serialize_secret<S: serde::Serializer>(
    secret: &Secret<String>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// External form endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Collector URL, e.g. `https://docs.google.com/forms/d/e/<id>/formResponse`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Form-field identifier for each submission field.
    pub fields: FormFieldsConfig,
}

/// Form-field identifiers keyed by submission field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FormFieldsConfig {
    pub reason: String,
    pub amount: String,
    pub deadline: String,
    pub note: String,
}

impl Default for FormFieldsConfig {
    fn default() -> Self {
        Self {
            reason: "entry.987654321".into(),
            amount: "entry.876543210".into(),
            deadline: "entry.765432109".into(),
            note: "entry.654321098".into(),
        }
    }
}

/// Local state files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// File holding the monitored channel. Defaults to `<data dir>/channel.json`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_file: Option<PathBuf>,
}
