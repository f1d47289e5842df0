//! Configuration loading, env substitution, overrides, and validation.
//!
//! Config files: `formrelay.toml`, `formrelay.yaml`, `formrelay.yml`, or
//! `formrelay.json`, searched in `./` then `~/.config/formrelay/`.
//!
//! Supports `${ENV_VAR}` (and `${ENV_VAR:-fallback}`) substitution in the raw
//! file text, plus `DISCORD_TOKEN` / `FORM_URL` / `CHANNEL_ID` overrides.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod template;
pub mod validate;

pub use {
    loader::{
        apply_env_overrides, config_dir, data_dir, discover_and_load, find_config_file,
        load_config, save_template,
    },
    schema::{DiscordConfig, FormConfig, FormFieldsConfig, RelayConfig, StorageConfig},
    validate::{Diagnostic, Severity, ValidationResult},
};
