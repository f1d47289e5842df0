use std::path::{Path, PathBuf};

use {
    secrecy::Secret,
    tracing::{debug, warn},
};

use crate::{env_subst::substitute_env, schema::RelayConfig, template::default_config_template};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "formrelay.toml",
    "formrelay.yaml",
    "formrelay.yml",
    "formrelay.json",
];

const APP_NAME: &str = "formrelay";

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<RelayConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `./formrelay.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/formrelay/formrelay.{toml,yaml,yml,json}` (user-global)
///
/// Returns `RelayConfig::default()` if no config file is found or the file
/// cannot be loaded.
pub fn discover_and_load() -> RelayConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    RelayConfig::default()
}

/// Find the first config file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(PathBuf::from)
        .chain(
            config_dir()
                .into_iter()
                .flat_map(|dir| CONFIG_FILENAMES.iter().map(move |name| dir.join(name))),
        )
        .find(|p| p.exists())
}

/// Returns the user-global config directory (`~/.config/formrelay/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.config_dir().to_path_buf())
}

/// Returns the user data directory (`~/.local/share/formrelay/` on Linux).
pub fn data_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.data_dir().to_path_buf())
}

/// Apply `DISCORD_TOKEN`, `FORM_URL`, and `CHANNEL_ID` from the process
/// environment on top of file values. Empty variables are ignored.
pub fn apply_env_overrides(config: &mut RelayConfig) {
    apply_env_overrides_with(config, |name| std::env::var(name).ok());
}

pub(crate) fn apply_env_overrides_with(config: &mut RelayConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| {
        lookup(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    if let Some(token) = get("DISCORD_TOKEN") {
        debug!("discord token taken from DISCORD_TOKEN");
        config.discord.token = Secret::new(token);
    }
    if let Some(url) = get("FORM_URL") {
        debug!("form url taken from FORM_URL");
        config.form.url = Some(url);
    }
    if let Some(channel_id) = get("CHANNEL_ID") {
        debug!(channel_id, "channel taken from CHANNEL_ID");
        config.discord.channel_id = Some(channel_id);
    }
}

/// Write the documented default config to `path` (or the user-global default
/// location). Refuses to overwrite an existing file unless `force` is set.
///
/// Creates parent directories if needed. Returns the path written to.
pub fn save_template(path: Option<&Path>, force: bool) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("formrelay.toml"),
    };
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, default_config_template())?;
    debug!(path = %path.display(), "saved config template");
    Ok(path)
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<RelayConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn loads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formrelay.toml");
        std::fs::write(
            &path,
            "[discord]\nchannel_id = \"7\"\n\n[form]\nurl = \"https://example.com/f\"\n",
        )
        .unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.discord.channel_id.as_deref(), Some("7"));
        assert_eq!(cfg.form.url.as_deref(), Some("https://example.com/f"));
    }

    #[test]
    fn loads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("formrelay.yaml");
        std::fs::write(&yaml, "discord:\n  command_prefix: \"?\"\n").unwrap();
        assert_eq!(load_config(&yaml).unwrap().discord.command_prefix, "?");

        let json = dir.path().join("formrelay.json");
        std::fs::write(&json, r#"{"form": {"fields": {"amount": "entry.9"}}}"#).unwrap();
        assert_eq!(load_config(&json).unwrap().form.fields.amount, "entry.9");
    }

    #[test]
    fn rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formrelay.ini");
        std::fs::write(&path, "").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn env_overrides_replace_file_values() {
        let mut cfg = RelayConfig::default();
        cfg.form.url = Some("https://file.example.com".into());
        apply_env_overrides_with(&mut cfg, |name| match name {
            "DISCORD_TOKEN" => Some("env-token".into()),
            "FORM_URL" => Some(" https://env.example.com ".into()),
            "CHANNEL_ID" => Some("99".into()),
            _ => None,
        });
        assert_eq!(cfg.discord.token.expose_secret(), "env-token");
        assert_eq!(cfg.form.url.as_deref(), Some("https://env.example.com"));
        assert_eq!(cfg.discord.channel_id.as_deref(), Some("99"));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut cfg = RelayConfig::default();
        cfg.discord.channel_id = Some("1".into());
        apply_env_overrides_with(&mut cfg, |_| Some("   ".into()));
        assert_eq!(cfg.discord.channel_id.as_deref(), Some("1"));
        assert!(!cfg.discord.has_token());
    }

    #[test]
    fn template_roundtrips_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("formrelay.toml");
        let written = save_template(Some(&path), false).unwrap();
        assert_eq!(written, path);
        assert!(load_config(&path).is_ok());
        assert!(save_template(Some(&path), false).is_err());
        assert!(save_template(Some(&path), true).is_ok());
    }
}
