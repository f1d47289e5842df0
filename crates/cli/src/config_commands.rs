use std::path::Path;

use {anyhow::Result, clap::Subcommand, secrecy::Secret};

use formrelay_config::{RelayConfig, Severity, validate};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Validate the configuration file and report errors/warnings.
    Check {
        /// Show informational diagnostics in addition to errors and warnings.
        #[arg(long)]
        verbose: bool,
    },
    /// Print the effective configuration (token redacted).
    Show,
    /// Write a documented default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn handle_config(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Check { verbose } => check(config_path, verbose),
        ConfigAction::Show => {
            let config = crate::load_config(config_path)?;
            print!("{}", render_redacted(&config)?);
            Ok(())
        },
        ConfigAction::Init { force } => {
            let path = formrelay_config::save_template(config_path, force)?;
            eprintln!("Wrote {}", path.display());
            Ok(())
        },
    }
}

/// ANSI color codes.
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

const REDACTED: &str = "[REDACTED]";

fn check(config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let result = validate::validate(config_path);

    // Print which file we're checking
    if let Some(ref path) = result.config_path {
        eprintln!("Checking {}\n", path.display());
    } else {
        eprintln!("No config file found; checking defaults.\n");
    }

    let mut shown = 0;
    for d in &result.diagnostics {
        if d.severity == Severity::Info && !verbose {
            continue;
        }

        let color = match d.severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Info => CYAN,
        };
        let label = d.severity;

        if d.path.is_empty() {
            eprintln!("  {BOLD}{color}{label}{RESET} {}", d.message);
        } else {
            eprintln!("  {BOLD}{color}{label}{RESET} {}: {}", d.path, d.message);
        }
        shown += 1;
    }

    let errors = result.count(Severity::Error);
    let warnings = result.count(Severity::Warning);

    if shown > 0 {
        eprintln!();
    }

    if errors == 0 && warnings == 0 {
        eprintln!("No issues found.");
    } else {
        eprintln!("{errors} error(s), {warnings} warning(s)");
    }

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

fn render_redacted(config: &RelayConfig) -> Result<String> {
    let mut config = config.clone();
    if config.discord.has_token() {
        config.discord.token = Secret::new(REDACTED.to_string());
    }
    Ok(toml::to_string_pretty(&config)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn show_redacts_token() {
        let mut config = RelayConfig::default();
        config.discord.token = Secret::new("super-secret-token".into());
        config.form.url = Some("https://example.com/form".into());

        let rendered = render_redacted(&config).unwrap();
        assert!(!rendered.contains("super-secret-token"));
        assert!(rendered.contains(REDACTED));
        assert!(rendered.contains("https://example.com/form"));
        assert!(rendered.contains("entry.987654321"));

        let parsed: RelayConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.discord.command_prefix, "!");
    }

    #[test]
    fn show_leaves_empty_token_empty() {
        let rendered = render_redacted(&RelayConfig::default()).unwrap();
        assert!(!rendered.contains(REDACTED));
    }

    #[test]
    fn init_writes_template_and_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("formrelay.toml");

        handle_config(ConfigAction::Init { force: false }, Some(&path)).unwrap();
        assert!(path.exists());
        assert!(handle_config(ConfigAction::Init { force: false }, Some(&path)).is_err());
        handle_config(ConfigAction::Init { force: true }, Some(&path)).unwrap();
    }
}
