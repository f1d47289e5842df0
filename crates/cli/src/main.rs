mod channel_commands;
mod config_commands;
mod parse_commands;
mod relay;

use std::path::PathBuf;

use {
    clap::{Parser, Subcommand},
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use formrelay_config::RelayConfig;

#[derive(Parser)]
#[command(
    name = "formrelay",
    version,
    about = "Relay structured Discord messages to a web form"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,

    /// Config file to load instead of searching the standard locations.
    #[arg(long, global = true, env = "FORMRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Custom data directory (overrides the default data dir).
    #[arg(long, global = true, env = "FORMRELAY_DATA_DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Discord bot (default when no subcommand is provided).
    Run,
    /// Parse a submission message from FILE (or stdin) and print the result.
    Parse {
        /// File containing the message text; reads stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Configuration management.
    Config {
        #[command(subcommand)]
        action: config_commands::ConfigAction,
    },
    /// Inspect or change the monitored channel without starting the bot.
    Channel {
        #[command(subcommand)]
        action: channel_commands::ChannelAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

/// Load the config named on the command line, or discover one, then apply
/// environment overrides.
fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<RelayConfig> {
    let mut config = match path {
        Some(path) => formrelay_config::load_config(path)?,
        None => formrelay_config::discover_and_load(),
    };
    formrelay_config::apply_env_overrides(&mut config);
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_telemetry(&cli);

    match cli.command {
        None | Some(Commands::Run) => {
            info!(version = env!("CARGO_PKG_VERSION"), "formrelay starting");
            let config = load_config(cli.config.as_deref())?;
            relay::run(config, cli.data_dir.as_deref()).await
        },
        Some(Commands::Parse { file }) => parse_commands::handle_parse(file.as_deref()),
        Some(Commands::Config { action }) => {
            config_commands::handle_config(action, cli.config.as_deref())
        },
        Some(Commands::Channel { action }) => {
            let config = load_config(cli.config.as_deref())?;
            channel_commands::handle_channel(action, &config, cli.data_dir.as_deref()).await
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_is_the_default_command() {
        let cli = Cli::parse_from(["formrelay"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "formrelay",
            "channel",
            "set",
            "42",
            "--data-dir",
            "/tmp/relay",
            "--json-logs",
        ]);
        assert!(cli.json_logs);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/relay")));
        assert!(matches!(cli.command, Some(Commands::Channel { .. })));
    }
}
