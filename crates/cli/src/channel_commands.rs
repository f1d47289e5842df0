//! CLI subcommands for the monitored channel.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use {anyhow::Result, clap::Subcommand};

use {
    formrelay_channels::{FileTargetChannelStore, TargetChannel},
    formrelay_config::RelayConfig,
};

const CHANNEL_FILE: &str = "channel.json";

#[derive(Subcommand)]
pub enum ChannelAction {
    /// Show the channel the bot will monitor on its next start.
    Show,
    /// Persist a new channel to monitor.
    Set {
        /// Discord channel ID.
        id: String,
    },
}

pub async fn handle_channel(
    action: ChannelAction,
    config: &RelayConfig,
    data_dir: Option<&Path>,
) -> Result<()> {
    let store = Arc::new(FileTargetChannelStore::new(channel_file(config, data_dir)));
    let path = store.path().to_path_buf();
    let target = TargetChannel::load(store, config.discord.channel_id.clone()).await?;

    match action {
        ChannelAction::Show => match target.current() {
            Some(id) => println!("{id}"),
            None => eprintln!("No channel is being monitored."),
        },
        ChannelAction::Set { id } => {
            target.set(&id).await?;
            eprintln!("Now monitoring channel {} (saved to {})", id.trim(), path.display());
        },
    }
    Ok(())
}

/// Where the monitored channel is persisted.
///
/// An explicit `[storage] channel_file` wins, then `--data-dir`, then the
/// platform data directory.
pub fn channel_file(config: &RelayConfig, data_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = &config.storage.channel_file {
        return path.clone();
    }
    data_dir
        .map(Path::to_path_buf)
        .or_else(formrelay_config::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CHANNEL_FILE)
}
