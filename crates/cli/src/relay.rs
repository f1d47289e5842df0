//! `formrelay run`: wire config, storage, submitter, and listener together
//! and run the Discord bot until Ctrl-C.

use std::{path::Path, sync::Arc};

use {
    anyhow::Result,
    tokio_util::sync::CancellationToken,
    tracing::{error, info, warn},
};

use {
    formrelay_channels::{FileTargetChannelStore, ListenerConfig, RelayListener, TargetChannel},
    formrelay_config::{RelayConfig, Severity, validate::validate_config},
    formrelay_form::{FormSubmitter, HttpFormSubmitter},
};

use crate::channel_commands::channel_file;

pub async fn run(config: RelayConfig, data_dir: Option<&Path>) -> Result<()> {
    let diagnostics = validate_config(&config);
    for d in &diagnostics {
        match d.severity {
            Severity::Error => error!(path = %d.path, "{}", d.message),
            Severity::Warning => warn!(path = %d.path, "{}", d.message),
            Severity::Info => info!(path = %d.path, "{}", d.message),
        }
    }
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    if errors > 0 {
        anyhow::bail!("configuration has {errors} error(s); run `formrelay config check`");
    }

    let store = Arc::new(FileTargetChannelStore::new(channel_file(&config, data_dir)));
    info!(path = %store.path().display(), "channel state file");
    let target = TargetChannel::load(store, config.discord.channel_id.clone()).await?;

    let submitter: Arc<dyn FormSubmitter> = Arc::new(HttpFormSubmitter::from_config(&config.form)?);
    let listener = Arc::new(RelayListener::new(
        ListenerConfig::from(&config.discord),
        Arc::new(target),
        submitter,
    ));

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl-C, stopping"),
            Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
        }
        shutdown.cancel();
    });

    formrelay_discord::start_bot(&config.discord, listener, cancel).await
}
