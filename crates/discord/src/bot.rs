use std::sync::Arc;

use {
    secrecy::ExposeSecret,
    serenity::Client,
    tokio_util::sync::CancellationToken,
    tracing::info,
};

use {formrelay_channels::RelayListener, formrelay_config::DiscordConfig};

use crate::handler::DiscordHandler;

/// Connect to the Discord gateway and relay messages until `cancel` fires.
///
/// Fails before connecting when no token is configured.
pub async fn start_bot(
    config: &DiscordConfig,
    listener: Arc<RelayListener>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    if !config.has_token() {
        anyhow::bail!("discord token is not configured (set DISCORD_TOKEN or [discord] token)");
    }

    let mut client = Client::builder(
        config.token.expose_secret().trim(),
        DiscordHandler::intents(),
    )
    .event_handler(DiscordHandler::new(listener))
    .await?;

    let shard_manager = Arc::clone(&client.shard_manager);
    info!("connecting to discord");

    tokio::select! {
        result = client.start() => result?,
        () = cancel.cancelled() => {
            info!("shutting down discord bot");
            shard_manager.shutdown_all().await;
        },
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use {
        async_trait::async_trait,
        formrelay_channels::{ListenerConfig, TargetChannel, TargetChannelStore},
        formrelay_form::{FormSubmitter, HttpFormSubmitter},
    };

    use super::*;

    struct NoStore;

    #[async_trait]
    impl TargetChannelStore for NoStore {
        async fn load(&self) -> formrelay_channels::Result<Option<String>> {
            Ok(None)
        }

        async fn save(&self, _channel_id: &str) -> formrelay_channels::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn missing_token_fails_before_connecting() {
        let target = TargetChannel::load(Arc::new(NoStore), None).await.unwrap();
        let submitter: Arc<dyn FormSubmitter> =
            Arc::new(HttpFormSubmitter::new(None, Default::default()));
        let listener = Arc::new(RelayListener::new(
            ListenerConfig::default(),
            Arc::new(target),
            submitter,
        ));

        let err = start_bot(&DiscordConfig::default(), listener, CancellationToken::new())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("token"));
    }
}
