use std::sync::{Arc, RwLock};

use tracing::info;

use crate::{
    error::{Error, Result},
    store::TargetChannelStore,
};

/// The channel the relay currently monitors.
///
/// Loaded once at startup and changed only through [`TargetChannel::set`],
/// which persists the new value before it takes effect. The lock is never
/// held across `.await`.
pub struct TargetChannel {
    current: RwLock<Option<String>>,
    store: Arc<dyn TargetChannelStore>,
}

impl TargetChannel {
    /// Resolve the starting channel: a previously saved channel wins over the
    /// configured one.
    pub async fn load(store: Arc<dyn TargetChannelStore>, configured: Option<String>) -> Result<Self> {
        let configured = configured
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());

        let current = match store.load().await? {
            Some(saved) => {
                info!(channel_id = %saved, "monitoring saved channel");
                Some(saved)
            },
            None => {
                match &configured {
                    Some(id) => info!(channel_id = %id, "monitoring configured channel"),
                    None => info!("no channel configured; waiting for an administrator"),
                }
                configured
            },
        };

        Ok(Self {
            current: RwLock::new(current),
            store,
        })
    }

    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    #[must_use]
    pub fn is_target(&self, channel_id: &str) -> bool {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_deref()
            .is_some_and(|current| current == channel_id)
    }

    /// Persist and switch to `channel_id`. On error the previous channel
    /// stays in effect.
    pub async fn set(&self, channel_id: &str) -> Result<()> {
        let channel_id = channel_id.trim();
        // Discord channel IDs are numeric snowflakes.
        if channel_id.is_empty() || !channel_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(Error::invalid_input(format!(
                "not a channel ID: '{channel_id}'"
            )));
        }

        self.store.save(channel_id).await?;

        let previous = self
            .current
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .replace(channel_id.to_string());
        info!(channel_id, previous = ?previous, "monitored channel changed");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    /// In-memory store that can be told to fail on save.
    #[derive(Default)]
    pub(crate) struct MemoryStore {
        pub saved: Mutex<Option<String>>,
        pub fail_save: bool,
    }

    #[async_trait]
    impl TargetChannelStore for MemoryStore {
        async fn load(&self) -> Result<Option<String>> {
            Ok(self.saved.lock().unwrap().clone())
        }

        async fn save(&self, channel_id: &str) -> Result<()> {
            if self.fail_save {
                return Err(Error::Message {
                    message: "disk full".into(),
                });
            }
            *self.saved.lock().unwrap() = Some(channel_id.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn saved_channel_wins_over_configured() {
        let store = Arc::new(MemoryStore::default());
        *store.saved.lock().unwrap() = Some("saved".into());
        let target = TargetChannel::load(store, Some("configured".into()))
            .await
            .unwrap();
        assert_eq!(target.current().as_deref(), Some("saved"));
        assert!(target.is_target("saved"));
        assert!(!target.is_target("configured"));
    }

    #[tokio::test]
    async fn configured_channel_used_when_nothing_saved() {
        let store = Arc::new(MemoryStore::default());
        let target = TargetChannel::load(store, Some(" 42 ".into()))
            .await
            .unwrap();
        assert_eq!(target.current().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn blank_configured_channel_means_none() {
        let store = Arc::new(MemoryStore::default());
        let target = TargetChannel::load(store, Some("   ".into()))
            .await
            .unwrap();
        assert_eq!(target.current(), None);
        assert!(!target.is_target(""));
    }

    #[tokio::test]
    async fn set_persists_and_switches() {
        let store = Arc::new(MemoryStore::default());
        let target = TargetChannel::load(store.clone(), None).await.unwrap();
        target.set("777").await.unwrap();
        assert!(target.is_target("777"));
        assert_eq!(store.saved.lock().unwrap().as_deref(), Some("777"));
    }

    #[tokio::test]
    async fn failed_save_keeps_previous_channel() {
        let store = Arc::new(MemoryStore {
            fail_save: true,
            ..Default::default()
        });
        let target = TargetChannel::load(store, Some("1".into()))
            .await
            .unwrap();
        assert!(target.set("2").await.is_err());
        assert!(target.is_target("1"));
    }

    #[tokio::test]
    async fn rejects_malformed_ids() {
        let store = Arc::new(MemoryStore::default());
        let target = TargetChannel::load(store.clone(), None).await.unwrap();
        for bad in ["", "  ", "12 34", "general", "#123", "<#123>"] {
            assert!(matches!(
                target.set(bad).await,
                Err(Error::InvalidInput { .. })
            ));
        }
        assert_eq!(*store.saved.lock().unwrap(), None);
    }
}
