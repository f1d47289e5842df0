use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use {
    async_trait::async_trait,
    serde::{Deserialize, Serialize},
    tracing::debug,
};

use crate::error::{Context, Result};

/// Persistent storage for the monitored channel.
#[async_trait]
pub trait TargetChannelStore: Send + Sync {
    /// Previously saved channel, if any.
    async fn load(&self) -> Result<Option<String>>;
    async fn save(&self, channel_id: &str) -> Result<()>;
}

/// On-disk record.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredChannel {
    channel_id: String,
    updated_at: i64,
}

/// Stores the monitored channel as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileTargetChannelStore {
    path: PathBuf,
}

impl FileTargetChannelStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TargetChannelStore for FileTargetChannelStore {
    async fn load(&self) -> Result<Option<String>> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).with_context(|| format!("read {}", self.path.display()));
            },
        };
        let stored: StoredChannel = serde_json::from_str(&raw)?;
        let channel_id = stored.channel_id.trim();
        Ok((!channel_id.is_empty()).then(|| channel_id.to_string()))
    }

    async fn save(&self, channel_id: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("create {}", parent.display()))?;
        }

        let record = StoredChannel {
            channel_id: channel_id.to_string(),
            updated_at: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs() as i64,
        };
        let json = serde_json::to_string_pretty(&record)?;

        // Readers only ever see a complete file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), channel_id, "saved monitored channel");
        Ok(())
    }
}
