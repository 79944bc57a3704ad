use crate::domain::model::{CarrierSettings, SettingsRecord};
use crate::domain::ports::{SettingsStore, Storage};
use crate::utils::error::PersistError;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

pub const DEFAULT_SETTINGS_KEY: &str = "carrier-settings";

/// Keeps the carrier settings as a single JSON document under one key, so the
/// five fields are always written together.
pub struct SettingsStoreAdapter<S: Storage> {
    storage: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S: Storage> SettingsStoreAdapter<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SETTINGS_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<S: Storage> SettingsStore for SettingsStoreAdapter<S> {
    async fn load_record(&self) -> Result<Option<SettingsRecord>, PersistError> {
        let Some(data) = self.storage.read(&self.key).await? else {
            tracing::debug!("No settings stored under '{}', using defaults", self.key);
            return Ok(None);
        };

        let record = serde_json::from_slice(&data).map_err(|e| PersistError::Corrupt {
            message: format!("settings record '{}': {}", self.key, e),
        })?;
        Ok(Some(record))
    }

    async fn save(&self, settings: &CarrierSettings) -> Result<(), PersistError> {
        let record = SettingsRecord {
            settings: settings.clone(),
            updated_at: Utc::now(),
        };
        let data = serde_json::to_vec_pretty(&record).map_err(|e| PersistError::Corrupt {
            message: format!("could not encode settings: {}", e),
        })?;

        // last writer wins, but two saves never interleave their writes
        let _guard = self.write_lock.lock().await;
        self.storage.write(&self.key, &data).await
    }
}
