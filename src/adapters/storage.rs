use crate::config::{StorageConfig, StorageKind};
use crate::domain::ports::Storage;
use crate::utils::error::PersistError;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tokio::sync::RwLock;

/// One JSON file per key under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", key))
    }
}

impl Storage for LocalStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        let path = self.file_for(key);
        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                tracing::error!("Failed to read {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<(), PersistError> {
        let path = self.file_for(key);
        let base_path = self.base_path.clone();
        let data = data.to_vec();

        // a fresh staging file per write, renamed over the record
        let written = tokio::task::spawn_blocking(move || -> std::io::Result<usize> {
            std::fs::create_dir_all(&base_path)?;
            let mut staging = NamedTempFile::new_in(&base_path)?;
            staging.write_all(&data)?;
            staging.as_file().sync_all()?;
            staging.persist(&path).map_err(|e| e.error)?;
            Ok(data.len())
        })
        .await
        .map_err(|e| PersistError::Unavailable {
            message: format!("storage task failed: {}", e),
        })??;

        tracing::debug!("Wrote {} bytes to {}", written, self.file_for(key).display());
        Ok(())
    }
}

/// Process-local store, used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<(), PersistError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }
}

/// Backend chosen from configuration at startup.
#[derive(Debug, Clone)]
pub enum StorageBackend {
    Local(LocalStorage),
    Memory(MemoryStorage),
}

impl StorageBackend {
    pub fn from_config(config: &StorageConfig) -> Self {
        match config.backend {
            StorageKind::File => StorageBackend::Local(LocalStorage::new(&config.path)),
            StorageKind::Memory => StorageBackend::Memory(MemoryStorage::new()),
        }
    }
}

impl Storage for StorageBackend {
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        match self {
            StorageBackend::Local(storage) => storage.read(key).await,
            StorageBackend::Memory(storage) => storage.read(key).await,
        }
    }

    async fn write(&self, key: &str, data: &[u8]) -> Result<(), PersistError> {
        match self {
            StorageBackend::Local(storage) => storage.write(key, data).await,
            StorageBackend::Memory(storage) => storage.write(key, data).await,
        }
    }
}
