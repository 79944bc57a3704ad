// Adapters layer: concrete implementations of the domain ports.

pub mod carrier_api;
pub mod settings_store;
pub mod storage;

pub use carrier_api::CanadaPostClient;
pub use settings_store::SettingsStoreAdapter;
pub use storage::{LocalStorage, MemoryStorage, StorageBackend};
