pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Command};

pub use adapters::{
    CanadaPostClient, LocalStorage, MemoryStorage, SettingsStoreAdapter, StorageBackend,
};
pub use app::boundary::{ConfigurationEndpoint, ConfigurationForm, PostResponse};
pub use config::AppConfig;
pub use crate::core::configuration::{ConfigurationService, SaveOutcome};
pub use utils::error::{CarrierConfigError, FetchError, FetchErrorKind, PersistError, Result};
