pub mod configuration;
pub mod credentials;
pub mod reconcile;

pub use crate::domain::model::{
    CarrierService, CarrierSettings, ConfigurationView, ServiceSelectionItem, SettingsRecord,
};
pub use crate::domain::ports::{CatalogClient, SettingsStore, Storage};
pub use crate::utils::error::Result;
