use crate::domain::model::{CarrierService, CarrierSettings, SettingsRecord};
use crate::utils::error::{FetchError, PersistError};
use async_trait::async_trait;

/// Generic key-value persistence. A `write` replaces the whole value or nothing.
pub trait Storage: Send + Sync {
    fn read(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<Vec<u8>>, PersistError>> + Send;
    fn write(
        &self,
        key: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<(), PersistError>> + Send;
}

#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_services(
        &self,
        api_key: &str,
        use_sandbox: bool,
    ) -> Result<Vec<CarrierService>, FetchError>;
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// The stored record, or `None` when nothing has been saved yet.
    async fn load_record(&self) -> Result<Option<SettingsRecord>, PersistError>;

    async fn save(&self, settings: &CarrierSettings) -> Result<(), PersistError>;

    async fn load(&self) -> Result<CarrierSettings, PersistError> {
        Ok(self
            .load_record()
            .await?
            .map(|record| record.settings)
            .unwrap_or_default())
    }
}
