use crate::core::credentials;
use crate::core::reconcile::reconcile;
use crate::domain::model::{CarrierSettings, ConfigurationView};
use crate::domain::ports::{CatalogClient, SettingsStore};
use crate::utils::error::PersistError;
use chrono::{DateTime, Utc};

pub const SAVED_NOTICE: &str = "Settings saved";

/// Result of a save attempt. A failed save hands back what the operator submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved {
        view: ConfigurationView,
        notice: String,
    },
    Failed {
        error: PersistError,
        submitted: CarrierSettings,
    },
}

pub struct ConfigurationService<C: CatalogClient, S: SettingsStore> {
    catalog: C,
    store: S,
}

impl<C: CatalogClient, S: SettingsStore> ConfigurationService<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored settings plus the live catalog. A catalog failure yields an
    /// empty service list, never an error.
    pub async fn load_for_display(&self) -> Result<ConfigurationView, PersistError> {
        let record = self.store.load_record().await?;
        let (settings, updated_at) = match record {
            Some(record) => (record.settings, Some(record.updated_at)),
            None => (CarrierSettings::default(), None),
        };
        Ok(self.build_view(settings, updated_at).await)
    }

    /// Normalizes the key, commits the candidate as one record and returns a
    /// fresh view of what was stored.
    pub async fn validate_and_save(&self, candidate: CarrierSettings) -> SaveOutcome {
        let settings = CarrierSettings {
            api_key: credentials::normalize(&candidate.api_key),
            ..candidate.clone()
        };

        if let Err(error) = self.store.save(&settings).await {
            tracing::error!("Failed to save carrier settings: {}", error);
            return SaveOutcome::Failed {
                error,
                submitted: candidate,
            };
        }

        tracing::info!(
            "Saved carrier settings (sandbox: {}, {} services selected)",
            settings.use_sandbox,
            settings.selected_service_codes.len()
        );

        let view = match self.load_for_display().await {
            Ok(view) => view,
            Err(e) => {
                // the write went through; show what was written
                tracing::warn!("Reload after save failed, rendering saved values: {}", e);
                self.build_view(settings, Some(Utc::now())).await
            }
        };

        SaveOutcome::Saved {
            view,
            notice: SAVED_NOTICE.to_string(),
        }
    }

    async fn build_view(
        &self,
        settings: CarrierSettings,
        updated_at: Option<DateTime<Utc>>,
    ) -> ConfigurationView {
        let (available_services, catalog_error) = match self
            .catalog
            .fetch_services(&settings.api_key, settings.use_sandbox)
            .await
        {
            Ok(catalog) => {
                tracing::debug!("Carrier catalog returned {} services", catalog.len());
                (reconcile(&catalog, &settings.selected_service_codes), None)
            }
            Err(e) => {
                tracing::warn!("Carrier catalog unavailable: {}", e);
                (Vec::new(), Some(e.kind()))
            }
        };

        ConfigurationView {
            customer_number: settings.customer_number,
            contract_id: settings.contract_id,
            api_key: settings.api_key,
            use_sandbox: settings.use_sandbox,
            selected_service_codes: settings.selected_service_codes,
            available_services,
            catalog_error,
            updated_at,
        }
    }
}
