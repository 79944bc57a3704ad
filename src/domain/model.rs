use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::utils::error::FetchErrorKind;

/// The persisted carrier configuration. One record per store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSettings {
    pub customer_number: String,
    pub contract_id: String,
    /// `key:secret` as issued by the carrier portal.
    pub api_key: String,
    pub use_sandbox: bool,
    #[serde(default)]
    pub selected_service_codes: BTreeSet<String>,
}

/// What actually sits in storage: the settings plus when they were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    #[serde(flatten)]
    pub settings: CarrierSettings,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierService {
    pub code: String,
    pub display_name: String,
}

impl CarrierService {
    pub fn new(code: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            display_name: display_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSelectionItem {
    pub code: String,
    pub display_name: String,
    pub is_selected: bool,
}

/// Everything the configuration screen needs to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationView {
    pub customer_number: String,
    pub contract_id: String,
    pub api_key: String,
    pub use_sandbox: bool,
    pub selected_service_codes: BTreeSet<String>,
    pub available_services: Vec<ServiceSelectionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_error: Option<FetchErrorKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ConfigurationView {
    /// Next step for the operator when the carrier's service list could not be loaded.
    pub fn catalog_hint(&self) -> Option<&'static str> {
        self.catalog_error.map(|kind| kind.recovery_suggestion())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_empty() {
        let settings = CarrierSettings::default();
        assert!(settings.customer_number.is_empty());
        assert!(settings.contract_id.is_empty());
        assert!(settings.api_key.is_empty());
        assert!(!settings.use_sandbox);
        assert!(settings.selected_service_codes.is_empty());
    }

    #[test]
    fn test_catalog_hint_follows_fetch_error() {
        let mut view = ConfigurationView {
            customer_number: String::new(),
            contract_id: String::new(),
            api_key: "bad:key".to_string(),
            use_sandbox: false,
            selected_service_codes: BTreeSet::new(),
            available_services: Vec::new(),
            catalog_error: None,
            updated_at: None,
        };
        assert_eq!(view.catalog_hint(), None);

        view.catalog_error = Some(FetchErrorKind::AuthFailure);
        assert_eq!(
            view.catalog_hint(),
            Some("Check the API key and whether it belongs to the selected environment")
        );
    }

    #[test]
    fn test_record_flattens_settings_fields() {
        let record = SettingsRecord {
            settings: CarrierSettings {
                customer_number: "2004381".to_string(),
                contract_id: "42708517".to_string(),
                api_key: "6e93d53968881714:0bfa9fcb9853d1f51ee57a".to_string(),
                use_sandbox: true,
                selected_service_codes: ["DOM.EP".to_string()].into_iter().collect(),
            },
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["customer_number"], "2004381");
        assert_eq!(json["use_sandbox"], true);
        assert_eq!(json["selected_service_codes"][0], "DOM.EP");
        assert!(json.get("updated_at").is_some());

        let decoded: SettingsRecord = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, record);
    }
}
