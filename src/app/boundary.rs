//! Inbound edge of the crate: the `GET`/`POST configuration` pair a
//! presentation layer calls after it has authorized the operator.

use crate::core::configuration::{ConfigurationService, SaveOutcome};
use crate::domain::model::{CarrierSettings, ConfigurationView};
use crate::domain::ports::{CatalogClient, SettingsStore};
use crate::utils::error::{CarrierConfigError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

const MAX_IDENTIFIER_LEN: usize = 64;
const MAX_API_KEY_LEN: usize = 256;
const MAX_SERVICE_CODE_LEN: usize = 32;

/// Submitted configuration, as posted by the operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigurationForm {
    pub customer_number: String,
    pub contract_id: String,
    pub api_key: Option<String>,
    pub use_sandbox: bool,
    pub selected_service_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

fn service_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*$").expect("service code pattern is valid")
    })
}

fn check_text(errors: &mut Vec<FieldError>, field: &str, value: &str, max_len: usize) {
    if value.chars().count() > max_len {
        errors.push(FieldError::new(
            field,
            format!("must be at most {} characters", max_len),
        ));
    }
    if value.chars().any(char::is_control) {
        errors.push(FieldError::new(field, "must not contain control characters"));
    }
}

impl ConfigurationForm {
    /// Every structural problem with the submission.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();

        check_text(
            &mut errors,
            "customer_number",
            &self.customer_number,
            MAX_IDENTIFIER_LEN,
        );
        check_text(&mut errors, "contract_id", &self.contract_id, MAX_IDENTIFIER_LEN);
        if let Some(api_key) = &self.api_key {
            check_text(&mut errors, "api_key", api_key, MAX_API_KEY_LEN);
        }

        for code in &self.selected_service_codes {
            let code = code.trim();
            if code.len() > MAX_SERVICE_CODE_LEN || !service_code_pattern().is_match(code) {
                errors.push(FieldError::new(
                    "selected_service_codes",
                    format!("'{}' is not a valid service code", code),
                ));
            }
        }

        errors
    }

    pub fn into_candidate(self) -> CarrierSettings {
        CarrierSettings {
            customer_number: self.customer_number,
            contract_id: self.contract_id,
            api_key: self.api_key.unwrap_or_default(),
            use_sandbox: self.use_sandbox,
            selected_service_codes: self
                .selected_service_codes
                .iter()
                .map(|code| code.trim().to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PostResponse {
    Saved {
        view: ConfigurationView,
        notice: String,
    },
    /// The form failed structural checks; nothing was written.
    Rejected {
        errors: Vec<FieldError>,
        form: ConfigurationForm,
        #[serde(skip_serializing_if = "Option::is_none")]
        view: Option<ConfigurationView>,
    },
    SaveFailed {
        message: String,
        form: ConfigurationForm,
    },
}

pub struct ConfigurationEndpoint<C: CatalogClient, S: SettingsStore> {
    service: ConfigurationService<C, S>,
}

impl<C: CatalogClient, S: SettingsStore> ConfigurationEndpoint<C, S> {
    pub fn new(service: ConfigurationService<C, S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &ConfigurationService<C, S> {
        &self.service
    }

    pub async fn get(&self) -> Result<ConfigurationView> {
        Ok(self.service.load_for_display().await?)
    }

    pub async fn post(&self, form: ConfigurationForm) -> PostResponse {
        let errors = form.field_errors();
        if !errors.is_empty() {
            tracing::info!("Rejected configuration form with {} errors", errors.len());
            let view = match self.service.load_for_display().await {
                Ok(view) => Some(view),
                Err(e) => {
                    tracing::warn!("Could not load current settings for redisplay: {}", e);
                    None
                }
            };
            return PostResponse::Rejected { errors, form, view };
        }

        match self.service.validate_and_save(form.clone().into_candidate()).await {
            SaveOutcome::Saved { view, notice } => PostResponse::Saved { view, notice },
            SaveOutcome::Failed { error, .. } => PostResponse::SaveFailed {
                message: CarrierConfigError::from(error).user_friendly_message(),
                form,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = ConfigurationForm {
            customer_number: "2004381".to_string(),
            contract_id: "42708517".to_string(),
            api_key: Some("6e93d53968881714 : 0bfa9fcb9853d1f51ee57a".to_string()),
            use_sandbox: true,
            selected_service_codes: vec!["DOM.EP".to_string(), "USA.PW.ENV".to_string()],
        };
        assert!(form.field_errors().is_empty());
    }

    #[test]
    fn test_empty_form_is_structurally_valid() {
        assert!(ConfigurationForm::default().field_errors().is_empty());
    }

    #[test]
    fn test_form_reports_every_problem() {
        let form = ConfigurationForm {
            customer_number: "x".repeat(65),
            contract_id: "ok".to_string(),
            api_key: Some("key\nsecret".to_string()),
            use_sandbox: false,
            selected_service_codes: vec!["DOM.EP".to_string(), "".to_string(), "DOM EP".to_string()],
        };

        let fields: Vec<String> = form.field_errors().into_iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "customer_number",
                "api_key",
                "selected_service_codes",
                "selected_service_codes"
            ]
        );
    }

    #[test]
    fn test_into_candidate_dedupes_codes_and_defaults_key() {
        let form = ConfigurationForm {
            api_key: None,
            selected_service_codes: vec![
                "DOM.XP".to_string(),
                " DOM.EP ".to_string(),
                "DOM.XP".to_string(),
            ],
            ..Default::default()
        };

        let candidate = form.into_candidate();
        assert_eq!(candidate.api_key, "");
        assert_eq!(
            candidate.selected_service_codes.into_iter().collect::<Vec<_>>(),
            vec!["DOM.EP", "DOM.XP"]
        );
    }

    #[test]
    fn test_form_deserializes_with_missing_fields() {
        let form: ConfigurationForm =
            serde_json::from_str(r#"{"api_key": null, "use_sandbox": true}"#).unwrap();
        assert!(form.use_sandbox);
        assert!(form.api_key.is_none());
        assert!(form.selected_service_codes.is_empty());
    }
}
