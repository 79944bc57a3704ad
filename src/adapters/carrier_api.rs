use crate::config::CarrierConfig;
use crate::core::credentials;
use crate::domain::model::CarrierService;
use crate::domain::ports::CatalogClient;
use crate::utils::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

const SERVICE_LIST_PATH: &str = "/rs/ship/service";

#[derive(Debug, Deserialize)]
struct ServiceListResponse {
    #[serde(default)]
    service: Vec<ServiceDescriptor>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ServiceDescriptor {
    service_code: String,
    service_name: String,
}

/// Reads the discover-services list from the Canada Post REST API.
#[derive(Debug, Clone)]
pub struct CanadaPostClient {
    client: Client,
    sandbox_url: String,
    production_url: String,
    timeout: Duration,
    origin_country: Option<String>,
}

impl CanadaPostClient {
    pub fn new(config: &CarrierConfig) -> Self {
        Self {
            client: Client::new(),
            sandbox_url: config.sandbox_url.clone(),
            production_url: config.production_url.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            origin_country: config.origin_country.clone(),
        }
    }

    pub fn endpoint(&self, use_sandbox: bool) -> String {
        let base = if use_sandbox {
            &self.sandbox_url
        } else {
            &self.production_url
        };
        format!("{}{}", base.trim_end_matches('/'), SERVICE_LIST_PATH)
    }

    fn map_services(response: ServiceListResponse) -> Result<Vec<CarrierService>, FetchError> {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(response.service.len());

        for descriptor in response.service {
            let code = descriptor.service_code.trim();
            if code.is_empty() {
                return Err(FetchError::ParseFailure {
                    message: "service entry without a service-code".to_string(),
                });
            }
            if !seen.insert(code.to_string()) {
                tracing::debug!("Ignoring repeated service code {}", code);
                continue;
            }
            services.push(CarrierService::new(code, descriptor.service_name.trim()));
        }

        Ok(services)
    }
}

#[async_trait]
impl CatalogClient for CanadaPostClient {
    async fn fetch_services(
        &self,
        api_key: &str,
        use_sandbox: bool,
    ) -> Result<Vec<CarrierService>, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::MissingCredentials);
        }

        let url = self.endpoint(use_sandbox);
        let (user, secret) = credentials::basic_auth_parts(api_key);
        tracing::debug!(
            "Requesting carrier services from {} as {}",
            url,
            credentials::mask(api_key)
        );

        let mut request = self
            .client
            .get(&url)
            .basic_auth(user, secret)
            .header("Accept", "application/json")
            .header("Accept-Language", "en-CA")
            .timeout(self.timeout);

        if let Some(country) = &self.origin_country {
            request = request.query(&[("country", country)]);
        }

        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                format!("no response within {}s", self.timeout.as_secs())
            } else {
                e.to_string()
            };
            FetchError::NetworkFailure { message }
        })?;

        let status = response.status();
        tracing::debug!("Carrier API response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(FetchError::AuthFailure {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            return Err(FetchError::NetworkFailure {
                message: format!("unexpected HTTP status {}", status),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::NetworkFailure {
                message: e.to_string(),
            })?;
        let parsed: ServiceListResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::ParseFailure {
                message: e.to_string(),
            })?;

        Self::map_services(parsed)
    }
}
