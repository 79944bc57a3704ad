use serde::Serialize;
use thiserror::Error;

/// Why a catalog fetch produced no services.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Carrier API key is not configured")]
    MissingCredentials,

    #[error("Carrier API request failed: {message}")]
    NetworkFailure { message: String },

    #[error("Carrier API rejected the credentials (HTTP {status})")]
    AuthFailure { status: u16 },

    #[error("Carrier API response could not be parsed: {message}")]
    ParseFailure { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    MissingCredentials,
    NetworkFailure,
    AuthFailure,
    ParseFailure,
}

impl FetchErrorKind {
    /// What the operator can do while the service list is unavailable.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FetchErrorKind::MissingCredentials => {
                "Enter the API key from the carrier developer portal"
            }
            FetchErrorKind::AuthFailure => {
                "Check the API key and whether it belongs to the selected environment"
            }
            FetchErrorKind::NetworkFailure | FetchErrorKind::ParseFailure => {
                "Reload the configuration to retry the carrier API"
            }
        }
    }
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::MissingCredentials => FetchErrorKind::MissingCredentials,
            FetchError::NetworkFailure { .. } => FetchErrorKind::NetworkFailure,
            FetchError::AuthFailure { .. } => FetchErrorKind::AuthFailure,
            FetchError::ParseFailure { .. } => FetchErrorKind::ParseFailure,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersistError {
    #[error("Settings storage is unavailable: {message}")]
    Unavailable { message: String },

    #[error("Stored settings record is corrupt: {message}")]
    Corrupt { message: String },
}

impl From<std::io::Error> for PersistError {
    fn from(err: std::io::Error) -> Self {
        PersistError::Unavailable {
            message: err.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum CarrierConfigError {
    #[error(transparent)]
    Persist(#[from] PersistError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CarrierConfigError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            CarrierConfigError::Persist(PersistError::Unavailable { .. }) => {
                "The settings could not be saved because storage is unavailable".to_string()
            }
            CarrierConfigError::Persist(PersistError::Corrupt { .. }) => {
                "The stored carrier settings could not be read".to_string()
            }
            CarrierConfigError::IoError(err) => format!("File access failed: {}", err),
            CarrierConfigError::ConfigError { message } => message.clone(),
            CarrierConfigError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CarrierConfigError::Persist(PersistError::Unavailable { .. }) => {
                "Check that the settings storage path exists and is writable, then save again"
            }
            CarrierConfigError::Persist(PersistError::Corrupt { .. }) => {
                "Save the configuration again to overwrite the damaged record"
            }
            CarrierConfigError::IoError(_) => "Check file paths and permissions",
            CarrierConfigError::ConfigError { .. }
            | CarrierConfigError::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CarrierConfigError>;
