use std::borrow::Cow;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DatasourceError>;

/// Every failure a datasource can report.
///
/// The `Display` text of each variant is exactly the message carried by the
/// error envelope handed back to callers.
#[derive(Debug, Error)]
pub enum DatasourceError {
    #[error("Datasource directory not found.")]
    DirectoryNotFound,

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("No key value provided.")]
    MissingKey,

    #[error("File not found: {key}")]
    FileNotFound { key: String },

    #[error("Invalid key value: {key}")]
    InvalidKey { key: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidRange { field: &'static str, value: String },

    #[error("Invalid payload: {reason}")]
    InvalidPayload { reason: Cow<'static, str> },

    #[error("Invalid discriminator: {value}")]
    InvalidDiscriminator { value: String },

    #[error("Unable to parse request: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {reason}")]
    Configuration { reason: String },
}
