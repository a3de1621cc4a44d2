//! Error types for the release dashboard

use thiserror::Error;

/// Main error type for the release dashboard
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-2xx answer from the backend
    #[error("HTTP {status}: {message}")]
    StatusError { status: u16, message: String },

    /// Initial record load did not complete successfully
    #[error("Failed to fetch releases: {0}")]
    FetchFailed(String),

    /// Per-card resource fetch did not complete successfully
    #[error("Failed to fetch resources for {name}: {message}")]
    ResourceFetchFailed { name: String, message: String },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<url::ParseError> for DashboardError {
    fn from(err: url::ParseError) -> Self {
        DashboardError::ConfigError(err.to_string())
    }
}
