//! Connector errors

use thiserror::Error;

/// Bot Framework connector errors
#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Token acquisition failed: {0}")]
    Token(String),

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Invalid activity: {0}")]
    InvalidActivity(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
