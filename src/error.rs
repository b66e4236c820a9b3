// src/error.rs

//! Unified error handling for the bot.

use std::fmt;

use thiserror::Error;

use crate::services::mailer::DeliveryError;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// AWS S3 error
    #[cfg(feature = "s3")]
    #[error("S3 error: {0}")]
    S3(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The notice page URL is malformed
    #[error("The URL is not correct: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Required environment keys are absent or blank
    #[error("Missing required environment variable(s): {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    /// Persisted state could not be parsed
    #[error("State file error at byte {offset}: {message}")]
    State { offset: usize, message: String },

    /// Mail delivery failed in a way that affects every recipient
    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a state parse error at the given byte offset.
    pub fn state(offset: usize, message: impl fmt::Display) -> Self {
        Self::State {
            offset,
            message: message.to_string(),
        }
    }

    /// Whether this error means the fetch URL itself was unusable.
    pub fn is_invalid_url(&self) -> bool {
        matches!(self, Self::Url(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_lists_every_key() {
        let err = AppError::MissingEnv(vec!["sheet_name".into(), "shetty_token".into()]);
        assert_eq!(
            err.to_string(),
            "Missing required environment variable(s): sheet_name, shetty_token"
        );
    }

    #[test]
    fn url_errors_are_flagged() {
        let err: AppError = url::Url::parse("examination-notice.php").unwrap_err().into();
        assert!(err.is_invalid_url());
        assert!(!AppError::config("x").is_invalid_url());
    }
}
