//! Domain error types
//!
//! This module defines the error hierarchy for Campdoc.
//! Errors carry messages only and don't expose third-party types.

use thiserror::Error;

/// Main Campdoc error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum CampdocError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Remote API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Login failed or no token was returned
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Document rendering errors
    #[error("Render error: {0}")]
    Render(String),

    /// CSV report errors
    #[error("Report error: {0}")]
    Report(String),

    /// Run metadata errors
    #[error("State management error: {0}")]
    State(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl CampdocError {
    /// Whether the error must abort the whole run rather than a single camp
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CampdocError::Authentication(_) | CampdocError::Configuration(_)
        )
    }
}

/// Remote API errors
///
/// Errors that occur when talking to the camp administration API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Failed to reach the server
    #[error("Failed to connect to API server: {0}")]
    ConnectionFailed(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Body was not valid JSON
    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    /// Body parsed to JSON null
    #[error("Empty response body: {0}")]
    EmptyBody(String),

    /// File download failed
    #[error("Download failed: {0}")]
    DownloadFailed(String),
}

impl ApiError {
    /// Maps a non-success status code to a client or server error
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if status >= 500 {
            ApiError::ServerError { status, message }
        } else {
            ApiError::ClientError { status, message }
        }
    }
}

impl From<std::io::Error> for CampdocError {
    fn from(err: std::io::Error) -> Self {
        CampdocError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CampdocError {
    fn from(err: serde_json::Error) -> Self {
        CampdocError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for CampdocError {
    fn from(err: toml::de::Error) -> Self {
        CampdocError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for CampdocError {
    fn from(err: csv::Error) -> Self {
        CampdocError::Report(err.to_string())
    }
}
