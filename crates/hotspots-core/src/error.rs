//! Error types for the hotspot detection core

use thiserror::Error;

/// Result type alias for hotspot operations
pub type Result<T> = std::result::Result<T, Error>;

/// Hotspot detection errors
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Non-finite coordinate on a post
    #[error("Invalid coordinate on post '{post_id}': ({latitude}, {longitude})")]
    InvalidCoordinate {
        post_id: String,
        latitude: f64,
        longitude: f64,
    },

    /// Malformed raw payload
    #[error("Malformed payload: {0}")]
    Payload(String),

    /// Category classifier error
    #[error("Category classification failed: {0}")]
    Classifier(String),

    /// Sentiment scorer error
    #[error("Sentiment scoring failed: {0}")]
    Sentiment(String),

    /// Report sink error
    #[error("Report sink error: {0}")]
    Sink(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an invalid coordinate error for a post
    pub fn invalid_coordinate(
        post_id: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self::InvalidCoordinate {
            post_id: post_id.into(),
            latitude,
            longitude,
        }
    }

    /// Create a payload error
    pub fn payload(message: impl Into<String>) -> Self {
        Self::Payload(message.into())
    }

    /// Create a classifier error
    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier(message.into())
    }

    /// Create a sentiment error
    pub fn sentiment(message: impl Into<String>) -> Self {
        Self::Sentiment(message.into())
    }

    /// Create a sink error
    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}
