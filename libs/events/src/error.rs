//! Error types for broadcast handling.

use thiserror::Error;

/// Errors that can occur when preparing a broadcast for the wire.
#[derive(Debug, Error, Clone)]
pub enum BroadcastError {
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for BroadcastError {
    fn from(err: serde_json::Error) -> Self {
        BroadcastError::Serialization(err.to_string())
    }
}
