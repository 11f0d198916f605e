//! Error types for rolo.

use thiserror::Error;

/// Failure taxonomy for the query pipeline.
///
/// `ExternalService` is always recovered locally (fallback classifier or
/// rule-based advice) and never reaches the caller. Not-found and
/// missing-entity conditions are not errors at all; handlers turn them
/// into text responses. Only `Store` and `Internal` propagate to the
/// HTTP boundary.
#[derive(Error, Debug)]
pub enum RoloError {
    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RoloError {
    /// Whether this failure must be absorbed by a degradation path
    /// rather than surfaced to the caller.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RoloError::ExternalService(_))
    }
}

pub type Result<T> = std::result::Result<T, RoloError>;
