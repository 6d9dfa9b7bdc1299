//! Centralized error types for Urgencia.

use thiserror::Error;

/// Main error type for Urgencia operations.
#[derive(Error, Debug)]
pub enum UrgenciaError {
    #[error("Patient not found: {0}")]
    PatientNotFound(u64),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Urgencia operations.
pub type UrgenciaResult<T> = Result<T, UrgenciaError>;

impl UrgenciaError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
