//! Error types module
//!
//! Core error types used throughout the Lektio upload pipeline. Everything is
//! unified under the `AppError` enum; transport-level errors live in
//! `lektio-transport` and are flattened into `AppError::Transport` once the
//! orchestrator has extracted the best available diagnostic.

use uuid::Uuid;

use crate::models::RecordStatus;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File too large: {size_bytes} bytes exceeds maximum of {max_bytes} bytes")]
    PayloadTooLarge { size_bytes: u64, max_bytes: u64 },

    #[error("Upload already in flight for record {0}")]
    UploadInFlight(Uuid),

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidStatusTransition {
        from: RecordStatus,
        to: RecordStatus,
    },

    #[error("Record not found: {0}")]
    NotFound(Uuid),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Metadata store error: {0}")]
    Store(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error type name for log fields and diagnostics.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::PayloadTooLarge { .. } => "PayloadTooLarge",
            AppError::UploadInFlight(_) => "UploadInFlight",
            AppError::InvalidStatusTransition { .. } => "InvalidStatusTransition",
            AppError::NotFound(_) => "NotFound",
            AppError::Transport(_) => "Transport",
            AppError::Store(_) => "Store",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Whether this error was raised synchronously by a precondition check,
    /// before any detached work began.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            AppError::PayloadTooLarge { .. } | AppError::UploadInFlight(_)
        )
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
