//! Transport abstraction trait
//!
//! This module defines the Transport trait that both upload implementations
//! must satisfy, along with the transport error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

use lektio_core::models::FileHandle;

/// Progress callback invoked with an integer percent (0-100).
///
/// Implementations fire it at their own discretion but at least on
/// meaningful byte-count deltas; values within one send are non-decreasing.
pub type ProgressFn = Box<dyn Fn(u8) + Send + Sync>;

/// Transport operation errors.
///
/// The `Display` text of each variant is the best available diagnostic for
/// the failure, in the preference order HTTP status text, response body,
/// exception message. The orchestrator persists it verbatim as the record's
/// `error_detail`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Http(String),

    #[error("Upload rejected with HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Unexpected response body: {0}")]
    UnexpectedBody(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload queue closed")]
    QueueClosed,
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        TransportError::Http(err.to_string())
    }
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;

/// Transport abstraction trait
///
/// One operation: send the file behind `file` to `endpoint` as multipart
/// form data, reporting progress through `on_progress`, and return the
/// remote URL the destination responded with.
///
/// The destination's response body is plain text: an absolute URL on
/// success, a diagnostic string otherwise, regardless of HTTP status. Both
/// implementations apply the same decision rule (see `response`), so callers
/// can swap them freely.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        endpoint: &str,
        file: &FileHandle,
        on_progress: ProgressFn,
    ) -> TransportResult<String>;
}
