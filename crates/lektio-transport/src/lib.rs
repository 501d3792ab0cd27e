//! Lektio Transport Library
//!
//! This crate owns the network leg of the upload pipeline: a single
//! [`Transport`] contract ("send this local file to this HTTP endpoint as
//! multipart form data, report progress, return the resulting remote URL")
//! and two interchangeable implementations.
//!
//! # Implementations
//!
//! - [`StreamingTransport`]: streams the file through the request body and
//!   reports byte-level progress on every meaningful percent delta.
//! - [`QueuedTransport`]: a long-lived background upload queue that accepts
//!   local file paths and reports progress via periodic callbacks.
//!
//! Both honor the exact same success/failure decision rule on the response
//! body, so the orchestrator stays transport-agnostic. Selection between the
//! two happens once, at construction time, in [`factory::create_transport`].
//!
//! Transports have no side effects beyond the HTTP call: they never touch
//! the task registry or the metadata store.

pub mod factory;
pub mod queued;
pub(crate) mod response;
pub mod streaming;
pub mod traits;

// Re-export commonly used types
pub use factory::create_transport;
pub use queued::QueuedTransport;
pub use streaming::StreamingTransport;
pub use traits::{ProgressFn, Transport, TransportError, TransportResult};
