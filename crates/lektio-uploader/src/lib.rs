//! Lektio Uploader Library
//!
//! Background upload orchestration: the process-wide task registry, the
//! metadata-store seam, the detached upload orchestrator, and the
//! lesson-media service screens call into.
//!
//! The orchestrator is constructed once at process scope and outlives any
//! screen: a caller starts a transfer and may go away immediately; the
//! detached task keeps running, feeds progress into the registry, and
//! finalizes the record's status when the transfer settles.

pub mod orchestrator;
pub mod registry;
pub mod service;
pub mod store;
pub mod telemetry;

// Re-export commonly used types
pub use orchestrator::UploadOrchestrator;
pub use registry::TaskRegistry;
pub use service::{LessonMediaService, NewLessonVideo, VideoSource};
pub use store::{MemoryMetadataStore, MetadataStore};
