//! Lektio Core Library
//!
//! This crate provides the domain models, record status lifecycle, error types,
//! and configuration shared across all Lektio components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;

// Re-export commonly used types
pub use config::{Config, TransportKind};
pub use error::AppError;
pub use models::{
    CourseScope, FileHandle, MediaRecord, MediaRecordPatch, NewMediaRecord, RecordStatus,
};
