//! Metadata-store seam.
//!
//! Record CRUD belongs to the platform; this subsystem only needs to create
//! a record and write the lifecycle fields (status, url, error_detail). The
//! trait captures exactly that surface so the orchestrator can be wired to
//! the real platform store, while `MemoryMetadataStore` backs tests and
//! standalone embedding.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use lektio_core::{AppError, MediaRecord, MediaRecordPatch, NewMediaRecord};

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Create a record from the given fields and return its assigned id.
    async fn create_record(&self, fields: NewMediaRecord) -> Result<Uuid, AppError>;

    /// Apply a lifecycle patch to an existing record.
    async fn update_record(&self, id: Uuid, patch: MediaRecordPatch) -> Result<(), AppError>;

    /// Fetch a record by id.
    async fn record(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError>;
}

/// In-memory metadata store.
#[derive(Default)]
pub struct MemoryMetadataStore {
    records: Mutex<HashMap<Uuid, MediaRecord>>,
}

impl MemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for MemoryMetadataStore {
    async fn create_record(&self, fields: NewMediaRecord) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        let record = MediaRecord::create(id, fields);
        self.records
            .lock()
            .expect("metadata store poisoned")
            .insert(id, record);
        Ok(id)
    }

    async fn update_record(&self, id: Uuid, patch: MediaRecordPatch) -> Result<(), AppError> {
        let mut records = self.records.lock().expect("metadata store poisoned");
        let record = records.get_mut(&id).ok_or(AppError::NotFound(id))?;
        record.apply(patch)
    }

    async fn record(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        let records = self.records.lock().expect("metadata store poisoned");
        Ok(records.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lektio_core::{CourseScope, RecordStatus};

    #[tokio::test]
    async fn create_and_fetch() {
        let store = MemoryMetadataStore::new();
        let id = store
            .create_record(NewMediaRecord::uploading(
                "Lesson",
                "",
                CourseScope::AllCourses,
                "teacher",
            ))
            .await
            .unwrap();

        let record = store.record(id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Uploading);
        assert_eq!(record.url, "");
    }

    #[tokio::test]
    async fn update_applies_lifecycle_patch() {
        let store = MemoryMetadataStore::new();
        let id = store
            .create_record(NewMediaRecord::uploading(
                "Lesson",
                "",
                CourseScope::AllCourses,
                "teacher",
            ))
            .await
            .unwrap();

        store
            .update_record(id, MediaRecordPatch::ready("https://host/x.mp4"))
            .await
            .unwrap();

        let record = store.record(id).await.unwrap().unwrap();
        assert_eq!(record.status, RecordStatus::Ready);
        assert_eq!(record.url, "https://host/x.mp4");
    }

    #[tokio::test]
    async fn update_unknown_record_is_not_found() {
        let store = MemoryMetadataStore::new();
        let err = store
            .update_record(Uuid::new_v4(), MediaRecordPatch::error("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_rejects_invalid_transition() {
        let store = MemoryMetadataStore::new();
        let id = store
            .create_record(NewMediaRecord::ready(
                "Lesson",
                "",
                CourseScope::AllCourses,
                "teacher",
                "https://cdn/x.mp4",
            ))
            .await
            .unwrap();

        let err = store
            .update_record(id, MediaRecordPatch::error("late"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidStatusTransition { .. }));
    }
}
