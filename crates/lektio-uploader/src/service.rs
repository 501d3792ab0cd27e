//! Lesson-media service: the caller-side control flow for publishing a
//! lesson video, kept out of presentation code.
//!
//! A video arrives either as an externally supplied URL (usable immediately,
//! upload skipped) or as a locally picked file (record created `uploading`,
//! then handed to the orchestrator). Screens only call `publish` and poll
//! `record`/`progress`.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use lektio_core::{AppError, CourseScope, FileHandle, MediaRecord, MediaRecordPatch, NewMediaRecord};

use crate::orchestrator::UploadOrchestrator;
use crate::store::MetadataStore;

/// Where the video's bytes come from.
#[derive(Debug, Clone, Deserialize)]
pub enum VideoSource {
    /// Already hosted somewhere playable; no transfer needed.
    ExternalUrl(String),
    /// Picked from local storage; transferred in the background.
    LocalFile(FileHandle),
}

/// Caller-supplied fields for a new lesson video.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLessonVideo {
    pub title: String,
    pub description: String,
    pub course_scope: CourseScope,
    pub author: String,
    pub source: VideoSource,
}

pub struct LessonMediaService {
    store: Arc<dyn MetadataStore>,
    orchestrator: UploadOrchestrator,
}

impl LessonMediaService {
    pub fn new(store: Arc<dyn MetadataStore>, orchestrator: UploadOrchestrator) -> Self {
        Self {
            store,
            orchestrator,
        }
    }

    /// Publish a lesson video and return its record id.
    ///
    /// For a local file the size gate runs before any record is created, so
    /// an oversize selection is rejected with no side effects at all. For an
    /// external URL the record is `ready` immediately.
    pub async fn publish(&self, video: NewLessonVideo) -> Result<Uuid, AppError> {
        match video.source {
            VideoSource::ExternalUrl(url) => {
                let url = url.trim().to_string();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(AppError::InvalidInput(format!(
                        "Video URL must be absolute: {url}"
                    )));
                }
                let id = self
                    .store
                    .create_record(NewMediaRecord::ready(
                        video.title,
                        video.description,
                        video.course_scope,
                        video.author,
                        url,
                    ))
                    .await?;
                tracing::info!(record_id = %id, "Published lesson video from external URL");
                Ok(id)
            }
            VideoSource::LocalFile(file) => {
                self.orchestrator.validate(&file)?;
                let id = self
                    .store
                    .create_record(NewMediaRecord::uploading(
                        video.title,
                        video.description,
                        video.course_scope,
                        video.author,
                    ))
                    .await?;

                if let Err(e) = self.orchestrator.start(id, file) {
                    // A fresh id cannot collide in the registry and the size
                    // gate already ran, so this is exceptional. Leave the
                    // record in a terminal error state rather than stuck.
                    let detail = e.to_string();
                    if let Err(store_err) = self
                        .store
                        .update_record(id, MediaRecordPatch::error(detail))
                        .await
                    {
                        tracing::error!(record_id = %id, error = %store_err, "Failed to record start refusal");
                    }
                    return Err(e);
                }
                Ok(id)
            }
        }
    }

    /// Fetch the record as the screens' list/detail views read it.
    pub async fn record(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        self.store.record(id).await
    }

    /// Current transfer progress for a record, if one is in flight.
    pub fn progress(&self, id: Uuid) -> Option<u8> {
        self.orchestrator.registry().progress(id)
    }
}
