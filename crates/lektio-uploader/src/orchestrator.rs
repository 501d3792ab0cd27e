//! Upload orchestrator: precondition gates, then fire-and-forget.
//!
//! `start` validates synchronously, registers the task, and spawns the
//! detached sequence. The caller may return (or its screen unmount)
//! immediately; the spawned task survives it. Everything after the spawn is
//! handled internally; the only error channel back to the caller is the
//! synchronous precondition check.

use std::sync::Arc;

use uuid::Uuid;

use lektio_core::{AppError, Config, FileHandle, MediaRecordPatch};
use lektio_transport::{ProgressFn, Transport};

use crate::registry::TaskRegistry;
use crate::store::MetadataStore;

/// Constructed once at process scope; cheap to clone into callers.
#[derive(Clone)]
pub struct UploadOrchestrator {
    transport: Arc<dyn Transport>,
    store: Arc<dyn MetadataStore>,
    registry: TaskRegistry,
    config: Config,
}

impl UploadOrchestrator {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn MetadataStore>,
        registry: TaskRegistry,
        config: Config,
    ) -> Self {
        Self {
            transport,
            store,
            registry,
            config,
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Pre-flight size gate, shared with callers that need to reject a
    /// selection before creating any record.
    pub fn validate(&self, file: &FileHandle) -> Result<(), AppError> {
        if file.size_bytes > self.config.max_upload_bytes {
            return Err(AppError::PayloadTooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.config.max_upload_bytes,
            });
        }
        Ok(())
    }

    /// Start a detached transfer for `record_id`.
    ///
    /// Fails fast, synchronously, when the file exceeds the configured
    /// ceiling or a task for this record is already in flight. On `Ok` the
    /// registry holds an entry at 0% and the transfer proceeds detached:
    /// progress ticks update the registry, and when the transfer settles the
    /// record is finalized to `ready` + URL or `error` + diagnostic and the
    /// registry entry is removed.
    pub fn start(&self, record_id: Uuid, file: FileHandle) -> Result<(), AppError> {
        self.validate(&file)?;
        if !self.registry.claim(record_id) {
            return Err(AppError::UploadInFlight(record_id));
        }

        tracing::info!(
            record_id = %record_id,
            size_bytes = file.size_bytes,
            file = file.file_name(),
            "Starting background upload"
        );

        let transport = self.transport.clone();
        let store = self.store.clone();
        let registry = self.registry.clone();
        let endpoint = self.config.upload_endpoint.clone();
        tokio::spawn(async move {
            run_transfer(transport, store, registry, endpoint, record_id, file).await;
        });

        Ok(())
    }
}

/// The detached sequence. The finalization write happens-after every
/// progress callback of this task, and the registry entry is cleared
/// unconditionally, including when that write itself fails.
async fn run_transfer(
    transport: Arc<dyn Transport>,
    store: Arc<dyn MetadataStore>,
    registry: TaskRegistry,
    endpoint: String,
    record_id: Uuid,
    file: FileHandle,
) {
    let progress_registry = registry.clone();
    let on_progress: ProgressFn =
        Box::new(move |percent| progress_registry.set_progress(record_id, percent));

    let patch = match transport.send(&endpoint, &file, on_progress).await {
        Ok(url) => {
            tracing::info!(record_id = %record_id, url = %url, "Upload completed");
            MediaRecordPatch::ready(url)
        }
        Err(e) => {
            tracing::warn!(record_id = %record_id, error = %e, "Upload failed");
            MediaRecordPatch::error(e.to_string())
        }
    };

    if let Err(e) = store.update_record(record_id, patch).await {
        // Not retried. The record may be left `uploading` forever; the
        // registry is still cleared so the UI never shows a stuck indicator.
        tracing::error!(
            record_id = %record_id,
            error = %e,
            "Failed to finalize record after upload settled"
        );
    }

    registry.clear(record_id);
}
