//! Shared stubs for orchestrator and service tests: scripted transports,
//! counting/failing stores, and settle polling.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use uuid::Uuid;

use lektio_core::{AppError, Config, FileHandle, MediaRecord, MediaRecordPatch, NewMediaRecord};
use lektio_transport::{ProgressFn, Transport, TransportError, TransportResult};
use lektio_uploader::{MemoryMetadataStore, MetadataStore, TaskRegistry, UploadOrchestrator};

/// What a stub transport resolves to once its progress script is exhausted.
#[derive(Clone)]
pub enum StubOutcome {
    /// Success: the destination answered with this URL.
    Url(String),
    /// Application-level failure: the destination answered 200 with this
    /// non-URL diagnostic body.
    Body(String),
}

impl StubOutcome {
    fn into_result(self) -> TransportResult<String> {
        match self {
            StubOutcome::Url(url) => Ok(url),
            StubOutcome::Body(body) => Err(TransportError::UnexpectedBody(body)),
        }
    }
}

/// Transport stub that replays a fixed progress script and resolves.
pub struct StubTransport {
    steps: Vec<u8>,
    step_delay: Duration,
    outcome: StubOutcome,
    pub calls: AtomicUsize,
}

impl StubTransport {
    pub fn new(steps: Vec<u8>, outcome: StubOutcome) -> Self {
        Self {
            steps,
            step_delay: Duration::ZERO,
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        _endpoint: &str,
        _file: &FileHandle,
        on_progress: ProgressFn,
    ) -> TransportResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        for &percent in &self.steps {
            if !self.step_delay.is_zero() {
                tokio::time::sleep(self.step_delay).await;
            }
            on_progress(percent);
        }
        self.outcome.clone().into_result()
    }
}

/// Transport stub driven step-by-step from the test body: each value sent on
/// the channel becomes one progress callback; closing the channel resolves
/// the transfer.
pub struct ScriptedTransport {
    steps_rx: Mutex<Option<mpsc::UnboundedReceiver<u8>>>,
    outcome: StubOutcome,
}

impl ScriptedTransport {
    pub fn new(outcome: StubOutcome) -> (mpsc::UnboundedSender<u8>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            tx,
            Self {
                steps_rx: Mutex::new(Some(rx)),
                outcome,
            },
        )
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(
        &self,
        _endpoint: &str,
        _file: &FileHandle,
        on_progress: ProgressFn,
    ) -> TransportResult<String> {
        let mut rx = self
            .steps_rx
            .lock()
            .unwrap()
            .take()
            .expect("scripted transport used twice");
        while let Some(percent) = rx.recv().await {
            on_progress(percent);
        }
        self.outcome.clone().into_result()
    }
}

/// Metadata store wrapper counting trait invocations.
pub struct CountingStore {
    inner: MemoryMetadataStore,
    pub creates: AtomicUsize,
    pub updates: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryMetadataStore::new(),
            creates: AtomicUsize::new(0),
            updates: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl MetadataStore for CountingStore {
    async fn create_record(&self, fields: NewMediaRecord) -> Result<Uuid, AppError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create_record(fields).await
    }

    async fn update_record(&self, id: Uuid, patch: MediaRecordPatch) -> Result<(), AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_record(id, patch).await
    }

    async fn record(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        self.inner.record(id).await
    }
}

/// Store whose finalization writes always fail, for the known-gap path.
pub struct FailingStore {
    inner: MemoryMetadataStore,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryMetadataStore::new(),
        }
    }
}

#[async_trait]
impl MetadataStore for FailingStore {
    async fn create_record(&self, fields: NewMediaRecord) -> Result<Uuid, AppError> {
        self.inner.create_record(fields).await
    }

    async fn update_record(&self, _id: Uuid, _patch: MediaRecordPatch) -> Result<(), AppError> {
        Err(AppError::Store("write timed out".to_string()))
    }

    async fn record(&self, id: Uuid) -> Result<Option<MediaRecord>, AppError> {
        self.inner.record(id).await
    }
}

pub fn orchestrator(
    transport: Arc<dyn Transport>,
    store: Arc<dyn MetadataStore>,
) -> UploadOrchestrator {
    UploadOrchestrator::new(transport, store, TaskRegistry::new(), Config::default())
}

pub fn picked_file(size_bytes: u64) -> FileHandle {
    FileHandle::new("local://a.mp4", size_bytes)
}

pub async fn create_uploading_record(store: &dyn MetadataStore) -> Uuid {
    store
        .create_record(NewMediaRecord::uploading(
            "Week 3: Quadratic equations",
            "Recorded lesson",
            lektio_core::CourseScope::AllCourses,
            "Ms. Karimova",
        ))
        .await
        .unwrap()
}

/// Poll until the registry entry for `id` is gone; the finalization write
/// happens-before the clear, so the record is final once this returns.
pub async fn wait_settled(registry: &TaskRegistry, id: Uuid) {
    for _ in 0..500 {
        if registry.progress(id).is_none() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("task for {id} did not settle");
}

/// Poll until the registry shows exactly `percent` for `id`.
pub async fn wait_progress(registry: &TaskRegistry, id: Uuid, percent: u8) {
    for _ in 0..500 {
        if registry.progress(id) == Some(percent) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!(
        "task for {id} never reached {percent}% (currently {:?})",
        registry.progress(id)
    );
}
