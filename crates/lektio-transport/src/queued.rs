//! Background upload queue transport with periodic progress callbacks.
//!
//! A single long-lived worker task owns an HTTP client and processes upload
//! jobs strictly in submission order, the way a native OS upload queue
//! accepts file paths and reports progress on a timer rather than per chunk.
//! `send` enqueues a job and suspends until the worker delivers the outcome,
//! so the Transport contract is identical to the streaming implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;
use tokio_util::io::ReaderStream;

use lektio_core::constants::{UPLOAD_FILE_FIELD, UPLOAD_REQTYPE_FIELD, UPLOAD_REQTYPE_VALUE};
use lektio_core::models::FileHandle;

use crate::response;
use crate::traits::{ProgressFn, Transport, TransportError, TransportResult};

struct UploadJob {
    endpoint: String,
    file: FileHandle,
    // Arc rather than the boxed ProgressFn so the periodic ticker task can
    // share the callback with the job itself.
    on_progress: Arc<dyn Fn(u8) + Send + Sync>,
    result_tx: oneshot::Sender<TransportResult<String>>,
}

pub struct QueuedTransport {
    job_tx: mpsc::Sender<UploadJob>,
}

impl QueuedTransport {
    /// Create the transport and spawn its worker. Must be called from within
    /// a tokio runtime. The worker lives until the transport (and every
    /// clone of its sender) is dropped.
    pub fn new(progress_interval: Duration) -> Self {
        let (job_tx, mut job_rx) = mpsc::channel::<UploadJob>(32);

        tokio::spawn(async move {
            let client = reqwest::Client::new();
            tracing::info!("Upload queue worker started");
            while let Some(job) = job_rx.recv().await {
                let result = Self::run_job(&client, &job, progress_interval).await;
                if job.result_tx.send(result).is_err() {
                    tracing::warn!(
                        file = job.file.file_name(),
                        "Upload finished but the submitter is gone"
                    );
                }
            }
            tracing::info!("Upload queue worker stopped");
        });

        Self { job_tx }
    }

    async fn run_job(
        client: &reqwest::Client,
        job: &UploadJob,
        progress_interval: Duration,
    ) -> TransportResult<String> {
        let total = job.file.size_bytes;
        let source = tokio::fs::File::open(job.file.local_path()).await?;

        let sent = Arc::new(AtomicU64::new(0));
        let counter = sent.clone();
        let counted = ReaderStream::new(source).map(move |chunk| {
            if let Ok(ref bytes) = chunk {
                counter.fetch_add(bytes.len() as u64, Ordering::Relaxed);
            }
            chunk
        });

        // Periodic reporter: snapshots the byte counter on a fixed interval
        // instead of observing individual chunks.
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let tick_sent = sent.clone();
        let tick_progress = job.on_progress.clone();
        let ticker = tokio::spawn(async move {
            let mut interval = tokio::time::interval(progress_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut last = 0u8;
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = interval.tick() => {
                        if total > 0 {
                            let percent =
                                ((tick_sent.load(Ordering::Relaxed) * 100) / total).min(100) as u8;
                            if percent > last {
                                last = percent;
                                tick_progress(percent);
                            }
                        }
                    }
                }
            }
        });

        let part = multipart::Part::stream_with_length(reqwest::Body::wrap_stream(counted), total)
            .file_name(job.file.file_name().to_string())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new()
            .text(UPLOAD_REQTYPE_FIELD, UPLOAD_REQTYPE_VALUE)
            .part(UPLOAD_FILE_FIELD, part);

        tracing::debug!(
            endpoint = %job.endpoint,
            size_bytes = total,
            file = job.file.file_name(),
            "Starting queued upload"
        );

        let outcome = match client.post(&job.endpoint).multipart(form).send().await {
            Ok(resp) => response::read_outcome(resp).await,
            Err(e) => Err(e.into()),
        };

        let _ = stop_tx.send(());
        let _ = ticker.await;

        // The ticker may miss the final bytes; guarantee the terminal tick.
        if outcome.is_ok() {
            (job.on_progress)(100);
        }

        outcome
    }
}

#[async_trait]
impl Transport for QueuedTransport {
    async fn send(
        &self,
        endpoint: &str,
        file: &FileHandle,
        on_progress: ProgressFn,
    ) -> TransportResult<String> {
        let (result_tx, result_rx) = oneshot::channel();
        let job = UploadJob {
            endpoint: endpoint.to_string(),
            file: file.clone(),
            on_progress: Arc::from(on_progress),
            result_tx,
        };
        self.job_tx
            .send(job)
            .await
            .map_err(|_| TransportError::QueueClosed)?;
        result_rx.await.map_err(|_| TransportError::QueueClosed)?
    }
}
