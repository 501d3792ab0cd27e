//! Streaming multipart transport with byte-level progress.
//!
//! Wraps the local file in a chunked stream, counts bytes as reqwest pulls
//! them through the request body, and fires the progress callback on every
//! whole-percent advance. Suited to hosts where per-chunk observation of the
//! outgoing body is available.

use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::multipart;
use tokio_util::io::ReaderStream;

use lektio_core::constants::{UPLOAD_FILE_FIELD, UPLOAD_REQTYPE_FIELD, UPLOAD_REQTYPE_VALUE};
use lektio_core::models::FileHandle;

use crate::response;
use crate::traits::{ProgressFn, Transport, TransportResult};

pub struct StreamingTransport {
    client: reqwest::Client,
}

impl StreamingTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for StreamingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for StreamingTransport {
    async fn send(
        &self,
        endpoint: &str,
        file: &FileHandle,
        on_progress: ProgressFn,
    ) -> TransportResult<String> {
        let total = file.size_bytes;
        let source = tokio::fs::File::open(file.local_path()).await?;

        let on_progress = Arc::new(on_progress);
        let sent = AtomicU64::new(0);
        let last_reported = Arc::new(AtomicU8::new(0));

        let progress = on_progress.clone();
        let reported = last_reported.clone();
        let counted = ReaderStream::new(source).map(move |chunk| {
            if let Ok(ref bytes) = chunk {
                let done = sent.fetch_add(bytes.len() as u64, Ordering::Relaxed)
                    + bytes.len() as u64;
                if total > 0 {
                    let percent = ((done * 100) / total).min(100) as u8;
                    // Chunks arrive sequentially, so percent never regresses;
                    // only whole-percent advances are reported.
                    let previous = reported.swap(percent, Ordering::Relaxed);
                    if percent > previous {
                        progress(percent);
                    }
                }
            }
            chunk
        });

        let part = multipart::Part::stream_with_length(reqwest::Body::wrap_stream(counted), total)
            .file_name(file.file_name().to_string())
            .mime_str("application/octet-stream")?;
        let form = multipart::Form::new()
            .text(UPLOAD_REQTYPE_FIELD, UPLOAD_REQTYPE_VALUE)
            .part(UPLOAD_FILE_FIELD, part);

        tracing::debug!(
            endpoint = endpoint,
            size_bytes = total,
            file = file.file_name(),
            "Starting streaming upload"
        );

        let resp = self.client.post(endpoint).multipart(form).send().await?;
        let outcome = response::read_outcome(resp).await;

        // Zero-length files and rounding can finish without a 100% tick.
        if outcome.is_ok() && last_reported.load(Ordering::Relaxed) < 100 {
            on_progress(100);
        }

        outcome
    }
}
