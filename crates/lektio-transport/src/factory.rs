//! Construction-time transport selection (strategy pattern).

use std::sync::Arc;
use std::time::Duration;

use lektio_core::{Config, TransportKind};

use crate::{QueuedTransport, StreamingTransport, Transport};

/// Create the transport the configuration names.
///
/// The choice is made exactly once here; nothing downstream branches on the
/// execution environment again. Must be called from within a tokio runtime
/// (the queued transport spawns its worker immediately).
pub fn create_transport(config: &Config) -> Arc<dyn Transport> {
    match config.transport {
        TransportKind::Streaming => Arc::new(StreamingTransport::new()),
        TransportKind::Queued => Arc::new(QueuedTransport::new(Duration::from_millis(
            config.queue_progress_interval_ms,
        ))),
    }
}
