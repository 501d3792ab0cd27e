//! Configuration module
//!
//! Environment-driven configuration for the upload pipeline. All values have
//! working defaults so an embedding process can construct the pipeline with
//! `Config::default()` and only override what it needs.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_QUEUE_PROGRESS_INTERVAL_MS, DEFAULT_UPLOAD_ENDPOINT, MAX_UPLOAD_BYTES,
};

/// Which transport implementation the factory constructs.
///
/// Selection happens once, at construction time; the orchestrator never
/// branches on the execution environment itself.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Streaming multipart POST with byte-level progress events.
    Streaming,
    /// Background upload queue fed by local file paths, with periodic
    /// progress callbacks.
    Queued,
}

impl Display for TransportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            TransportKind::Streaming => write!(f, "streaming"),
            TransportKind::Queued => write!(f, "queued"),
        }
    }
}

impl FromStr for TransportKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "streaming" => Ok(TransportKind::Streaming),
            "queued" => Ok(TransportKind::Queued),
            _ => Err(anyhow::anyhow!("Invalid transport kind: {}", s)),
        }
    }
}

/// Upload pipeline configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fixed HTTP destination accepting anonymous multipart uploads.
    pub upload_endpoint: String,
    /// Pre-flight ceiling on selected file size, in bytes.
    pub max_upload_bytes: u64,
    /// Transport implementation to construct.
    pub transport: TransportKind,
    /// Progress callback interval for the queued transport, in milliseconds.
    pub queue_progress_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            upload_endpoint: DEFAULT_UPLOAD_ENDPOINT.to_string(),
            max_upload_bytes: MAX_UPLOAD_BYTES,
            transport: TransportKind::Streaming,
            queue_progress_interval_ms: DEFAULT_QUEUE_PROGRESS_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Load configuration from the environment, falling back to defaults for
    /// anything unset. A `.env` file is honored when present.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Config::default();
        Ok(Self {
            upload_endpoint: env_var_or("LEKTIO_UPLOAD_ENDPOINT", defaults.upload_endpoint),
            max_upload_bytes: parse_env_var_or("LEKTIO_MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            transport: parse_env_var_or("LEKTIO_TRANSPORT", defaults.transport)?,
            queue_progress_interval_ms: parse_env_var_or(
                "LEKTIO_QUEUE_PROGRESS_INTERVAL_MS",
                defaults.queue_progress_interval_ms,
            )?,
        })
    }
}

fn env_var_or(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn parse_env_var_or<T>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
