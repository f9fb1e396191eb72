//! Fire-and-forget log shipping to the collector.
//!
//! `emit` pushes a record into a bounded channel and returns immediately; a
//! background task drains the channel and POSTs each record to the
//! collector's ingestion endpoint. Every failure mode (queue full, connect
//! error, non-2xx response) downgrades to local console output. Emission
//! never blocks or fails the caller's request path.

use crate::record::{now_rfc3339, LogLevel, LogRecord, ServiceName};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Default depth of the emission channel.
pub const DEFAULT_QUEUE_DEPTH: usize = 256;

/// Handle for emitting log records from one service.
///
/// Cheap to clone; all clones feed the same background drain task.
#[derive(Clone)]
pub struct LogEmitter {
    service: ServiceName,
    tx: mpsc::Sender<LogRecord>,
}

impl LogEmitter {
    /// Spawn the background drain task and return the emitter handle.
    pub fn spawn(
        service: ServiceName,
        collector_url: String,
        client: reqwest::Client,
        queue_depth: usize,
    ) -> Self {
        let (tx, rx) = mpsc::channel(queue_depth);
        tokio::spawn(drain_task(collector_url, client, rx));
        Self { service, tx }
    }

    /// Queue a record for shipping. On backpressure the record is dropped
    /// to local output instead of blocking.
    pub fn emit(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        metadata: Option<Value>,
        request_id: Option<String>,
    ) {
        let record = LogRecord {
            service: self.service,
            level,
            message: message.into(),
            timestamp: now_rfc3339(),
            request_id,
            metadata,
        };

        if let Err(err) = self.tx.try_send(record) {
            let record = match err {
                TrySendError::Full(record) | TrySendError::Closed(record) => record,
            };
            log_locally(&record);
        }
    }

    pub fn info(
        &self,
        message: impl Into<String>,
        metadata: Option<Value>,
        request_id: Option<String>,
    ) {
        self.emit(LogLevel::Info, message, metadata, request_id);
    }

    pub fn warn(
        &self,
        message: impl Into<String>,
        metadata: Option<Value>,
        request_id: Option<String>,
    ) {
        self.emit(LogLevel::Warn, message, metadata, request_id);
    }

    pub fn error(
        &self,
        message: impl Into<String>,
        metadata: Option<Value>,
        request_id: Option<String>,
    ) {
        self.emit(LogLevel::Error, message, metadata, request_id);
    }

    pub fn debug(
        &self,
        message: impl Into<String>,
        metadata: Option<Value>,
        request_id: Option<String>,
    ) {
        self.emit(LogLevel::Debug, message, metadata, request_id);
    }
}

/// Background task: ship queued records to the collector, one at a time.
/// Transport failures are swallowed; the record stays visible locally.
async fn drain_task(
    collector_url: String,
    client: reqwest::Client,
    mut rx: mpsc::Receiver<LogRecord>,
) {
    while let Some(record) = rx.recv().await {
        match client.post(&collector_url).json(&record).send().await {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => {
                tracing::warn!(
                    status = %response.status(),
                    "log collector rejected record, keeping it local"
                );
                log_locally(&record);
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to reach log collector");
                log_locally(&record);
            }
        }
    }
}

/// Console fallback when the collector cannot take the record.
fn log_locally(record: &LogRecord) {
    let request_id = record.request_id.as_deref().unwrap_or("-");
    match record.level {
        LogLevel::Info => tracing::info!(
            service = %record.service,
            request_id = %request_id,
            "{}",
            record.message
        ),
        LogLevel::Warn => tracing::warn!(
            service = %record.service,
            request_id = %request_id,
            "{}",
            record.message
        ),
        LogLevel::Error => tracing::error!(
            service = %record.service,
            request_id = %request_id,
            "{}",
            record.message
        ),
        LogLevel::Debug => tracing::debug!(
            service = %record.service,
            request_id = %request_id,
            "{}",
            record.message
        ),
    }
}
