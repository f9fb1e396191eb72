//! Collector service: log ingestion and queries.

use crate::error::AppError;
use crate::metrics;
use crate::record::{LogLevel, LogRecord, ServiceName};
use crate::store::{LogFilter, LogStore, DEFAULT_QUERY_LIMIT};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct CollectorState {
    pub store: Arc<RwLock<LogStore>>,
}

/// Raw ingestion body; every field is optional so that validation can
/// produce a 400 instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestRequest {
    pub service: Option<String>,
    pub level: Option<String>,
    pub message: Option<String>,
    pub timestamp: Option<String>,
    pub request_id: Option<String>,
    pub metadata: Option<Value>,
}

/// POST /log-ingest
pub async fn ingest(
    State(state): State<CollectorState>,
    Json(body): Json<IngestRequest>,
) -> Result<Json<Value>, AppError> {
    let record = validate_record(body)?;

    // Echo to the collector's own console, like every ingested record.
    tracing::info!(
        service = %record.service,
        level = %record.level,
        request_id = %record.request_id.as_deref().unwrap_or("-"),
        "{}",
        record.message
    );
    metrics::record_ingest(record.service.as_str(), record.level.as_str());

    state.store.write().await.append(record);

    Ok(Json(json!({ "success": true })))
}

fn validate_record(body: IngestRequest) -> Result<LogRecord, AppError> {
    let service = required(body.service, "service")?;
    let service: ServiceName = service
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown service: {service}")))?;

    let level = required(body.level, "level")?;
    let level: LogLevel = level
        .parse()
        .map_err(|_| AppError::Validation(format!("Unknown level: {level}")))?;

    let message = required(body.message, "message")?;
    let timestamp = required(body.timestamp, "timestamp")?;

    Ok(LogRecord {
        service,
        level,
        message,
        timestamp,
        request_id: body.request_id,
        metadata: body.metadata,
    })
}

fn required(field: Option<String>, name: &str) -> Result<String, AppError> {
    field
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(format!("Missing required parameter: {name}")))
}

#[derive(Debug, Deserialize)]
pub struct LogQueryParams {
    pub service: Option<String>,
    pub level: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

#[derive(Debug, Serialize)]
pub struct LogQueryResponse {
    pub logs: Vec<LogRecord>,
    pub total: usize,
    pub filtered: bool,
}

/// GET /log-query?service=&level=&limit=
pub async fn query(
    State(state): State<CollectorState>,
    Query(params): Query<LogQueryParams>,
) -> Result<Json<LogQueryResponse>, AppError> {
    // An empty query value means "no filter", not "match the empty string".
    let filter = LogFilter {
        service: params.service.filter(|s| !s.is_empty()),
        level: params.level.filter(|l| !l.is_empty()),
        limit: Some(params.limit),
    };

    let outcome = state.store.read().await.query(&filter);

    Ok(Json(LogQueryResponse {
        logs: outcome.logs,
        total: outcome.total,
        filtered: outcome.filtered,
    }))
}
