//! Middleware service: passes the text through to the configured receiver
//! and wraps the receiver's result.

use crate::downstream::forward_text;
use crate::error::{error_type_name, AppError};
use crate::handlers::ChainState;
use crate::metrics;
use crate::request_id::RequestContext;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRequest {
    pub text: Option<String>,
    pub request_id: Option<String>,
}

/// POST /process
pub async fn process(
    State(state): State<ChainState>,
    headers: HeaderMap,
    Json(body): Json<ProcessRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ctx = RequestContext::from_parts(&headers, body.request_id.as_deref());
    let request_id = ctx.get();

    state
        .emitter
        .info("Received text for processing", None, Some(request_id.clone()));

    let Some(text) = body.text.filter(|t| !t.is_empty()) else {
        return Err(fail(
            &state,
            &request_id,
            AppError::Validation("Missing required parameter: text".to_string()),
        ));
    };

    let receiver_url = state.config.load().active_endpoints().receiver.clone();
    state.emitter.debug(
        "Forwarding text to receiver",
        Some(json!({ "receiver": &receiver_url })),
        Some(request_id.clone()),
    );
    metrics::record_forward("middleware");

    match forward_text(&state.http_client, &receiver_url, &text, &request_id).await {
        Ok(downstream) => {
            let processed = downstream.get("result").cloned().unwrap_or(Value::Null);
            state.emitter.info(
                "Text processed through middleware",
                Some(json!({ "processed": &processed })),
                Some(request_id),
            );
            Ok(Json(json!({
                "original": text,
                "processed": processed,
                "message": "Text processed through middleware",
            })))
        }
        Err(err) => Err(fail(&state, &request_id, err)),
    }
}

fn fail(state: &ChainState, request_id: &str, err: AppError) -> AppError {
    metrics::record_error("middleware", error_type_name(&err));
    state.emitter.error(
        format!("Processing failed in middleware: {err}"),
        None,
        Some(request_id.to_string()),
    );
    err
}
