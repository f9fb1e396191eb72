//! Sender service: entry point of the chain.
//!
//! Accepts {text, destination} and forwards the text to the caller-supplied
//! destination, returning the downstream body unchanged.

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
pub struct ForwardRequest {
    pub text: Option<String>,
    pub destination: Option<String>,
    pub request_id: Option<String>,
}

/// POST /forward
pub async fn forward(
    State(state): State<ChainState>,
    headers: HeaderMap,
    Json(body): Json<ForwardRequest>,
) -> Result<Json<Value>, AppError> {
    let mut ctx = RequestContext::from_parts(&headers, body.request_id.as_deref());
    let request_id = ctx.get();

    state.emitter.info(
        "Received forward request",
        Some(json!({ "destination": &body.destination })),
        Some(request_id.clone()),
    );

    let Some(text) = body.text.filter(|t| !t.is_empty()) else {
        return Err(fail(
            &state,
            &request_id,
            AppError::Validation("Missing required parameter: text".to_string()),
        ));
    };
    let Some(destination) = body.destination.filter(|d| !d.is_empty()) else {
        return Err(fail(
            &state,
            &request_id,
            AppError::Validation("Missing required parameter: destination".to_string()),
        ));
    };

    state.emitter.debug(
        "Forwarding text to destination",
        Some(json!({ "destination": &destination })),
        Some(request_id.clone()),
    );
    metrics::record_forward("sender");

    match forward_text(&state.http_client, &destination, &text, &request_id).await {
        Ok(downstream) => {
            state.emitter.debug(
                "Destination responded",
                Some(json!({ "response": &downstream })),
                Some(request_id.clone()),
            );
            state
                .emitter
                .info("Forward request completed", None, Some(request_id));
            Ok(Json(downstream))
        }
        Err(err) => Err(fail(&state, &request_id, err)),
    }
}

/// Log the failed outcome, count it, and hand the error back for the
/// response mapping.
fn fail(state: &ChainState, request_id: &str, err: AppError) -> AppError {
    metrics::record_error("sender", error_type_name(&err));
    state.emitter.error(
        format!("Forward request failed: {err}"),
        None,
        Some(request_id.to_string()),
    );
    err
}
