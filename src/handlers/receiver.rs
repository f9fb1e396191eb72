//! Receiver service: terminal hop, reverses the text.

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

/// Reverse the character sequence of the text.
pub fn reverse_text(text: &str) -> String {
    text.chars().rev().collect()
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
        .info("Received text to reverse", None, Some(request_id.clone()));

    let Some(text) = body.text.filter(|t| !t.is_empty()) else {
        let err = AppError::Validation("Missing required parameter: text".to_string());
        metrics::record_error("receiver", error_type_name(&err));
        state.emitter.error(
            format!("Reversal failed: {err}"),
            None,
            Some(request_id),
        );
        return Err(err);
    };

    let reversed = reverse_text(&text);
    state.emitter.info(
        "Reversed text, returning result",
        Some(json!({ "reversed": &reversed })),
        Some(request_id),
    );

    Ok(Json(json!({ "result": reversed })))
}
