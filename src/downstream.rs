//! One forward hop to the next service in the chain.

use crate::error::AppError;
use crate::request_id::REQUEST_ID_HEADER;
use reqwest::Client;
use serde_json::{json, Value};

/// POST the text to the next hop with the correlation ID propagated via
/// both the `X-Request-ID` header and the body.
///
/// A non-success status becomes [`AppError::Upstream`] carrying the
/// downstream status and (best-effort parsed) body. No retries.
pub async fn forward_text(
    client: &Client,
    url: &str,
    text: &str,
    request_id: &str,
) -> Result<Value, AppError> {
    let response = client
        .post(url)
        .header(REQUEST_ID_HEADER, request_id)
        .json(&json!({ "text": text, "requestId": request_id }))
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let details = response
            .json::<Value>()
            .await
            .unwrap_or_else(|_| json!({ "error": "Unknown error" }));
        return Err(AppError::Upstream { status, details });
    }

    Ok(response.json().await?)
}
