//! Request correlation IDs.
//!
//! A [`RequestContext`] is built per request from the inbound `X-Request-ID`
//! header or the body's `requestId` field (header wins) and threaded through
//! the handler as a value. Nothing is shared across requests, so concurrent
//! requests cannot overwrite each other's correlation ID.

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header used to propagate the correlation ID between hops.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request carrier for the correlation identifier.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    current: Option<String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the context from an inbound request. The `X-Request-ID` header
    /// takes precedence over a `requestId` field in the body.
    pub fn from_parts(headers: &HeaderMap, body_id: Option<&str>) -> Self {
        let header_id = headers
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string);

        Self {
            current: header_id.or_else(|| {
                body_id.filter(|v| !v.is_empty()).map(str::to_string)
            }),
        }
    }

    /// Current identifier, generating and storing a new UUID v4 if none is
    /// set yet.
    pub fn get(&mut self) -> String {
        self.current
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone()
    }

    /// Overwrite the current identifier.
    pub fn set(&mut self, id: impl Into<String>) {
        self.current = Some(id.into());
    }

    /// Clear the current identifier; the next `get` generates a fresh one.
    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_get_generates_once() {
        let mut ctx = RequestContext::new();
        let first = ctx.get();
        let second = ctx.get();
        assert_eq!(first, second);
        assert_eq!(first.len(), 36);
    }

    #[test]
    fn test_header_takes_precedence_over_body() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("from-header"));

        let mut ctx = RequestContext::from_parts(&headers, Some("from-body"));
        assert_eq!(ctx.get(), "from-header");
    }

    #[test]
    fn test_body_id_used_when_header_absent() {
        let mut ctx = RequestContext::from_parts(&HeaderMap::new(), Some("from-body"));
        assert_eq!(ctx.get(), "from-body");
    }

    #[test]
    fn test_set_and_reset() {
        let mut ctx = RequestContext::new();
        ctx.set("fixed-id");
        assert_eq!(ctx.get(), "fixed-id");

        ctx.reset();
        let generated = ctx.get();
        assert_ne!(generated, "fixed-id");
    }
}
