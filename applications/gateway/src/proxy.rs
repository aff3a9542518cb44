//! Reverse proxy for the backend-origin path prefix.
//!
//! The prefixed path is forwarded as-is (prefix included) to the
//! configured origin. Cookies and auth flow through untouched; hop-by-hop
//! headers do not. Upstream failures of any kind collapse to a JSON 502.

use crate::state::AppState;
use axum::body::{to_bytes, Body};
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::error::{GatewayError, Result};

/// Largest request body the proxy will buffer.
const MAX_PROXY_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Forward one request to the backend origin.
pub async fn forward(State(state): State<Arc<AppState>>, request: Request) -> Response {
    match forward_inner(&state, request).await {
        Ok(response) => response,
        Err(err) => {
            error!(error = %err, "Proxy error");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "message": "Upstream unavailable" })),
            )
                .into_response()
        }
    }
}

async fn forward_inner(state: &AppState, request: Request) -> Result<Response> {
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    let target = state.config.proxy.target.trim_end_matches('/');
    let upstream_url = format!("{target}{path_and_query}");

    debug!(url = %upstream_url, method = %request.method(), "Forwarding to upstream");

    let method = reqwest::Method::from_bytes(request.method().as_str().as_bytes())
        .map_err(|e| GatewayError::Proxy(e.to_string()))?;

    // Snapshot the headers before the body consumes the request.
    let headers: Vec<(String, Vec<u8>)> = request
        .headers()
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name.as_str()))
        .map(|(name, value)| (name.as_str().to_string(), value.as_bytes().to_vec()))
        .collect();

    let body = to_bytes(request.into_body(), MAX_PROXY_BODY_BYTES)
        .await
        .map_err(|e| GatewayError::Proxy(e.to_string()))?;

    let mut upstream_request = state
        .http
        .request(method, &upstream_url)
        .timeout(Duration::from_secs(state.config.proxy.timeout_secs));
    for (name, value) in headers {
        let name = reqwest::header::HeaderName::from_bytes(name.as_bytes());
        let value = reqwest::header::HeaderValue::from_bytes(&value);
        if let (Ok(name), Ok(value)) = (name, value) {
            upstream_request = upstream_request.header(name, value);
        }
    }
    if !body.is_empty() {
        upstream_request = upstream_request.body(body.to_vec());
    }

    let upstream_response = upstream_request.send().await?;

    let status = StatusCode::from_u16(upstream_response.status().as_u16())
        .map_err(|e| GatewayError::Proxy(e.to_string()))?;
    let mut builder = Response::builder().status(status);
    for (name, value) in upstream_response.headers() {
        if is_hop_by_hop(name.as_str()) {
            continue;
        }
        let name = HeaderName::from_bytes(name.as_str().as_bytes());
        let value = HeaderValue::from_bytes(value.as_bytes());
        if let (Ok(name), Ok(value)) = (name, value) {
            builder = builder.header(name, value);
        }
    }

    let bytes = upstream_response.bytes().await?;
    builder
        .body(Body::from(bytes))
        .map_err(|e| GatewayError::Proxy(e.to_string()))
}

/// Headers that must not cross the proxy boundary in either direction.
fn is_hop_by_hop(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailers"
            | "transfer-encoding"
            | "upgrade"
            | "host"
            | "content-length"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_by_hop_headers_are_filtered() {
        assert!(is_hop_by_hop("Connection"));
        assert!(is_hop_by_hop("host"));
        assert!(is_hop_by_hop("Transfer-Encoding"));
        assert!(!is_hop_by_hop("cookie"));
        assert!(!is_hop_by_hop("content-type"));
        assert!(!is_hop_by_hop("authorization"));
    }
}
