//! Generic forwarder for API requests.

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::{Path, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use log::{debug, warn};

use super::ProxyState;

/// Largest request body the forwarder will buffer, resume uploads
/// included.
const MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Forwards an API request to the backend, preserving method, path,
/// query and body. Upstream HTTP errors are relayed as-is; only a
/// network-level failure produces the local error envelope.
#[tracing::instrument(skip(state, request))]
pub async fn forward_api(
    State(state): State<ProxyState>,
    Path(path): Path<String>,
    request: Request,
) -> Response {
    let method = request.method().clone();
    let has_body = if method == Method::GET || method == Method::DELETE {
        false
    } else if method == Method::POST || method == Method::PUT || method == Method::PATCH {
        true
    } else {
        // OPTIONS never reaches here; the CORS middleware answers
        // preflights before routing.
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let query = request.uri().query().map(str::to_string);
    let (parts, body) = request.into_parts();

    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer request body for /api/{}: {}", path, e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let mut url = format!("{}/{}", state.upstream, path);
    if let Some(query) = &query {
        url.push('?');
        url.push_str(query);
    }
    debug!("Forwarding {} /api/{} to {}", method, path, url);

    let mut headers = forwardable_request_headers(&parts.headers);
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    let mut upstream_request = state.client.request(method, &url).headers(headers);
    if has_body {
        upstream_request = upstream_request.body(body_bytes);
    }

    match upstream_request.send().await {
        Ok(upstream) => relay(upstream).await,
        Err(e) => upstream_failure(&e),
    }
}

/// Forwards the multipart job-application POST without touching the body
/// or its content-type boundary.
#[tracing::instrument(skip(state, request))]
pub async fn forward_application(State(state): State<ProxyState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();

    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to buffer application body: {}", e);
            return StatusCode::PAYLOAD_TOO_LARGE.into_response();
        }
    };

    let url = format!("{}/careers/applications/", state.upstream);
    debug!("Forwarding job application to {}", url);

    let headers = forwardable_request_headers(&parts.headers);

    let sent = state
        .client
        .post(&url)
        .headers(headers)
        .body(body_bytes)
        .send()
        .await;

    match sent {
        Ok(upstream) => relay(upstream).await,
        Err(e) => upstream_failure(&e),
    }
}

/// Relays the upstream response with its status and headers, minus
/// hop-by-hop headers the local server manages itself.
async fn relay(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = relayable_response_headers(upstream.headers());

    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            *response.status_mut() = status;
            *response.headers_mut() = headers;
            response
        }
        Err(e) => upstream_failure(&e),
    }
}

/// Fixed JSON envelope for network-level upstream failures.
fn upstream_failure(error: &reqwest::Error) -> Response {
    warn!("Upstream request failed: {}", error);
    let body = Json(serde_json::json!({
        "error": "Upstream request failed",
        "message": error.to_string(),
        "timestamp": Utc::now().to_rfc3339(),
    }));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

fn forwardable_request_headers(headers: &HeaderMap) -> HeaderMap {
    let mut forwarded = HeaderMap::new();
    for (name, value) in headers {
        if should_forward(name) {
            forwarded.append(name.clone(), value.clone());
        }
    }
    forwarded
}

/// The proxy speaks for itself on `host` and connection management, and
/// never leaks `x-forwarded-*` chains to the backend.
fn should_forward(name: &HeaderName) -> bool {
    let name = name.as_str();
    name != "host"
        && name != "connection"
        && name != "content-length"
        && !name.starts_with("x-forwarded-")
}

fn relayable_response_headers(headers: &HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::new();
    for (name, value) in headers {
        let name_str = name.as_str();
        if name_str != "connection" && name_str != "transfer-encoding" && name_str != "content-length"
        {
            relayed.append(name.clone(), value.clone());
        }
    }
    relayed
}
