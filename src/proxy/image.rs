//! Image pass-through with client-side caching.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use log::{debug, warn};

use super::ProxyState;

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// Fetches an image from the backend and re-emits it with a day-long
/// client cache. Upstream error statuses pass through unchanged, so a
/// missing image stays a 404 and a backend fault stays a 5xx.
#[tracing::instrument(skip(state))]
pub async fn forward_image(State(state): State<ProxyState>, Path(path): Path<String>) -> Response {
    let url = format!("{}/images/{}", state.upstream, path);
    debug!("Fetching image from {}", url);

    let upstream = match state.client.get(&url).send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            warn!("Image fetch from {} failed: {}", url, e);
            return (StatusCode::BAD_GATEWAY, "Failed to fetch image from backend")
                .into_response();
        }
    };

    let status = upstream.status();
    if !status.is_success() {
        warn!("Backend returned {} for image {}", status, path);
        let reason = status.canonical_reason().unwrap_or("Upstream error");
        return (status, reason).into_response();
    }

    let content_type = upstream.headers().get(CONTENT_TYPE).cloned();

    match upstream.bytes().await {
        Ok(bytes) => {
            let mut response = Response::new(Body::from(bytes));
            if let Some(content_type) = content_type {
                response.headers_mut().insert(CONTENT_TYPE, content_type);
            }
            response
                .headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static(IMAGE_CACHE_CONTROL));
            response
        }
        Err(e) => {
            warn!("Image body read from {} failed: {}", url, e);
            (StatusCode::BAD_GATEWAY, "Failed to fetch image from backend").into_response()
        }
    }
}
