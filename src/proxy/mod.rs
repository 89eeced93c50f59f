//! Reverse proxy between the public site and the backend API.
//!
//! Browsers talk to this surface so the backend stays private. The
//! generic forwarder relays any API call, the dedicated applications
//! route preserves multipart resume uploads, and the image route adds
//! client-side caching.

mod cors;
mod forward;
mod image;

pub use cors::{ALLOW_HEADERS, ALLOW_METHODS, ALLOW_ORIGIN};

use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::middleware;
use axum::routing::{any, get, post};
use tower_http::trace::TraceLayer;

/// Shared state handed to every proxy handler.
#[derive(Clone)]
pub struct ProxyState {
    pub upstream: String,
    pub client: reqwest::Client,
}

impl ProxyState {
    pub fn new(upstream: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pharmgate/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build proxy HTTP client")?;

        Ok(Self {
            upstream: upstream.trim_end_matches('/').to_string(),
            client,
        })
    }
}

/// Builds the proxy router. Static routes win over the `/api` wildcard,
/// so the applications route takes the multipart path.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/careers/applications",
            post(forward::forward_application),
        )
        .route("/api/*path", any(forward::forward_api))
        .route("/images/*path", get(image::forward_image))
        .layer(middleware::from_fn(cors::apply_cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
