//! The edge proxy: asset short-circuit, then forward to the origin.
//!
//! # Request Flow
//! ```text
//! inbound request
//!     → asset store (optional)  ── hit ──▶ asset response
//!     │ miss / lookup error
//!     → ForwardRequest (origin + path + query, verbatim headers, buffered body)
//!     → Upstream::forward ── error ──▶ 502 "Proxy error: …"
//!     → origin response + x-proxied-by
//! ```
//!
//! Each call to [`EdgeProxy::handle`] is independent; the proxy holds only
//! immutable configuration and shared clients.

mod error;
pub mod upstream;

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::{request::Parts, Request, Response, StatusCode};

use crate::assets::AssetStore;
use crate::http::request::{ForwardRequest, OriginUrl};
use crate::http::response;
use crate::observability::metrics::{self, Outcome};

pub use error::ForwardError;
pub use upstream::{HttpUpstream, Upstream};

/// Result of consulting the asset store.
#[derive(Debug)]
pub enum AssetOutcome {
    /// Serve this response without contacting the origin.
    Hit(Response<Body>),
    /// Forward to the origin.
    Miss,
}

pub struct EdgeProxy {
    origin: OriginUrl,
    upstream: Arc<dyn Upstream>,
    assets: Option<Arc<dyn AssetStore>>,
    body_limit: usize,
}

impl EdgeProxy {
    pub fn new(origin: OriginUrl, upstream: Arc<dyn Upstream>) -> Self {
        Self {
            origin,
            upstream,
            assets: None,
            body_limit: usize::MAX,
        }
    }

    pub fn with_assets(mut self, assets: Arc<dyn AssetStore>) -> Self {
        self.assets = Some(assets);
        self
    }

    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Handle one inbound request. Never fails; failures become a 502.
    pub async fn handle(&self, request: Request<Body>) -> Response<Body> {
        let start = Instant::now();
        let (parts, body) = request.into_parts();

        if let AssetOutcome::Hit(asset) = self.lookup_asset(&parts).await {
            tracing::debug!(path = %parts.uri.path(), status = %asset.status(), "Served from assets");
            metrics::record_request(Outcome::Asset, asset.status().as_u16(), start);
            return asset;
        }

        match self.forward(parts, body).await {
            Ok(origin_response) => {
                metrics::record_request(Outcome::Forwarded, origin_response.status().as_u16(), start);
                response::relay(origin_response)
            }
            Err(e) => {
                tracing::error!(origin = %self.origin, error = %e, "Forwarding failed");
                metrics::record_request(Outcome::Error, StatusCode::BAD_GATEWAY.as_u16(), start);
                response::proxy_error(&e)
            }
        }
    }

    /// Consult the asset store. Lookup failures are logged and treated as a miss.
    pub async fn lookup_asset(&self, head: &Parts) -> AssetOutcome {
        let Some(assets) = &self.assets else {
            return AssetOutcome::Miss;
        };

        match assets.lookup(head).await {
            Ok(response) if response.status() != StatusCode::NOT_FOUND => AssetOutcome::Hit(response),
            Ok(_) => AssetOutcome::Miss,
            Err(e) => {
                tracing::warn!(path = %head.uri.path(), error = %e, "Asset lookup failed, forwarding to origin");
                metrics::record_asset_lookup_failure();
                AssetOutcome::Miss
            }
        }
    }

    async fn forward(&self, parts: Parts, body: Body) -> Result<Response<Body>, ForwardError> {
        let request = ForwardRequest::from_parts(&self.origin, parts, body, self.body_limit).await?;

        tracing::debug!(
            method = %request.method,
            target = %request.target,
            body_bytes = request.body.as_ref().map_or(0, |b| b.len()),
            "Forwarding request"
        );

        self.upstream.forward(request).await
    }
}
