//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the catch-all proxy handler
//! - Wire up middleware (request tracing)
//! - Build the edge proxy from configuration
//! - Serve on a listener until shutdown

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::assets::StaticAssets;
use crate::config::ProxyConfig;
use crate::http::request::{OriginError, OriginUrl};
use crate::observability::logging::request_span;
use crate::proxy::{EdgeProxy, HttpUpstream};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<EdgeProxy>,
}

/// Failure to assemble the server from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("no origin configured")]
    MissingOrigin,

    #[error("invalid origin: {0}")]
    Origin(#[from] OriginError),

    #[error("failed to build upstream TLS config: {0}")]
    Tls(#[from] rustls::Error),
}

/// HTTP server for the edge proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, ServerError> {
        let raw = config.origin.url.as_deref().ok_or(ServerError::MissingOrigin)?;
        let origin = OriginUrl::parse(raw)?;

        let upstream = Arc::new(HttpUpstream::new(&config.timeouts)?);
        let mut proxy =
            EdgeProxy::new(origin, upstream).with_body_limit(config.limits.body_limit());

        if let Some(dir) = &config.assets.dir {
            tracing::info!(dir = %dir.display(), "Serving static assets");
            proxy = proxy.with_assets(Arc::new(StaticAssets::new(dir)));
        }

        Ok(Self::with_proxy(config, proxy))
    }

    /// Create a server around an already assembled proxy.
    pub fn with_proxy(config: ProxyConfig, proxy: EdgeProxy) -> Self {
        let router = build_router(Arc::new(proxy));
        Self { router, config }
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            origin = self.config.origin.url.as_deref().unwrap_or_default(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Every method on every path goes to the proxy handler.
pub fn build_router(proxy: Arc<EdgeProxy>) -> Router {
    Router::new()
        .route("/{*path}", any(proxy_handler))
        .route("/", any(proxy_handler))
        .with_state(AppState { proxy })
        .layer(TraceLayer::new_for_http().make_span_with(request_span))
}

async fn proxy_handler(State(state): State<AppState>, request: Request) -> Response {
    state.proxy.handle(request).await
}
