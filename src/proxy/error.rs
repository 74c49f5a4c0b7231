//! The one failure kind on the request path.

use std::time::Duration;

use axum::http::uri::InvalidUri;

/// Anything that stopped a request from reaching the origin.
///
/// Every variant is answered with the same 502; the variants exist for logs.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    #[error("invalid target URL {target:?}: {source}")]
    InvalidTarget { target: String, source: InvalidUri },

    #[error("origin did not respond within {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}
