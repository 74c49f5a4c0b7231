//! Static asset lookup.
//!
//! The proxy asks an [`AssetStore`] before contacting the origin. Any
//! response other than 404 is served as-is; 404 or an error falls through.

pub mod static_dir;

use axum::body::Body;
use axum::http::{request::Parts, Response, StatusCode};
use futures_util::future::BoxFuture;

pub use static_dir::StaticAssets;

/// A lookup that could not be answered.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset store answered {0}")]
    Unavailable(StatusCode),

    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

/// Source of locally served responses, consulted with the request head only.
pub trait AssetStore: Send + Sync + 'static {
    fn lookup<'a>(&'a self, head: &'a Parts) -> BoxFuture<'a, Result<Response<Body>, AssetError>>;
}
