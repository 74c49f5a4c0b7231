//! Directory-backed asset store.

use std::path::PathBuf;

use axum::body::Body;
use axum::http::{request::Parts, Method, Request, Response, StatusCode};
use axum::response::IntoResponse;
use futures_util::future::BoxFuture;
use tower::ServiceExt;
use tower_http::services::ServeDir;

use crate::assets::{AssetError, AssetStore};

/// Serves files under `root` for GET and HEAD.
///
/// Directories are not listed and have no index file, so `/species` on the
/// origin is never shadowed by a `species/` folder.
#[derive(Debug, Clone)]
pub struct StaticAssets {
    service: ServeDir,
}

impl StaticAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let service = ServeDir::new(root.into()).append_index_html_on_directories(false);
        Self { service }
    }

    async fn serve(&self, head: &Parts) -> Result<Response<Body>, AssetError> {
        if head.method != Method::GET && head.method != Method::HEAD {
            return Ok(StatusCode::NOT_FOUND.into_response());
        }

        let mut request = Request::new(Body::empty());
        *request.method_mut() = head.method.clone();
        *request.uri_mut() = head.uri.clone();
        *request.version_mut() = head.version;
        *request.headers_mut() = head.headers.clone();

        let response = match self.service.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if response.status().is_server_error() {
            return Err(AssetError::Unavailable(response.status()));
        }

        Ok(response.map(Body::new))
    }
}

impl AssetStore for StaticAssets {
    fn lookup<'a>(&'a self, head: &'a Parts) -> BoxFuture<'a, Result<Response<Body>, AssetError>> {
        Box::pin(self.serve(head))
    }
}
