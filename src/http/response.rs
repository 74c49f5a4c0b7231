//! Response handling and transformation.
//!
//! # Responsibilities
//! - Tag forwarded origin responses with `x-proxied-by`
//! - Map forwarding failures to the fixed 502 response
//!
//! # Design Decisions
//! - Origin status, headers and body pass through untouched otherwise
//! - Every failure class yields the same response shape

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;

use crate::proxy::ForwardError;

pub const X_PROXIED_BY: HeaderName = HeaderName::from_static("x-proxied-by");
pub const PROXIED_BY: &str = "cloudflare-worker";

/// Prefix of every forwarding failure body.
pub const PROXY_ERROR_PREFIX: &str = "Proxy error: ";

/// Relay an origin response, overwriting any `x-proxied-by` it carried.
pub fn relay(mut response: Response<Body>) -> Response<Body> {
    response
        .headers_mut()
        .insert(X_PROXIED_BY, HeaderValue::from_static(PROXIED_BY));
    response
}

/// The 502 sent when the origin could not be reached.
pub fn proxy_error(err: &ForwardError) -> Response<Body> {
    (
        StatusCode::BAD_GATEWAY,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        format!("{PROXY_ERROR_PREFIX}{err}"),
    )
        .into_response()
}
