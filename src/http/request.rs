//! Request handling and transformation.
//!
//! # Responsibilities
//! - Hold the validated origin base URL
//! - Compose the upstream target from the inbound path and query
//! - Buffer the inbound body for methods that carry one
//!
//! # Design Decisions
//! - Target is plain string concatenation; the path is never decoded or normalized
//! - Headers travel verbatim, hop-by-hop and Host included
//! - GET/HEAD bodies are never polled

use axum::body::{Body, Bytes};
use axum::http::{request::Parts, HeaderMap, Method, Uri};
use url::Url;

use crate::proxy::ForwardError;

/// Host of the old fallback origin. Seeing it means nobody configured the proxy.
const PLACEHOLDER_HOST: &str = "example.com";

/// Why a string cannot be used as the origin base URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OriginError {
    #[error("{0}")]
    Parse(#[from] url::ParseError),

    #[error("scheme {0:?} is not http or https")]
    UnsupportedScheme(String),

    #[error("example.com is a placeholder, not an origin")]
    Placeholder,

    #[error("origin must not carry a query string or fragment")]
    QueryOrFragment,
}

/// Base URL of the origin with one trailing slash removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginUrl(String);

impl OriginUrl {
    pub fn parse(raw: &str) -> Result<Self, OriginError> {
        let raw = raw.trim();
        let parsed = Url::parse(raw)?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(OriginError::UnsupportedScheme(other.to_string())),
        }
        if parsed
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(PLACEHOLDER_HOST))
        {
            return Err(OriginError::Placeholder);
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(OriginError::QueryOrFragment);
        }

        let base = raw.strip_suffix('/').unwrap_or(raw);
        Ok(Self(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Origin base followed by the inbound path and query, byte for byte.
    pub fn target_for(&self, uri: &Uri) -> String {
        let path_and_query = uri.path_and_query().map_or("/", |pq| pq.as_str());
        format!("{}{}", self.0, path_and_query)
    }
}

impl std::fmt::Display for OriginUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the inbound body is read and sent upstream.
pub fn carries_body(method: &Method) -> bool {
    *method != Method::GET && *method != Method::HEAD
}

/// The outbound copy of one inbound request.
#[derive(Debug)]
pub struct ForwardRequest {
    pub method: Method,
    pub target: Uri,
    pub headers: HeaderMap,
    /// `None` for GET/HEAD.
    pub body: Option<Bytes>,
}

impl ForwardRequest {
    /// Build the outbound request, buffering the body in full when the method carries one.
    pub async fn from_parts(
        origin: &OriginUrl,
        parts: Parts,
        body: Body,
        body_limit: usize,
    ) -> Result<Self, ForwardError> {
        let target = origin.target_for(&parts.uri);
        let target = target
            .parse::<Uri>()
            .map_err(|source| ForwardError::InvalidTarget { target, source })?;

        let body = if carries_body(&parts.method) {
            let bytes = axum::body::to_bytes(body, body_limit)
                .await
                .map_err(ForwardError::Body)?;
            Some(bytes)
        } else {
            None
        };

        Ok(Self {
            method: parts.method,
            target,
            headers: parts.headers,
            body,
        })
    }
}
