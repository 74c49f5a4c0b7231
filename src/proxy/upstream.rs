//! Upstream client.
//!
//! # Responsibilities
//! - Send one forwarded request to the origin
//! - Relay status, headers and a streamed body back
//!
//! # Design Decisions
//! - The target URI is sent as composed; nothing resolves dot segments or decodes escapes
//! - Only the inbound headers go out; the client adds `Host` only when the inbound request had none
//! - Redirects are never followed and system proxy settings are ignored
//! - No timeout unless configured; expiry is an ordinary forwarding failure

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use futures_util::future::BoxFuture;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::config::TimeoutConfig;
use crate::http::request::ForwardRequest;
use crate::proxy::ForwardError;

/// Something that can carry a forwarded request to the origin.
pub trait Upstream: Send + Sync + 'static {
    fn forward(&self, request: ForwardRequest) -> BoxFuture<'_, Result<Response<Body>, ForwardError>>;
}

/// HTTP(S) upstream backed by a pooled `hyper-util` client.
#[derive(Clone)]
pub struct HttpUpstream {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    response_timeout: Option<Duration>,
}

impl HttpUpstream {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, rustls::Error> {
        let mut http = HttpConnector::new();
        http.enforce_http(false);
        http.set_connect_timeout(timeouts.connect_secs.map(Duration::from_secs));

        let https = HttpsConnectorBuilder::new()
            .with_provider_and_webpki_roots(rustls::crypto::ring::default_provider())?
            .https_or_http()
            .enable_http1()
            .wrap_connector(http);

        let client = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self {
            client,
            response_timeout: timeouts.request_secs.map(Duration::from_secs),
        })
    }

    async fn send(&self, request: ForwardRequest) -> Result<Response<Body>, ForwardError> {
        let mut outbound = Request::new(request.body.map_or_else(Body::empty, Body::from));
        *outbound.method_mut() = request.method;
        *outbound.uri_mut() = request.target;
        *outbound.headers_mut() = request.headers;

        let pending = self.client.request(outbound);
        let upstream = match self.response_timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| ForwardError::Timeout(limit))??,
            None => pending.await?,
        };

        Ok(upstream.map(Body::new))
    }
}

impl Upstream for HttpUpstream {
    fn forward(&self, request: ForwardRequest) -> BoxFuture<'_, Result<Response<Body>, ForwardError>> {
        Box::pin(self.send(request))
    }
}
