//! Edge reverse proxy for a single origin.
//!
//! Every inbound request is answered from a local asset directory when a
//! file matches, and otherwise forwarded verbatim to the configured origin.

pub mod assets;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use proxy::EdgeProxy;
