//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, every method and path to one handler)
//!     → proxy::EdgeProxy (asset lookup, forwarding)
//!     → request.rs (origin URL, target composition, body buffering)
//!     → response.rs (x-proxied-by, 502 on failure)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{ForwardRequest, OriginError, OriginUrl};
pub use response::{PROXIED_BY, X_PROXIED_BY};
pub use server::{HttpServer, ServerError};
