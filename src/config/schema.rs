//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the edge proxy.
//! All types derive `Deserialize` for loading from config files.

use std::path::PathBuf;

use serde::Deserialize;

/// Root configuration for the edge proxy.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The single origin every request is forwarded to.
    pub origin: OriginConfig,

    /// Optional static asset directory consulted before the origin.
    pub assets: AssetsConfig,

    /// Timeout configuration for the upstream call.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub limits: LimitsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Origin configuration.
///
/// There is deliberately no default URL: a proxy without an origin refuses
/// to start.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct OriginConfig {
    /// Base URL of the origin (e.g., "https://blog.internal/").
    pub url: Option<String>,
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory served before falling through to the origin.
    pub dir: Option<PathBuf>,
}

/// Upstream timeouts. Unset means the client never gives up on its own.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total upstream request timeout in seconds.
    pub request_secs: Option<u64>,
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest request body buffered for forwarding, in bytes.
    pub max_body_bytes: Option<usize>,
}

impl LimitsConfig {
    /// Effective body limit handed to the body collector.
    pub fn body_limit(&self) -> usize {
        self.max_body_bytes.unwrap_or(usize::MAX)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
