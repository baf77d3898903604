//! Immutable connection configuration for one gateway session.

use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "192.168.1.1";
pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_BASE_PATH: &str = "/jrd/webapi";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(9);
pub const DEFAULT_KEEPALIVE: Duration = Duration::from_secs(3);

/// Rejected configurations; checked before any connection is attempted.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The background loop would let liveness go stale between probes.
    #[error(
        "keep-alive interval ({keepalive:?}) must be shorter than the request timeout ({timeout:?})"
    )]
    KeepaliveNotBelowTimeout {
        keepalive: Duration,
        timeout: Duration,
    },

    #[error("keep-alive interval must be non-zero")]
    ZeroKeepalive,
}

/// Connection settings for one device. Immutable once the `Device` is built;
/// assemble headers and timing up front.
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    pub host: String,
    pub port: u16,
    pub base_path: String,
    /// Static headers attached to every request (verification token etc.).
    pub headers: Vec<(String, String)>,
    /// Request timeout; doubles as the liveness freshness window.
    pub timeout: Duration,
    /// Background probe cadence.
    pub keepalive: Duration,
}

impl DeviceConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_PORT,
            base_path: DEFAULT_BASE_PATH.to_string(),
            headers: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            keepalive: DEFAULT_KEEPALIVE,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.keepalive.is_zero() {
            return Err(ConfigError::ZeroKeepalive);
        }
        if self.keepalive >= self.timeout {
            return Err(ConfigError::KeepaliveNotBelowTimeout {
                keepalive: self.keepalive,
                timeout: self.timeout,
            });
        }
        Ok(())
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST)
    }
}
