//! Error taxonomy for the RPC layer.
//!
//! The liveness core relies on the three-way split: only [`RpcError::Unreachable`]
//! means "device offline"; protocol and application errors are fatal for the
//! call that triggered them.

use thiserror::Error;

/// Failures below the JSON-RPC envelope.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Socket-level connectivity failure: refused, timed out, DNS, reset.
    #[error("connection error: {0}")]
    Unreachable(String),

    /// The endpoint answered, but not with HTTP 200.
    #[error("http error: received status {0}")]
    Status(u16),
}

/// Failures surfaced by a JSON-RPC call.
#[derive(Debug, Error)]
pub enum RpcError {
    /// Device unreachable at the socket level; the only liveness signal.
    #[error("connection error: {0}")]
    Unreachable(String),

    /// The HTTP status or the JSON-RPC envelope was not what a well-behaved
    /// endpoint produces.
    #[error("rpc protocol error: {0}")]
    Protocol(String),

    /// Application-level error reported by the device firmware.
    #[error("device error {code}: {message}")]
    Device { code: i64, message: String },
}

impl RpcError {
    /// True when the failure means "device offline" rather than a broken
    /// exchange with a reachable device.
    pub fn is_offline(&self) -> bool {
        matches!(self, RpcError::Unreachable(_))
    }
}

impl From<TransportError> for RpcError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Unreachable(detail) => RpcError::Unreachable(detail),
            TransportError::Status(code) => {
                RpcError::Protocol(format!("received http status {code}"))
            }
        }
    }
}
