use thiserror::Error;

use smsgate_rpc::RpcError;

/// Error surface of the device session.
///
/// Connectivity failures never appear here; the liveness layer absorbs them
/// and reports "not alive" instead.
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error(transparent)]
    Rpc(#[from] RpcError),

    #[error("failed to decode {method} result: {source}")]
    Decode {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
