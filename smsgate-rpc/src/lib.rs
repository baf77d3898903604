//! # smsgate-rpc
//!
//! JSON-RPC-over-HTTP plumbing for the gateway control endpoint: a blocking
//! transport, a tiny JSON-RPC 2.0 client, and the error taxonomy the
//! liveness layer depends on (connectivity vs. protocol vs. device error).

mod client;
mod error;
mod transport;

pub use client::{RpcClient, INTERNAL_ERROR, INVALID_ERROR_OBJECT};
pub use error::{RpcError, TransportError};
pub use transport::{HttpTransport, Transport};
