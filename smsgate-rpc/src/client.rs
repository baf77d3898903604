//! Minimal JSON-RPC 2.0 client speaking the gateway dialect.
//!
//! Requests are numbered sequentially with string ids, matching what the
//! stock web UI sends; the firmware rejects everything else.

use serde_json::{json, Value};

use crate::error::RpcError;
use crate::transport::Transport;

/// JSON-RPC internal error code.
pub const INTERNAL_ERROR: i64 = -32603;

/// Message substituted when the firmware returns an error object missing the
/// mandatory members. Some firmware operations (notably `DeleteSMS`) emit
/// that shape on success, so callers match on this exact pair.
pub const INVALID_ERROR_OBJECT: &str =
    r#"invalid error response: "code" (negative number) and "message" (string) are required"#;

pub struct RpcClient {
    transport: Box<dyn Transport>,
    next_id: u64,
}

impl RpcClient {
    pub fn new(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            next_id: 0,
        }
    }

    /// Perform one call and return the `result` member.
    pub fn call(&mut self, method: &str, params: Option<Value>) -> Result<Value, RpcError> {
        let id = self.next_id.to_string();
        self.next_id += 1;

        let mut request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
        });
        if let Some(params) = params {
            request["params"] = params;
        }

        tracing::trace!(method, id = %id, "rpc request");
        let body = self.transport.roundtrip(&request)?;
        let response: Value = serde_json::from_str(&body)
            .map_err(|err| RpcError::Protocol(format!("unparseable response to {method}: {err}")))?;

        if let Some(error) = response.get("error") {
            return Err(parse_error_object(error));
        }
        match response.get("result") {
            Some(result) => Ok(result.clone()),
            None => Err(RpcError::Protocol(format!(
                "response to {method} carries neither result nor error"
            ))),
        }
    }
}

fn parse_error_object(error: &Value) -> RpcError {
    let code = error.get("code").and_then(Value::as_i64);
    let message = error.get("message").and_then(Value::as_str);
    match (code, message) {
        (Some(code), Some(message)) if code < 0 => RpcError::Device {
            code,
            message: message.to_string(),
        },
        _ => RpcError::Device {
            code: INTERNAL_ERROR,
            message: INVALID_ERROR_OBJECT.to_string(),
        },
    }
}
