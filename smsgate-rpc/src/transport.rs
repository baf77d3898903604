//! Blocking HTTP POST transport for the gateway's JSON-RPC endpoint.

use std::time::Duration;

use serde_json::Value;

use crate::error::TransportError;

/// One round trip: serialized JSON-RPC request out, raw response body back.
///
/// This is the seam the tests use to script probe outcomes and observe
/// request ordering without a device on the network.
pub trait Transport: Send {
    fn roundtrip(&self, request: &Value) -> Result<String, TransportError>;
}

/// `ureq`-backed transport speaking to `http://<host>:<port><base-path>`.
pub struct HttpTransport {
    agent: ureq::Agent,
    url: String,
    headers: Vec<(String, String)>,
}

impl HttpTransport {
    pub fn new(
        host: &str,
        port: u16,
        base_path: &str,
        timeout: Duration,
        extra_headers: Vec<(String, String)>,
    ) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        let mut headers = vec![
            ("Host".to_string(), host.to_string()),
            ("Connection".to_string(), "keep-alive".to_string()),
        ];
        headers.extend(extra_headers);
        Self {
            agent,
            url: format!("http://{host}:{port}{base_path}"),
            headers,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn roundtrip(&self, request: &Value) -> Result<String, TransportError> {
        let mut req = self.agent.post(&self.url);
        for (name, value) in &self.headers {
            req = req.set(name, value);
        }
        match req.send_json(request) {
            Ok(response) => response
                .into_string()
                .map_err(|err| TransportError::Unreachable(err.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(TransportError::Status(code)),
            Err(ureq::Error::Transport(err)) => Err(TransportError::Unreachable(err.to_string())),
        }
    }
}
