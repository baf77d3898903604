//! Subcommand implementations and the shared device wiring.

pub mod query;
pub mod sms;
pub mod watch;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use thiserror::Error;

use smsgate_device::{Device, DeviceConfig, DEFAULT_BASE_PATH, DEFAULT_HOST};

/// Factory-default verification token baked into the firmware's web UI.
const DEFAULT_VERIFY_TOKEN: &str = "KSDHSDFOGQ5WERYTUIQWERTYUISDFG1HJZXCVCXBN2GDSMNDHKVKFsVBNf";

/// Errors that should exit with the sysexits usage code rather than the
/// runtime one.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ConnectOpts {
    /// Hostname or IP address of the gateway.
    #[arg(long, global = true, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port of the HTTP control endpoint.
    #[arg(long, global = true, default_value_t = smsgate_device::DEFAULT_PORT)]
    pub port: u16,

    /// Base path of the JSON-RPC endpoint.
    #[arg(long, global = true, default_value = DEFAULT_BASE_PATH)]
    pub base_path: String,

    /// Request-verification token expected by the firmware.
    #[arg(long, global = true, default_value = DEFAULT_VERIFY_TOKEN)]
    pub verify_token: String,

    /// Request timeout in seconds; also the liveness freshness window.
    #[arg(long, short = 't', global = true, default_value_t = 9)]
    pub timeout: u64,

    /// Background keepalive interval in seconds; must stay below the timeout.
    #[arg(long, short = 'k', global = true, default_value_t = 3)]
    pub keepalive: u64,

    /// Log filter (tracing env-filter syntax).
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

/// Shared flags for the detailed/compact snapshot views.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Multi-line detailed view instead of the one-line summary.
    #[arg(long, short = 'd')]
    pub detailed: bool,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct JsonArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

/// Build the device from the connection flags and perform the initial
/// liveness wait (a single probe for one-shot commands).
pub fn connect(opts: &ConnectOpts) -> Result<Arc<Device>> {
    let config = DeviceConfig {
        host: opts.host.clone(),
        port: opts.port,
        base_path: opts.base_path.clone(),
        headers: default_headers(opts),
        timeout: Duration::from_secs(opts.timeout),
        keepalive: Duration::from_secs(opts.keepalive),
    };
    tracing::debug!(host = %config.host, port = config.port, "connecting to gateway");

    let device = Device::connect(config).map_err(|err| UsageError(err.to_string()))?;
    device.wait_alive()?;
    Ok(Arc::new(device))
}

fn default_headers(opts: &ConnectOpts) -> Vec<(String, String)> {
    vec![
        ("Content-Type".to_string(), "application/json".to_string()),
        (
            "_TclRequestVerificationKey".to_string(),
            opts.verify_token.clone(),
        ),
        ("_TclRequestVerificationToken".to_string(), "null".to_string()),
        ("Referer".to_string(), format!("http://{}/index.html", opts.host)),
        ("Origin".to_string(), format!("http://{}", opts.host)),
    ]
}
