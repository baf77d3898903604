//! # smsgate-device
//!
//! The gateway session core: liveness tracking with a freshness window, the
//! background keepalive/reconnection loop, and the command surface every
//! CLI operation goes through. All remote calls for one device are
//! serialized behind a single lock.

mod config;
mod device;
mod error;

pub use config::{
    ConfigError, DeviceConfig, DEFAULT_BASE_PATH, DEFAULT_HOST, DEFAULT_KEEPALIVE, DEFAULT_PORT,
    DEFAULT_TIMEOUT,
};
pub use device::Device;
pub use error::DeviceError;
