//! # smsgate-core
//!
//! Typed snapshots and request parameters for the gateway's JSON-RPC API.
//! This crate only maps JSON payloads to and from domain types; transport
//! and session logic live in `smsgate-rpc` and `smsgate-device`.

pub mod sms;
pub mod status;
mod wire;

pub use sms::{
    DeleteScope, OutgoingSms, SendReport, SendStatus, SmsContact, SmsContactList, SmsContent,
    SmsContentList, SmsStorageState, SmsType,
};
pub use status::{ConnectionState, ConnectionStatus, NetworkType, SmsState, SystemInfo, SystemStatus};
