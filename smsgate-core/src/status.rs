//! Device and network status snapshots.
//!
//! Deserialization follows the gateway's wire field names; serialized output
//! (the CLI's `--json` views) uses snake_case instead.

use std::fmt;
use std::time::Duration;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::wire;

/// Hardware/firmware identity of the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(rename(deserialize = "DeviceName"))]
    pub device_name: String,
    #[serde(rename(deserialize = "HwVersion"))]
    pub hw_version: String,
    #[serde(rename(deserialize = "HttpApiVersion"))]
    pub http_api_version: String,
    #[serde(rename(deserialize = "ICCID"))]
    pub iccid: String,
    #[serde(rename(deserialize = "IMEI"))]
    pub imei: String,
    #[serde(
        rename(deserialize = "IMEISV"),
        deserialize_with = "wire::int_from_string"
    )]
    pub imeisv: i64,
    #[serde(rename(deserialize = "IMSI"))]
    pub imsi: String,
    #[serde(rename(deserialize = "BuildTime"), deserialize_with = "wire::sms_time")]
    pub build_time: NaiveDateTime,
    #[serde(
        rename(deserialize = "MacAddress"),
        deserialize_with = "wire::mac_address",
        serialize_with = "wire::mac_to_string"
    )]
    pub mac_address: [u8; 6],
}

impl SystemInfo {
    pub const QUERY: &'static str = "GetSystemInfo";

    pub fn mac_string(&self) -> String {
        wire::format_mac(&self.mac_address)
    }
}

/// Radio access technology reported by the modem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    NoService,
    Gprs,
    Edge,
    Hspa,
    Hsupa,
    Umts,
    HspaPlus,
    DcHspaPlus,
    Lte,
    LtePlus,
}

impl TryFrom<u8> for NetworkType {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => NetworkType::NoService,
            1 => NetworkType::Gprs,
            2 => NetworkType::Edge,
            3 => NetworkType::Hspa,
            4 => NetworkType::Hsupa,
            5 => NetworkType::Umts,
            6 => NetworkType::HspaPlus,
            7 => NetworkType::DcHspaPlus,
            8 => NetworkType::Lte,
            9 => NetworkType::LtePlus,
            other => return Err(format!("unknown network type {other}")),
        })
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NetworkType::NoService => "NO Service",
            NetworkType::Gprs => "GPRS [2G]",
            NetworkType::Edge => "EDGE [2G]",
            NetworkType::Hspa => "HSPA [3G]",
            NetworkType::Hsupa => "HSUPA [3G]",
            NetworkType::Umts => "UMTS [3G]",
            NetworkType::HspaPlus => "HSPA+ [3G+]",
            NetworkType::DcHspaPlus => "DC HSPA+ [3G+]",
            NetworkType::Lte => "LTE [4G]",
            NetworkType::LtePlus => "LTE+ [4G+]",
        };
        f.write_str(label)
    }
}

/// WAN connection lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Disconnected,
    Connecting,
    Connected,
    Disconnecting,
}

impl TryFrom<u8> for ConnectionStatus {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => ConnectionStatus::Disconnected,
            1 => ConnectionStatus::Connecting,
            2 => ConnectionStatus::Connected,
            3 => ConnectionStatus::Disconnecting,
            other => return Err(format!("unknown connection status {other}")),
        })
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting...",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnecting => "disconnecting...",
        };
        f.write_str(label)
    }
}

/// State of the SMS subsystem as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsState {
    Disabled,
    Full,
    Normal,
    New,
}

impl TryFrom<u8> for SmsState {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => SmsState::Disabled,
            1 => SmsState::Full,
            2 => SmsState::Normal,
            3 => SmsState::New,
            other => return Err(format!("unknown sms state {other}")),
        })
    }
}

impl fmt::Display for SmsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SmsState::Disabled => "disabled",
            SmsState::Full => "full",
            SmsState::Normal => "normal",
            SmsState::New => "new",
        };
        f.write_str(label)
    }
}

/// Radio network (RAN) status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemStatus {
    #[serde(rename(deserialize = "NetworkName"))]
    pub network_name: String,
    #[serde(
        rename(deserialize = "NetworkType"),
        deserialize_with = "wire::enum_from_u8"
    )]
    pub network_type: NetworkType,
    #[serde(rename(deserialize = "SignalStrength"))]
    pub signal_strength: i64,
    #[serde(
        rename(deserialize = "ConnectionStatus"),
        deserialize_with = "wire::enum_from_u8"
    )]
    pub connection_status: ConnectionStatus,
    #[serde(rename(deserialize = "Conprofileerror"))]
    pub conprof_error: i64,
    #[serde(rename(deserialize = "ClearCode"))]
    pub clear_code: i64,
    #[serde(rename(deserialize = "mPdpRejectCount"))]
    pub pdp_reject_count: i64,
    #[serde(rename(deserialize = "SmsState"), deserialize_with = "wire::enum_from_u8")]
    pub sms_state: SmsState,
    #[serde(rename(deserialize = "Roaming"), deserialize_with = "wire::bool_from_int")]
    pub roaming: bool,
    #[serde(
        rename(deserialize = "Domestic_Roaming"),
        deserialize_with = "wire::bool_from_int"
    )]
    pub domestic_roaming: bool,
}

impl SystemStatus {
    pub const QUERY: &'static str = "GetSystemStatus";
}

/// WAN connection state with traffic counters.
///
/// The address field names carry the firmware's own spelling ("Adrress").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionState {
    #[serde(
        rename(deserialize = "ConnectionStatus"),
        deserialize_with = "wire::enum_from_u8"
    )]
    pub connection_status: ConnectionStatus,
    #[serde(rename(deserialize = "Conprofileerror"))]
    pub conprof_error: i64,
    #[serde(rename(deserialize = "ClearCode"))]
    pub clear_code: i64,
    #[serde(rename(deserialize = "mPdpRejectCount"))]
    pub pdp_reject_count: i64,
    #[serde(rename(deserialize = "IPv4Adrress"))]
    pub ipv4_address: String,
    #[serde(rename(deserialize = "IPv6Adrress"))]
    pub ipv6_address: String,
    #[serde(rename(deserialize = "Speed_Dl"))]
    pub dl_speed: u64,
    #[serde(rename(deserialize = "Speed_Ul"))]
    pub ul_speed: u64,
    #[serde(rename(deserialize = "DlRate"))]
    pub dl_rate: u64,
    #[serde(rename(deserialize = "UlRate"))]
    pub ul_rate: u64,
    #[serde(rename(deserialize = "DlBytes"))]
    pub dl_bytes: u64,
    #[serde(rename(deserialize = "UlBytes"))]
    pub ul_bytes: u64,
    #[serde(rename(deserialize = "ConnectionTime"))]
    pub connection_secs: u64,
}

impl ConnectionState {
    pub const QUERY: &'static str = "GetConnectionState";

    pub fn connection_time(&self) -> Duration {
        Duration::from_secs(self.connection_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_info_maps_wire_fields() {
        let info: SystemInfo = serde_json::from_value(json!({
            "DeviceName": "MW40V",
            "HwVersion": "MW40_V1",
            "HttpApiVersion": "1.8",
            "ICCID": "8936200000000000000",
            "IMEI": "866758040000000",
            "IMEISV": "05",
            "IMSI": "216200000000000",
            "BuildTime": "2019-11-08 10:12:27",
            "MacAddress": "00:1E:10:1F:00:00",
            "SomethingExtra": 1,
        }))
        .expect("decode system info");

        assert_eq!(info.device_name, "MW40V");
        assert_eq!(info.imeisv, 5);
        assert_eq!(info.mac_string(), "00:1E:10:1F:00:00");
        assert_eq!(info.build_time.format("%Y.%m.%d").to_string(), "2019.11.08");
    }

    #[test]
    fn system_status_maps_enums_and_int_bools() {
        let status: SystemStatus = serde_json::from_value(json!({
            "NetworkName": "Telekom HU",
            "NetworkType": 8,
            "SignalStrength": 4,
            "ConnectionStatus": 2,
            "Conprofileerror": 0,
            "ClearCode": 0,
            "mPdpRejectCount": 0,
            "SmsState": 2,
            "Roaming": 0,
            "Domestic_Roaming": 1,
        }))
        .expect("decode system status");

        assert_eq!(status.network_type, NetworkType::Lte);
        assert_eq!(status.connection_status, ConnectionStatus::Connected);
        assert_eq!(status.sms_state, SmsState::Normal);
        assert!(!status.roaming);
        assert!(status.domestic_roaming);
    }

    #[test]
    fn unknown_enum_value_fails_decoding() {
        let result = serde_json::from_value::<SystemStatus>(json!({
            "NetworkName": "x",
            "NetworkType": 42,
            "SignalStrength": 0,
            "ConnectionStatus": 0,
            "Conprofileerror": 0,
            "ClearCode": 0,
            "mPdpRejectCount": 0,
            "SmsState": 0,
            "Roaming": 0,
            "Domestic_Roaming": 0,
        }));
        assert!(result.is_err());
    }

    #[test]
    fn connection_state_maps_counters() {
        let state: ConnectionState = serde_json::from_value(json!({
            "ConnectionStatus": 2,
            "Conprofileerror": 0,
            "ClearCode": 0,
            "mPdpRejectCount": 0,
            "IPv4Adrress": "10.0.0.2",
            "IPv6Adrress": "::",
            "Speed_Dl": 1200,
            "Speed_Ul": 300,
            "DlRate": 0,
            "UlRate": 0,
            "DlBytes": 123456,
            "UlBytes": 7890,
            "ConnectionTime": 3700,
        }))
        .expect("decode connection state");

        assert_eq!(state.ipv4_address, "10.0.0.2");
        assert_eq!(state.connection_time(), Duration::from_secs(3700));
    }

    #[test]
    fn display_labels_match_device_vocabulary() {
        assert_eq!(NetworkType::LtePlus.to_string(), "LTE+ [4G+]");
        assert_eq!(ConnectionStatus::Connecting.to_string(), "connecting...");
        assert_eq!(SmsState::New.to_string(), "new");
    }
}
