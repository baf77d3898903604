//! Serde helpers for the gateway's wire quirks.
//!
//! The firmware encodes some integers as strings, booleans as integers,
//! MAC addresses as colon-separated hex, and timestamps as local-time
//! strings in two different formats.

use std::fmt;

use chrono::NaiveDateTime;
use serde::de::{Deserializer, Error as DeError};
use serde::ser::Serializer;
use serde::Deserialize;

/// `"2023-04-01 12:30:00"` — used for SMS and build timestamps.
pub(crate) const SMS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// `"2023-Apr-01 12:30:00"` — only delivery reports use the abbreviated month.
pub(crate) const REPORT_TIME_FORMAT: &str = "%Y-%b-%d %H:%M:%S";

pub(crate) fn int_from_string<'de, D>(de: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    raw.trim()
        .parse()
        .map_err(|_| D::Error::custom(format!("expected string-encoded integer, got {raw:?}")))
}

pub(crate) fn bool_from_int<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(i64::deserialize(de)? > 0)
}

pub(crate) fn sms_time<'de, D>(de: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    NaiveDateTime::parse_from_str(raw.trim(), SMS_TIME_FORMAT)
        .map_err(|err| D::Error::custom(format!("bad timestamp {raw:?}: {err}")))
}

/// Delivery-report timestamps are empty until a report arrives; anything
/// unparseable maps to `None` rather than failing the whole snapshot.
pub(crate) fn report_time<'de, D>(de: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    Ok(NaiveDateTime::parse_from_str(raw.trim(), REPORT_TIME_FORMAT).ok())
}

pub(crate) fn mac_address<'de, D>(de: D) -> Result<[u8; 6], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(de)?;
    let mut octets = [0u8; 6];
    let mut parts = raw.trim().split(':');
    for octet in &mut octets {
        let part = parts
            .next()
            .ok_or_else(|| D::Error::custom(format!("MAC address too short: {raw:?}")))?;
        *octet = u8::from_str_radix(part, 16)
            .map_err(|_| D::Error::custom(format!("bad MAC octet {part:?} in {raw:?}")))?;
    }
    if parts.next().is_some() {
        return Err(D::Error::custom(format!("MAC address too long: {raw:?}")));
    }
    Ok(octets)
}

pub(crate) fn mac_to_string<S>(mac: &[u8; 6], ser: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    ser.serialize_str(&format_mac(mac))
}

pub(crate) fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|octet| format!("{octet:02X}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Numeric wire enums (network type, connection status, ...) all arrive as
/// small integers; each enum supplies its own `TryFrom<u8>`.
pub(crate) fn enum_from_u8<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<u8>,
    T::Error: fmt::Display,
{
    let raw = u8::deserialize(de)?;
    T::try_from(raw).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::value::{Error as ValueError, StrDeserializer};
    use serde::de::IntoDeserializer;

    fn str_de(raw: &str) -> StrDeserializer<'_, ValueError> {
        raw.into_deserializer()
    }

    #[test]
    fn parses_string_encoded_integers() {
        assert_eq!(int_from_string(str_de("42")).unwrap(), 42);
        assert_eq!(int_from_string(str_de(" 7 ")).unwrap(), 7);
        assert!(int_from_string(str_de("x")).is_err());
    }

    #[test]
    fn parses_mac_addresses() {
        let mac = mac_address(str_de("00:1E:10:1F:00:00")).unwrap();
        assert_eq!(mac, [0x00, 0x1E, 0x10, 0x1F, 0x00, 0x00]);
        assert_eq!(format_mac(&mac), "00:1E:10:1F:00:00");
        assert!(mac_address(str_de("00:1E:10")).is_err());
        assert!(mac_address(str_de("00:1E:10:1F:00:00:11")).is_err());
    }

    #[test]
    fn report_time_tolerates_empty_values() {
        assert_eq!(report_time(str_de("")).unwrap(), None);
        let parsed = report_time(str_de("2023-Apr-01 10:00:00")).unwrap();
        assert!(parsed.is_some());
    }
}
