//! SMS snapshots and request parameters.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::wire;

/// SMS storage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsStorageState {
    #[serde(rename(deserialize = "UnreadReport"))]
    pub unread_report: i64,
    #[serde(rename(deserialize = "LeftCount"))]
    pub left_count: i64,
    #[serde(rename(deserialize = "MaxCount"))]
    pub max_count: i64,
    #[serde(rename(deserialize = "TUseCount"))]
    pub use_count: i64,
    #[serde(rename(deserialize = "UnreadSMSCount"))]
    pub unread_count: i64,
}

impl SmsStorageState {
    pub const QUERY: &'static str = "GetSMSStorageState";
}

/// Kind of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsType {
    Read,
    Unread,
    Sent,
    Failed,
    Report,
    Flash,
    Draft,
}

impl TryFrom<u8> for SmsType {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => SmsType::Read,
            1 => SmsType::Unread,
            2 => SmsType::Sent,
            3 => SmsType::Failed,
            4 => SmsType::Report,
            5 => SmsType::Flash,
            6 => SmsType::Draft,
            other => return Err(format!("unknown sms type {other}")),
        })
    }
}

impl fmt::Display for SmsType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SmsType::Read => "read",
            SmsType::Unread => "unread",
            SmsType::Sent => "sent",
            SmsType::Failed => "failed",
            SmsType::Report => "report",
            SmsType::Flash => "flash",
            SmsType::Draft => "draft",
        };
        f.write_str(label)
    }
}

/// One stored message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsContent {
    #[serde(rename(deserialize = "SMSId"))]
    pub sms_id: i64,
    #[serde(rename(deserialize = "SMSType"), deserialize_with = "wire::enum_from_u8")]
    pub sms_type: SmsType,
    #[serde(
        rename(deserialize = "sms_report"),
        deserialize_with = "wire::bool_from_int"
    )]
    pub sms_report: bool,
    #[serde(
        rename(deserialize = "ReportStatus"),
        deserialize_with = "wire::bool_from_int"
    )]
    pub report_status: bool,
    #[serde(rename(deserialize = "report_id"))]
    pub report_id: i64,
    #[serde(rename(deserialize = "SMSContent"))]
    pub content: String,
    #[serde(rename(deserialize = "SMSTime"), deserialize_with = "wire::sms_time")]
    pub timestamp: NaiveDateTime,
    #[serde(
        rename(deserialize = "report_time"),
        deserialize_with = "wire::report_time"
    )]
    pub report_time: Option<NaiveDateTime>,
    #[serde(rename(deserialize = "SMSTimezone"))]
    pub time_zone: i64,
}

/// A contact thread: the peer numbers plus the latest message, flattened on
/// the wire into one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsContact {
    #[serde(flatten)]
    pub last_message: SmsContent,
    #[serde(rename(deserialize = "ContactId"))]
    pub contact_id: i64,
    #[serde(rename(deserialize = "PhoneNumber"))]
    pub phone_numbers: Vec<String>,
    #[serde(rename(deserialize = "UnreadCount"))]
    pub unread_count: u64,
    #[serde(rename(deserialize = "TSMSCount"))]
    pub sms_count: i64,
}

/// One page of contact threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsContactList {
    #[serde(rename(deserialize = "Page"))]
    pub page: u64,
    #[serde(rename(deserialize = "TotalPageCount"))]
    pub total_pages: i64,
    #[serde(rename(deserialize = "SMSContactList"))]
    pub contacts: Vec<SmsContact>,
}

impl SmsContactList {
    pub const QUERY: &'static str = "GetSMSContactList";

    /// Wire pages are 0-based.
    pub fn page_params(page: u64) -> Value {
        json!({ "Page": page })
    }
}

/// One page of messages exchanged with a single contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsContentList {
    #[serde(rename(deserialize = "Page"))]
    pub page: u64,
    #[serde(rename(deserialize = "TotalPageCount"))]
    pub total_pages: i64,
    #[serde(rename(deserialize = "ContactId"))]
    pub contact_id: i64,
    #[serde(rename(deserialize = "PhoneNumber"))]
    pub phone_numbers: Vec<String>,
    #[serde(rename(deserialize = "SMSContentList"))]
    pub messages: Vec<SmsContent>,
}

impl SmsContentList {
    pub const QUERY: &'static str = "GetSMSContentList";

    pub fn params(contact: i64, page: u64) -> Value {
        json!({ "Page": page, "ContactId": contact })
    }
}

/// Progress of an asynchronous send, polled via `GetSendSMSResult`.
/// Every value other than `Sending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    None,
    Sending,
    Success,
    FailSending,
    Full,
    Failed,
}

impl SendStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SendStatus::Sending)
    }
}

impl TryFrom<u8> for SendStatus {
    type Error = String;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Ok(match raw {
            0 => SendStatus::None,
            1 => SendStatus::Sending,
            2 => SendStatus::Success,
            3 => SendStatus::FailSending,
            4 => SendStatus::Full,
            5 => SendStatus::Failed,
            other => return Err(format!("unknown send status {other}")),
        })
    }
}

impl fmt::Display for SendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SendStatus::None => "none",
            SendStatus::Sending => "sending",
            SendStatus::Success => "success",
            SendStatus::FailSending => "retrying",
            SendStatus::Full => "memory full",
            SendStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

/// `GetSendSMSResult` payload.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SendReport {
    #[serde(rename = "SendStatus", deserialize_with = "wire::enum_from_u8")]
    pub status: SendStatus,
}

impl SendReport {
    pub const QUERY: &'static str = "GetSendSMSResult";
}

/// An SMS to be submitted with `SendSMS`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingSms {
    pub numbers: Vec<String>,
    pub content: String,
}

impl OutgoingSms {
    pub const SUBMIT: &'static str = "SendSMS";

    pub fn new(numbers: Vec<String>, content: impl Into<String>) -> Self {
        Self {
            numbers,
            content: content.into(),
        }
    }

    /// The submit parameters; `queued_at` is passed in so callers (and tests)
    /// control the clock.
    pub fn params(&self, queued_at: NaiveDateTime) -> Value {
        json!({
            "SMSId": -1,
            "SMSContent": self.content,
            "PhoneNumber": self.numbers,
            "SMSTime": queued_at.format(wire::SMS_TIME_FORMAT).to_string(),
        })
    }
}

/// What `DeleteSMS` should remove.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteScope {
    /// A whole contact thread.
    Contact(i64),
    /// A single message within a thread.
    Message { contact: i64, sms: i64 },
}

impl DeleteScope {
    pub const QUERY: &'static str = "DeleteSMS";

    pub fn params(&self) -> Value {
        match *self {
            DeleteScope::Contact(contact) => json!({ "DelFlag": 1, "ContactId": contact }),
            DeleteScope::Message { contact, sms } => {
                json!({ "DelFlag": 2, "ContactId": contact, "SMSId": sms })
            }
        }
    }
}
