//! Human-readable views of device snapshots.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use smsgate_core::{
    ConnectionState, ConnectionStatus, SmsContactList, SmsContent, SmsContentList,
    SmsStorageState, SmsType, SystemInfo, SystemStatus,
};

pub fn system_info(info: &SystemInfo) -> String {
    format!(
        "SYS: {} @ {}, MAC: {}, API: {}",
        info.hw_version,
        info.build_time.format("%Y.%m.%d"),
        info.mac_string(),
        info.http_api_version,
    )
}

pub fn system_info_detailed(info: &SystemInfo) -> String {
    format!(
        "SYSTEM INFO [{}]:\n\
         \tHW Version:       {}\n\
         \tMAC Address:      {}\n\
         \tBuild Time:       {}\n\
         \tHTTP API version: {}\n\
         \tICCID:            {}\n\
         \tIMEI:             {}\n\
         \tIMEI sv:          {}\n\
         \tIMSI:             {}\n",
        info.device_name,
        info.hw_version,
        info.mac_string(),
        info.build_time.format("%Y.%m.%d. %H:%M"),
        info.http_api_version,
        info.iccid,
        info.imei,
        info.imeisv,
        info.imsi,
    )
}

fn status_badge(status: ConnectionStatus) -> String {
    let label = status.to_string();
    match status {
        ConnectionStatus::Connected => label.green().bold().to_string(),
        ConnectionStatus::Disconnected => label.red().bold().to_string(),
        _ => label.yellow().to_string(),
    }
}

pub fn system_status(status: &SystemStatus) -> String {
    format!(
        "RAN: {} @ {} is {} with signal strength {}, SMS: {}",
        status.network_type,
        status.network_name,
        status_badge(status.connection_status),
        status.signal_strength,
        status.sms_state,
    )
}

pub fn system_status_detailed(status: &SystemStatus) -> String {
    format!(
        "SYSTEM STATUS [{}]:\n\
         \tNetwork Name:     {}\n\
         \tNetwork Type:     {}\n\
         \tSignal Strength:  {}\n\
         \tSMS State:        {}\n\
         \tRoaming:          {}\n\
         \tConnection Error: {}\n\
         \tClear Code:       {}\n",
        status.connection_status,
        status.network_name,
        status.network_type,
        status.signal_strength,
        status.sms_state,
        if status.roaming { "enabled" } else { "disabled" },
        status.conprof_error,
        status.clear_code,
    )
}

pub fn connection_state(state: &ConnectionState) -> String {
    format!(
        "{} for {} @ v4: {} v6: {}, traffic (UP/DOWN): {}/{}",
        status_badge(state.connection_status),
        format_hms(state.connection_secs),
        state.ipv4_address,
        state.ipv6_address,
        state.ul_bytes,
        state.dl_bytes,
    )
}

pub fn connection_state_detailed(state: &ConnectionState) -> String {
    format!(
        "CONNECTION STATE [{}]:\n\
         \tConnection Time:  {}\n\
         \tConnection Error: {}\n\
         \tClear Code:       {}\n\
         \tIPv4 address:     {}\n\
         \tIPv6 address:     {}\n\
         \tDownload Speed:   {}\n\
         \tUpload Speed:     {}\n\
         \tDownloaded Bytes: {}\n\
         \tUploaded Bytes:   {}\n",
        state.connection_status,
        format_hms(state.connection_secs),
        state.conprof_error,
        state.clear_code,
        state.ipv4_address,
        state.ipv6_address,
        state.dl_speed,
        state.ul_speed,
        state.dl_bytes,
        state.ul_bytes,
    )
}

pub fn sms_storage(storage: &SmsStorageState) -> String {
    format!(
        "SMS storage counters: used {}, unread/left/max: {}/{}/{}",
        storage.use_count, storage.unread_count, storage.left_count, storage.max_count,
    )
}

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "id")]
    id: i64,
    #[tabled(rename = "numbers")]
    numbers: String,
    #[tabled(rename = "unread")]
    unread: u64,
    #[tabled(rename = "total")]
    total: i64,
    #[tabled(rename = "last message")]
    last_message: String,
    #[tabled(rename = "at")]
    at: String,
}

pub fn contact_list(list: &SmsContactList) -> String {
    let mut out = format!(
        "SMS contacts [page {}/{}]:\n",
        list.page + 1,
        list.total_pages
    );
    if list.contacts.is_empty() {
        out.push_str("no contacts on this page\n");
        return out;
    }

    let rows: Vec<ContactRow> = list
        .contacts
        .iter()
        .map(|contact| ContactRow {
            id: contact.contact_id,
            numbers: contact.phone_numbers.join(", "),
            unread: contact.unread_count,
            total: contact.sms_count,
            last_message: preview(&contact.last_message, 40),
            at: contact
                .last_message
                .timestamp
                .format("%Y.%m.%d. %H:%M")
                .to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

pub fn content_list(list: &SmsContentList) -> String {
    let mut out = format!(
        "SMS messages of <{}> {} [page {}/{}]:\n",
        list.contact_id,
        list.phone_numbers.join(", "),
        list.page + 1,
        list.total_pages,
    );
    for message in &list.messages {
        out.push_str(&format!(
            " {} <{}> @ {}\n\t{}\n",
            message.sms_type,
            message.sms_id,
            message.timestamp.format("%Y.%m.%d. %H:%M"),
            message_text(message),
        ));
    }
    out
}

/// Delivery reports carry no text of their own; show the outcome instead.
fn message_text(message: &SmsContent) -> String {
    if message.sms_type == SmsType::Report {
        if message.report_status {
            "DELIVERED".to_string()
        } else {
            "FAILED".to_string()
        }
    } else {
        message.content.clone()
    }
}

fn preview(message: &SmsContent, max_chars: usize) -> String {
    let flat = message_text(message).replace('\n', " ");
    if flat.chars().count() > max_chars {
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        flat
    }
}

fn format_hms(total_secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        total_secs / 3600,
        (total_secs % 3600) / 60,
        total_secs % 60
    )
}
