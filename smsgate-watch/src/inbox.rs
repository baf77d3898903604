//! SMS-from-file handling.
//!
//! A dropped file is a minimal mail-style note:
//!
//! ```text
//! To: +3612345678
//!
//! message body...
//! ```
//!
//! Header lines before the first blank line are ignored apart from `To:`;
//! everything after the blank line is the message body.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use smsgate_core::OutgoingSms;
use smsgate_device::Device;

/// Why a dropped file could not be turned into an SMS.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no To: header line found")]
    MissingTo,

    #[error("To: header has no ':' separator")]
    MissingSeparator,

    #[error("To: header value is empty")]
    EmptyNumber,
}

/// A parsed outgoing file.
#[derive(Debug, PartialEq, Eq)]
pub struct OutgoingFile {
    pub number: String,
    pub body: String,
}

/// Parse the `To:` header and body out of a dropped file's contents.
pub fn parse(raw: &str) -> Result<OutgoingFile, ParseError> {
    let mut lines = raw.lines();
    let to_line = loop {
        match lines.next() {
            Some(line) if line.starts_with("To") || line.starts_with("to") => break line,
            Some(_) => continue,
            None => return Err(ParseError::MissingTo),
        }
    };

    // The number sits after the last ':' so "To: tel:+36..." keeps working.
    let (_, value) = to_line
        .rsplit_once(':')
        .ok_or(ParseError::MissingSeparator)?;
    let number = value.trim();
    if number.is_empty() {
        return Err(ParseError::EmptyNumber);
    }

    let mut body_lines = Vec::new();
    let mut in_body = false;
    for line in lines {
        if in_body {
            body_lines.push(line);
        } else if line.trim().is_empty() {
            in_body = true;
        }
    }

    Ok(OutgoingFile {
        number: number.to_string(),
        body: body_lines.join("\n"),
    })
}

/// Read, send, and optionally file away one dropped SMS file. Failures are
/// logged and swallowed so one bad file never stops the watch loop.
pub fn process_file(device: &Device, path: &Path, move_to: Option<&Path>) {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "unable to read sms file");
            return;
        }
    };
    let outgoing = match parse(&raw) {
        Ok(outgoing) => outgoing,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "ignoring sms file");
            return;
        }
    };

    tracing::debug!(number = %outgoing.number, "sending sms from file");
    let sms = OutgoingSms::new(vec![outgoing.number], outgoing.body);
    match device.send_sms(&sms) {
        Ok(status) => {
            tracing::info!(path = %path.display(), status = %status, "sms file processed")
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "unable to send sms");
            return;
        }
    }

    if let Some(dir) = move_to {
        let Some(name) = path.file_name() else { return };
        let target = dir.join(name);
        tracing::debug!(from = %path.display(), to = %target.display(), "moving processed file");
        if let Err(err) = fs::rename(path, &target) {
            tracing::error!(
                from = %path.display(),
                to = %target.display(),
                error = %err,
                "unable to move processed file",
            );
        }
    }
}

/// Regular files under `dir` modified within the last `window`.
pub fn recent_files(dir: &Path, window: Duration) -> Vec<PathBuf> {
    let since = SystemTime::now()
        .checked_sub(window)
        .unwrap_or(UNIX_EPOCH);

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::error!(dir = %dir.display(), error = %err, "unable to list watch directory");
            return Vec::new();
        }
    };

    let mut recent = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::error!(dir = %dir.display(), error = %err, "unable to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let is_recent = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .map(|modified| modified >= since)
            .unwrap_or(false);
        if path.is_file() && is_recent {
            recent.push(path);
        }
    }
    recent.sort();
    recent
}

/// Process every recently-modified file already sitting in the directory,
/// for files dropped while the watcher was not running.
pub fn reprocess(device: &Device, dir: &Path, window: Duration, move_to: Option<&Path>) {
    for path in recent_files(dir, window) {
        tracing::debug!(path = %path.display(), "reprocessing file");
        process_file(device, &path, move_to);
    }
}
