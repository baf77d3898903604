//! SMS commands: contacts, messages, send, delete.

use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;

use smsgate_core::{DeleteScope, OutgoingSms, SendStatus};

use crate::render;

use super::{connect, ConnectOpts, UsageError};

#[derive(Args, Debug)]
pub struct ContactsArgs {
    /// Page number (1-based).
    #[arg(long, short = 'n', default_value_t = 1)]
    pub page: u64,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Contact id, as shown by `smsgate contacts`.
    pub contact: i64,

    /// Page number (1-based).
    #[arg(long, short = 'n', default_value_t = 1)]
    pub page: u64,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient phone number(s).
    #[arg(required = true)]
    pub numbers: Vec<String>,

    /// Message text.
    #[arg(long, short = 'c')]
    pub content: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Contact id whose thread (or message) to delete.
    pub contact: i64,

    /// Delete only this message instead of the whole thread.
    #[arg(long)]
    pub sms: Option<i64>,
}

pub fn contacts(opts: &ConnectOpts, args: ContactsArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(list) = device.sms_contacts(args.page)? else {
        bail!("device unreachable and no cached contact list");
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&list).context("failed to render contact list JSON")?
        );
    } else {
        print!("{}", render::contact_list(&list));
    }
    Ok(())
}

pub fn messages(opts: &ConnectOpts, args: MessagesArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(list) = device.sms_contents(args.contact, args.page)? else {
        bail!("device unreachable and no cached message list");
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&list).context("failed to render message list JSON")?
        );
    } else {
        print!("{}", render::content_list(&list));
    }
    Ok(())
}

pub fn send(opts: &ConnectOpts, args: SendArgs) -> Result<()> {
    let Some(content) = args.content else {
        return Err(UsageError("--content is required with send".to_string()).into());
    };

    let device = connect(opts)?;
    let sms = OutgoingSms::new(args.numbers, content);
    let status = device.send_sms(&sms).context("sms submission failed")?;

    let label = match status {
        SendStatus::Success => status.to_string().green().bold().to_string(),
        SendStatus::Sending | SendStatus::None => status.to_string(),
        _ => status.to_string().red().bold().to_string(),
    };
    println!("send status: {label}");
    Ok(())
}

pub fn delete(opts: &ConnectOpts, args: DeleteArgs) -> Result<()> {
    let scope = match args.sms {
        Some(sms) if sms > 0 => DeleteScope::Message {
            contact: args.contact,
            sms,
        },
        _ => DeleteScope::Contact(args.contact),
    };

    let device = connect(opts)?;
    if !device.delete_sms(scope).context("delete failed")? {
        bail!("device unreachable; nothing deleted");
    }
    match scope {
        DeleteScope::Contact(contact) => println!("deleted thread of contact {contact}"),
        DeleteScope::Message { contact, sms } => {
            println!("deleted message {sms} of contact {contact}")
        }
    }
    Ok(())
}
