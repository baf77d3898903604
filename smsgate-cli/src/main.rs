//! smsgate — CLI client for JSON-RPC cellular gateways.
//!
//! # Usage
//!
//! ```text
//! smsgate info|status|connection|storage [--detailed] [--json]
//! smsgate contacts [--page N]
//! smsgate messages <contact-id> [--page N]
//! smsgate send <number>... --content <text>
//! smsgate delete <contact-id> [--sms <id>]
//! smsgate watch <dir> [--move-to <dir>] [--reprocess <minutes>]
//! ```

mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    sms::{ContactsArgs, DeleteArgs, MessagesArgs, SendArgs},
    watch::WatchArgs,
    ConnectOpts, JsonArgs, UsageError, ViewArgs,
};

// sysexits(3) codes, so scripts can tell bad invocations from device trouble.
const EX_USAGE: i32 = 64;
const EX_SOFTWARE: i32 = 70;

#[derive(Parser, Debug)]
#[command(
    name = "smsgate",
    version,
    about = "Query and control JSON-RPC cellular gateways",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    connect: ConnectOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show device system information.
    Info(ViewArgs),

    /// Show radio network (RAN) status.
    Status(ViewArgs),

    /// Show WAN connection state.
    Connection(ViewArgs),

    /// Show SMS storage counters.
    Storage(JsonArgs),

    /// List SMS contact threads with their last message.
    Contacts(ContactsArgs),

    /// List messages exchanged with one contact.
    Messages(MessagesArgs),

    /// Send an SMS to one or more numbers.
    Send(SendArgs),

    /// Delete a contact thread or a single message.
    Delete(DeleteArgs),

    /// Watch a directory and send newly created files as SMS.
    Watch(WatchArgs),
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.connect.log_level);

    if let Err(err) = run(cli) {
        if err.is::<UsageError>() {
            eprintln!("{err}");
            eprintln!("see usage: smsgate --help");
            std::process::exit(EX_USAGE);
        }
        eprintln!("error: {err:#}");
        std::process::exit(EX_SOFTWARE);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Info(args) => commands::query::info(&cli.connect, args),
        Commands::Status(args) => commands::query::status(&cli.connect, args),
        Commands::Connection(args) => commands::query::connection(&cli.connect, args),
        Commands::Storage(args) => commands::query::storage(&cli.connect, args),
        Commands::Contacts(args) => commands::sms::contacts(&cli.connect, args),
        Commands::Messages(args) => commands::sms::messages(&cli.connect, args),
        Commands::Send(args) => commands::sms::send(&cli.connect, args),
        Commands::Delete(args) => commands::sms::delete(&cli.connect, args),
        Commands::Watch(args) => commands::watch::run(&cli.connect, args),
    }
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
