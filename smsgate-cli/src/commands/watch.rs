//! `smsgate watch` — persistent directory-watch mode.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use smsgate_watch::WatchOptions;

use super::{ConnectOpts, UsageError};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Directory to watch for new SMS files.
    pub dir: PathBuf,

    /// Move processed files into this directory.
    #[arg(long, short = 'm')]
    pub move_to: Option<PathBuf>,

    /// Also process files modified within the last N minutes (0 disables).
    #[arg(long, short = 'r', default_value_t = 5)]
    pub reprocess: u64,
}

pub fn run(opts: &ConnectOpts, args: WatchArgs) -> Result<()> {
    if !args.dir.is_dir() {
        return Err(UsageError(format!(
            "watch path is not a directory: {}",
            args.dir.display()
        ))
        .into());
    }
    if let Some(move_to) = &args.move_to {
        if !move_to.is_dir() {
            return Err(UsageError(format!(
                "move-to path is not a directory: {}",
                move_to.display()
            ))
            .into());
        }
    }

    let device = super::connect(opts)?;
    let options = WatchOptions {
        path: args.dir,
        move_to: args.move_to,
        reprocess: Duration::from_secs(args.reprocess * 60),
    };
    smsgate_watch::start_blocking(device, options).context("watch mode exited with error")
}
