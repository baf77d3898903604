//! Read-only device queries: info, status, connection, storage.

use anyhow::{bail, Context, Result};

use crate::render;

use super::{connect, ConnectOpts, JsonArgs, ViewArgs};

pub fn info(opts: &ConnectOpts, view: ViewArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(info) = device.system_info()? else {
        bail!("device unreachable and no cached system information");
    };
    if view.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&info).context("failed to render system info JSON")?
        );
    } else if view.detailed {
        print!("{}", render::system_info_detailed(&info));
    } else {
        println!("{}", render::system_info(&info));
    }
    Ok(())
}

pub fn status(opts: &ConnectOpts, view: ViewArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(status) = device.system_status()? else {
        bail!("device unreachable and no cached system status");
    };
    if view.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).context("failed to render status JSON")?
        );
    } else if view.detailed {
        print!("{}", render::system_status_detailed(&status));
    } else {
        println!("{}", render::system_status(&status));
    }
    Ok(())
}

pub fn connection(opts: &ConnectOpts, view: ViewArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(state) = device.connection_state()? else {
        bail!("device unreachable and no cached connection state");
    };
    if view.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&state).context("failed to render connection JSON")?
        );
    } else if view.detailed {
        print!("{}", render::connection_state_detailed(&state));
    } else {
        println!("{}", render::connection_state(&state));
    }
    Ok(())
}

pub fn storage(opts: &ConnectOpts, args: JsonArgs) -> Result<()> {
    let device = connect(opts)?;
    let Some(storage) = device.sms_storage_state()? else {
        bail!("device unreachable and no cached storage counters");
    };
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&storage).context("failed to render storage JSON")?
        );
    } else {
        println!("{}", render::sms_storage(&storage));
    }
    Ok(())
}
