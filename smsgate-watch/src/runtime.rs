//! Watch-mode runtime.
//!
//! Thread layout: the tokio runtime drives the event loop and the ctrl-c
//! handler, the keepalive loop runs on a dedicated blocking thread, and every
//! device RPC happens on blocking threads too — the device core is
//! synchronous by design.
//!
//! Lifetime rules: the keepalive loop owns the session. When it ends —
//! ctrl-c flipped the running flag, or its on-dead callback gave up — the
//! watcher is torn down and the runtime returns.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::task;

use smsgate_device::Device;

use crate::error::WatchError;
use crate::inbox;
use crate::notifier::{self, Notifier};

#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory to watch for dropped SMS files.
    pub path: PathBuf,
    /// Where to move processed files; `None` leaves them in place.
    pub move_to: Option<PathBuf>,
    /// Also process files already present and modified within this window;
    /// zero disables the scan.
    pub reprocess: Duration,
}

/// Run watch mode on a fresh tokio runtime, blocking the calling thread
/// until the session ends.
pub fn start_blocking(device: Arc<Device>, options: WatchOptions) -> Result<(), WatchError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| WatchError::Runtime(format!("tokio runtime: {err}")))?;
    runtime.block_on(run(device, options))
}

/// The watch-mode session.
pub async fn run(device: Arc<Device>, options: WatchOptions) -> Result<(), WatchError> {
    let (notifier, mut events) = Notifier::new()?;
    let notifier = Arc::new(notifier);

    // Keepalive first: wait_alive below blocks until the device shows up
    // only while the coordinator is running.
    let keepalive = {
        let device = device.clone();
        let notifier = notifier.clone();
        let path = options.path.clone();
        task::spawn_blocking(move || {
            device.run_keepalive(|d| {
                tracing::error!("device went offline; pausing directory watch");
                if let Err(err) = notifier.unwatch(&path) {
                    tracing::warn!(error = %err, "unable to pause watch");
                }
                if let Err(err) = d.wait_alive() {
                    tracing::error!(error = %err, "waiting for the device failed");
                    return false;
                }
                if d.is_running() {
                    tracing::info!("device back online; resuming directory watch");
                    if let Err(err) = notifier.watch(&path) {
                        tracing::error!(error = %err, "unable to resume watch");
                        return false;
                    }
                }
                d.is_running()
            })
        })
    };

    let signal_task = {
        let device = device.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("received ctrl-c; stopping keepalive");
                    device.stop();
                }
                Err(err) => tracing::error!(error = %err, "ctrl-c handler failed"),
            }
        })
    };

    // Give the keepalive thread a moment to mark the coordinator running, so
    // the startup wait below blocks while the device is offline instead of
    // falling through after a single probe.
    for _ in 0..50 {
        if device.is_running() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    tracing::debug!("waiting for device to be alive");
    {
        let device = device.clone();
        task::spawn_blocking(move || device.wait_alive())
            .await
            .map_err(|err| WatchError::Runtime(format!("wait task join failure: {err}")))??;
    }

    if !options.reprocess.is_zero() {
        tracing::info!(
            window_secs = options.reprocess.as_secs(),
            "reprocessing recently dropped files"
        );
        let device = device.clone();
        let dir = options.path.clone();
        let move_to = options.move_to.clone();
        let window = options.reprocess;
        task::spawn_blocking(move || inbox::reprocess(&device, &dir, window, move_to.as_deref()))
            .await
            .map_err(|err| WatchError::Runtime(format!("reprocess join failure: {err}")))?;
    }

    notifier.watch(&options.path)?;
    tracing::info!(path = %options.path.display(), "watching directory for new sms files");

    let event_loop = {
        let device = device.clone();
        let move_to = options.move_to.clone();
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let event = match event {
                    Ok(event) => event,
                    Err(err) => {
                        tracing::warn!(error = %err, "watch event error");
                        continue;
                    }
                };
                if !notifier::is_arrival(&event.kind) {
                    continue;
                }
                for path in event.paths {
                    if !path.is_file() {
                        continue;
                    }
                    tracing::debug!(path = %path.display(), "new file in watch directory");
                    let device = device.clone();
                    let move_to = move_to.clone();
                    let join = task::spawn_blocking(move || {
                        inbox::process_file(&device, &path, move_to.as_deref())
                    })
                    .await;
                    if let Err(err) = join {
                        tracing::error!(error = %err, "file processing task failed");
                    }
                }
            }
            tracing::debug!("watch event channel closed");
        })
    };

    let keepalive_result = keepalive.await;
    tracing::debug!("keepalive finished; shutting watch mode down");

    // Dropping the notifier drops the OS watcher; the event channel closes
    // and the event loop drains out.
    drop(notifier);
    let _ = event_loop.await;
    signal_task.abort();

    match keepalive_result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(err.into()),
        Err(err) => Err(WatchError::Runtime(format!(
            "keepalive task join failure: {err}"
        ))),
    }
}
