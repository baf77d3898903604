//! Directory watch service.
//!
//! Filesystem events are forwarded onto a tokio channel; subscription
//! management (`watch`/`unwatch`) is safe from any thread, which the
//! keepalive loop's on-dead callback relies on to pause and resume watching.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use notify::event::{ModifyKind, RenameMode};
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::WatchError;

pub struct Notifier {
    watcher: Mutex<RecommendedWatcher>,
}

impl Notifier {
    /// Create the watcher; events arrive on the returned channel until the
    /// `Notifier` is dropped.
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<notify::Result<Event>>), WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();
        let watcher = recommended_watcher(move |event| {
            let _ = tx.send(event);
        })?;
        Ok((
            Self {
                watcher: Mutex::new(watcher),
            },
            rx,
        ))
    }

    /// Subscribe a directory tree.
    pub fn watch(&self, path: &Path) -> Result<(), WatchError> {
        self.lock().watch(path, RecursiveMode::Recursive)?;
        tracing::debug!(path = %path.display(), "watching directory");
        Ok(())
    }

    /// Drop the subscription for a directory tree.
    pub fn unwatch(&self, path: &Path) -> Result<(), WatchError> {
        self.lock().unwatch(path)?;
        tracing::debug!(path = %path.display(), "stopped watching directory");
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, RecommendedWatcher> {
        self.watcher.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Events that mean "a new file showed up": creations plus moves into the
/// watched tree.
pub fn is_arrival(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Any))
    )
}
