//! # smsgate-watch
//!
//! Directory-watch mode: files dropped into a watched directory become
//! outgoing SMS, with watching paused while the device is offline and
//! resumed once the keepalive loop reconnects.

mod error;
pub mod inbox;
pub mod notifier;
mod runtime;

pub use error::WatchError;
pub use notifier::Notifier;
pub use runtime::{run, start_blocking, WatchOptions};
