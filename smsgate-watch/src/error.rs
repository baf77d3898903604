use thiserror::Error;

/// Error surface of the watch-mode runtime.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    #[error(transparent)]
    Device(#[from] smsgate_device::DeviceError),

    #[error("watch runtime error: {0}")]
    Runtime(String),
}
