//! Error types for the directory watcher.

use thiserror::Error;

/// Result type alias for watcher operations.
pub type Result<T> = std::result::Result<T, WatcherError>;

/// Errors that can occur while subscribing to or waiting on a directory.
///
/// Every variant is fatal for the watch loop: the subscription is gone or was
/// never established.
#[derive(Error, Debug)]
pub enum WatcherError {
    /// Directory not found.
    #[error("directory not found: {0}")]
    DirectoryNotFound(String),

    /// Path exists but is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(String),

    /// Notify error, either while subscribing or while waiting.
    #[error("notify error: {0}")]
    Notify(#[from] notify::Error),

    /// The notification channel closed; the platform watcher has gone away.
    #[error("event channel closed")]
    ChannelClosed,
}
