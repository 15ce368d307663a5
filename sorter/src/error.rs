//! Error types for the sorter.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sorter operations.
pub type Result<T> = std::result::Result<T, SorterError>;

/// Fatal errors. Any of these ends the watch loop.
#[derive(Error, Debug)]
pub enum SorterError {
    /// Subscription or wait failure.
    #[error("watcher error: {0}")]
    Watcher(#[from] coursedrop_directory_watcher::WatcherError),

    /// The filename pattern failed to compile.
    #[error("invalid filename pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Per-file placement failures. These are logged and the loop carries on.
#[derive(Error, Debug)]
pub enum PlacementError {
    /// Destination directory could not be created.
    #[error("failed to create {}: {source}", path.display())]
    CreateDirectory { path: PathBuf, source: io::Error },

    /// Probing a candidate destination failed.
    #[error("failed to check {}: {source}", path.display())]
    CollisionCheck { path: PathBuf, source: io::Error },

    /// Every candidate name up to the attempt cap is taken.
    #[error("no free name for {} after {attempts} attempts", path.display())]
    CollisionSpaceExhausted { path: PathBuf, attempts: u32 },

    /// The rename itself failed.
    #[error("failed to move {} -> {}: {source}", from.display(), to.display())]
    Move {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}
