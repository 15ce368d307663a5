//! Configuration types for directory watching.

use std::path::PathBuf;

/// Default capacity of the channel between the notify thread and the loop.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Configuration for the watched directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Path to the directory. Only its direct children are watched.
    pub path: PathBuf,

    /// Whether entries renamed into the directory count as created.
    pub include_renames: bool,

    /// Number of raw notifications buffered before the notify thread blocks.
    pub channel_capacity: usize,
}

impl WatchConfig {
    /// Create a new watch config.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            include_renames: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Treat rename-into notifications as creations.
    pub fn include_renames(mut self, include: bool) -> Self {
        self.include_renames = include;
        self
    }
}
