//! Configuration for the sorter.

use std::path::PathBuf;

use coursedrop_directory_watcher::WatchConfig;

use crate::error::{Result, SorterError};
use crate::placement::PlacementRules;

/// Default cap on collision suffixes tried before giving up on a file.
pub const DEFAULT_MAX_COLLISION_ATTEMPTS: u32 = 10_000;

/// Immutable configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct SorterConfig {
    /// Directory to watch for downloads.
    pub watch: WatchConfig,

    /// Root of the organized tree.
    pub base_dir: PathBuf,

    /// Course placement table.
    pub rules: PlacementRules,

    /// Highest collision suffix to try.
    pub max_collision_attempts: u32,
}

impl SorterConfig {
    /// Create a new config with the default rule table.
    pub fn new(watch_dir: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            watch: WatchConfig::new(watch_dir),
            base_dir: base_dir.into(),
            rules: PlacementRules::default(),
            max_collision_attempts: DEFAULT_MAX_COLLISION_ATTEMPTS,
        }
    }

    /// Treat entries renamed into the watched directory as new downloads.
    pub fn include_renames(mut self, include: bool) -> Self {
        self.watch = self.watch.include_renames(include);
        self
    }

    /// Set the collision attempt cap.
    pub fn with_max_collision_attempts(mut self, attempts: u32) -> Self {
        self.max_collision_attempts = attempts;
        self
    }

    /// Directory being watched.
    pub fn watch_dir(&self) -> &std::path::Path {
        &self.watch.path
    }

    /// Check the config before the watch starts.
    pub fn validate(&self) -> Result<()> {
        if !self.watch.path.is_absolute() {
            return Err(SorterError::Config(format!(
                "watch directory must be absolute: {}",
                self.watch.path.display()
            )));
        }

        if !self.base_dir.is_absolute() {
            return Err(SorterError::Config(format!(
                "base directory must be absolute: {}",
                self.base_dir.display()
            )));
        }

        // Missing is fine; it is created on first placement.
        if self.base_dir.exists() && !self.base_dir.is_dir() {
            return Err(SorterError::Config(format!(
                "base directory is not a directory: {}",
                self.base_dir.display()
            )));
        }

        Ok(())
    }
}
