//! Destination derivation and the move itself.
//!
//! Layout under `<base>/<code>/`:
//!
//! - labs of source-heavy units go to `src/wk<week>/`
//! - other labs go to `week <week>/lab/`
//! - everything else goes to `week <week>/`
//!
//! Labs of plain-name units keep only `<title>.<ext>` unless the extension
//! is excluded; all other files keep the `wk<week>_<type>_` prefix.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::SorterConfig;
use crate::error::PlacementError;
use crate::matcher::CourseFile;

/// Fixed course table consulted by [`PlacementRules::decide`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementRules {
    /// Units whose labs are filed under `src/wk<week>/`.
    pub source_heavy_courses: Vec<String>,

    /// Units whose lab files drop the week/type prefix.
    pub plain_name_courses: Vec<String>,

    /// Extensions that keep the prefix even for plain-name units.
    pub plain_name_excluded_extensions: Vec<String>,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            source_heavy_courses: vec!["cits2002".to_string(), "cits2211".to_string()],
            plain_name_courses: vec!["cits2002".to_string(), "stat2402".to_string()],
            plain_name_excluded_extensions: vec!["Rmd".to_string(), "html".to_string()],
        }
    }
}

impl PlacementRules {
    /// Whether labs of this unit go under `src/`.
    pub fn is_source_heavy(&self, course_code: &str) -> bool {
        self.source_heavy_courses.iter().any(|c| c == course_code)
    }

    /// Whether the destination name is just `<title>.<ext>`.
    pub fn keeps_plain_name(&self, file: &CourseFile) -> bool {
        file.is_lab()
            && self.plain_name_courses.iter().any(|c| *c == file.course_code)
            && !self
                .plain_name_excluded_extensions
                .iter()
                .any(|e| *e == file.extension)
    }

    /// Compute where a file goes. Pure; touches nothing on disk.
    pub fn decide(&self, base_dir: &Path, file: &CourseFile) -> PlacementDecision {
        let mut directory = base_dir.join(&file.course_code);

        if file.is_lab() && self.is_source_heavy(&file.course_code) {
            directory.push("src");
            directory.push(format!("wk{}", file.week));
        } else {
            directory.push(format!("week {}", file.week));
            if file.is_lab() {
                directory.push("lab");
            }
        }

        let stem = if self.keeps_plain_name(file) {
            file.title.clone()
        } else {
            format!("wk{}_{}_{}", file.week, file.activity, file.title)
        };

        PlacementDecision {
            directory,
            stem,
            extension: file.extension.clone(),
        }
    }
}

/// Destination for one file, before collision handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementDecision {
    /// Directory the file is moved into.
    pub directory: PathBuf,

    /// File name without extension.
    pub stem: String,

    /// Extension without the dot.
    pub extension: String,
}

impl PlacementDecision {
    /// Preferred file name.
    pub fn file_name(&self) -> String {
        self.candidate(0)
    }

    /// Preferred full path.
    pub fn path(&self) -> PathBuf {
        self.directory.join(self.file_name())
    }

    /// Name for collision attempt `n`; `0` is the preferred name.
    pub fn candidate(&self, n: u32) -> String {
        if n == 0 {
            format!("{}.{}", self.stem, self.extension)
        } else {
            format!("{}-{n}.{}", self.stem, self.extension)
        }
    }

    fn candidate_path(&self, n: u32) -> PathBuf {
        self.directory.join(self.candidate(n))
    }
}

/// Why a file was left where it is without being treated as a failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Destination directory path is unusable for this unit code.
    #[error("unit code invalid: {course_code}")]
    InvalidUnitCode { course_code: String },

    /// The download disappeared before it could be moved.
    #[error("source file no longer exists")]
    SourceMissing,
}

/// Result of placing one file.
#[derive(Debug)]
pub enum PlacementOutcome {
    /// File was renamed into place.
    Moved { from: PathBuf, to: PathBuf },

    /// File was left in the watched directory.
    Skipped { name: String, reason: SkipReason },

    /// Placement failed; the file stays in the watched directory.
    Failed { name: String, error: PlacementError },
}

impl PlacementOutcome {
    /// Emit the outcome as a log line.
    pub fn report(&self) {
        match self {
            Self::Moved { from, to } => {
                info!("Moved {} -> {}", from.display(), to.display());
            }
            Self::Skipped { name, reason } => warn!("Skipped {name}: {reason}"),
            Self::Failed { name, error } => error!("Failed to place {name}: {error}"),
        }
    }

    /// Destination, if the file was moved.
    pub fn destination(&self) -> Option<&Path> {
        match self {
            Self::Moved { to, .. } => Some(to.as_path()),
            _ => None,
        }
    }
}

/// Moves matched files from the watched directory into the organized tree.
pub struct Placer {
    source_dir: PathBuf,
    base_dir: PathBuf,
    rules: PlacementRules,
    max_collision_attempts: u32,

    /// Held across the free-name probe and the rename.
    move_lock: Mutex<()>,
}

impl Placer {
    /// Create a placer from the startup config.
    pub fn new(config: &SorterConfig) -> Self {
        Self {
            source_dir: config.watch.path.clone(),
            base_dir: config.base_dir.clone(),
            rules: config.rules.clone(),
            max_collision_attempts: config.max_collision_attempts,
            move_lock: Mutex::new(()),
        }
    }

    /// Move `original_name` from the watched directory to its destination.
    ///
    /// Never panics and never returns an error: every failure becomes an
    /// outcome so the watch loop can continue.
    pub async fn place(&self, original_name: &str, file: &CourseFile) -> PlacementOutcome {
        let decision = self.rules.decide(&self.base_dir, file);
        let from = self.source_dir.join(original_name);

        if let Err(e) = fs::create_dir_all(&decision.directory).await {
            if is_invalid_component(&e) && is_directory(&self.base_dir).await {
                debug!("Cannot create {}: {e}", decision.directory.display());
                return PlacementOutcome::Skipped {
                    name: original_name.to_string(),
                    reason: SkipReason::InvalidUnitCode {
                        course_code: file.course_code.clone(),
                    },
                };
            }

            return PlacementOutcome::Failed {
                name: original_name.to_string(),
                error: PlacementError::CreateDirectory {
                    path: decision.directory,
                    source: e,
                },
            };
        }

        let _guard = self.move_lock.lock().await;

        let to = match self.free_destination(&decision).await {
            Ok(to) => to,
            Err(error) => {
                return PlacementOutcome::Failed {
                    name: original_name.to_string(),
                    error,
                };
            }
        };

        info!("Moving {} -> {}", from.display(), to.display());

        let Err(e) = fs::rename(&from, &to).await else {
            return PlacementOutcome::Moved { from, to };
        };

        if e.kind() == io::ErrorKind::NotFound && !source_exists(&from).await {
            return PlacementOutcome::Skipped {
                name: original_name.to_string(),
                reason: SkipReason::SourceMissing,
            };
        }

        PlacementOutcome::Failed {
            name: original_name.to_string(),
            error: PlacementError::Move {
                from,
                to,
                source: e,
            },
        }
    }

    /// Lowest-numbered candidate path with nothing at it.
    async fn free_destination(
        &self,
        decision: &PlacementDecision,
    ) -> Result<PathBuf, PlacementError> {
        for n in 0..=self.max_collision_attempts {
            let candidate = decision.candidate_path(n);

            match fs::symlink_metadata(&candidate).await {
                Ok(_) => debug!("{} is taken", candidate.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(candidate),
                Err(e) => {
                    return Err(PlacementError::CollisionCheck {
                        path: candidate,
                        source: e,
                    });
                }
            }
        }

        Err(PlacementError::CollisionSpaceExhausted {
            path: decision.path(),
            attempts: self.max_collision_attempts,
        })
    }
}

fn is_invalid_component(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotADirectory | io::ErrorKind::InvalidInput | io::ErrorKind::InvalidFilename
    )
}

async fn is_directory(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

async fn source_exists(path: &Path) -> bool {
    fs::symlink_metadata(path).await.is_ok()
}
