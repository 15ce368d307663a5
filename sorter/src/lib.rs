//! # Course Download Sorter
//!
//! Watches a download directory and files structured course downloads into
//! a per-unit, per-week tree.
//!
//! ```text
//! wk3_lab_cits2002_foo.c    ──►  <base>/cits2002/src/wk3/foo.c
//! wk5_ws_abcd1234_notes.pdf ──►  <base>/abcd1234/week 5/wk5_ws_notes.pdf
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coursedrop_sorter::{SorterConfig, run};
//!
//! let config = SorterConfig::new("/home/me/Downloads", "/home/me/uni");
//! run(config).await?;
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod placement;
pub mod service;

pub use config::SorterConfig;
pub use error::{PlacementError, Result, SorterError};
pub use matcher::{CourseFile, FilenameMatcher, MatchResult};
pub use placement::{PlacementDecision, PlacementOutcome, PlacementRules, Placer, SkipReason};
pub use service::{Sorter, run};
