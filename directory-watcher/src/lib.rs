//! # Directory Watcher
//!
//! Subscribes to entries created directly under one directory and hands
//! them out in batches: block until the platform reports something, then
//! drain whatever else is already queued.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                    Directory Watcher                           │
//! ├────────────────────────────────────────────────────────────────┤
//! │                                                                │
//! │  WatchConfig ──► notify thread ──► channel ──► EventStream     │
//! │                                                     │          │
//! │                                       next_batch()  │          │
//! │                                                     ▼          │
//! │                                           Vec<CreationEvent>   │
//! └────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod watcher;

pub use config::WatchConfig;
pub use error::{Result, WatcherError};
pub use event::{CreationEvent, CreationKind};
pub use watcher::{DirectoryWatcher, EventStream, RawNotification};
