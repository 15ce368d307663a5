//! Directory watcher implementation.

use std::io;
use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing::{debug, error, info, warn};

use crate::config::WatchConfig;
use crate::error::{Result, WatcherError};
use crate::event::CreationEvent;

/// A raw notification as delivered by the platform watcher.
pub type RawNotification = notify::Result<notify::Event>;

/// Subscription to creation events on one directory.
///
/// The subscription lives as long as this value; dropping it releases the
/// platform watch.
pub struct DirectoryWatcher {
    /// Configuration the subscription was created with.
    config: WatchConfig,

    /// Internal notify watcher, kept alive for the subscription lifetime.
    _watcher: RecommendedWatcher,

    /// Receiving side of the notification channel.
    events: EventStream,
}

impl DirectoryWatcher {
    /// Subscribe to entries created directly under `config.path`.
    pub fn subscribe(config: WatchConfig) -> Result<Self> {
        let path = config.path.clone();

        if !path.exists() {
            return Err(WatcherError::DirectoryNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(WatcherError::NotADirectory(path.display().to_string()));
        }

        let (event_tx, events) =
            EventStream::channel(config.channel_capacity, config.include_renames);

        let mut watcher = notify::recommended_watcher(move |res: RawNotification| {
            if let Err(e) = event_tx.blocking_send(res) {
                error!("Failed to forward notification: {e}");
            }
        })?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;
        info!("Watching {} for new entries", path.display());

        Ok(Self {
            config,
            _watcher: watcher,
            events,
        })
    }

    /// The watched directory.
    pub fn path(&self) -> &Path {
        &self.config.path
    }

    /// Wait for the next batch of creation events. See [`EventStream::next_batch`].
    pub async fn next_batch(&mut self) -> Result<Vec<CreationEvent>> {
        self.events.next_batch().await
    }
}

/// Receiving end of the notification channel.
///
/// Separated from [`DirectoryWatcher`] so the drain logic can be fed from any
/// sender.
pub struct EventStream {
    rx: mpsc::Receiver<RawNotification>,
    include_renames: bool,

    /// Platform queue overflows seen so far. Entries created during an
    /// overflow are never reported.
    overflows: u64,
}

impl EventStream {
    /// Wrap an existing receiver.
    pub fn new(rx: mpsc::Receiver<RawNotification>, include_renames: bool) -> Self {
        Self {
            rx,
            include_renames,
            overflows: 0,
        }
    }

    /// Create a bounded channel and the stream reading from it.
    pub fn channel(
        capacity: usize,
        include_renames: bool,
    ) -> (mpsc::Sender<RawNotification>, Self) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (tx, Self::new(rx, include_renames))
    }

    /// Block until at least one notification arrives, then drain everything
    /// already buffered.
    ///
    /// Returns creation events in arrival order. The batch may be empty when
    /// the wake was caused only by notifications that are not creations.
    /// Interrupted waits are retried; any other notify error or a closed
    /// channel is returned as an error.
    pub async fn next_batch(&mut self) -> Result<Vec<CreationEvent>> {
        let mut batch = Vec::new();

        loop {
            let Some(first) = self.rx.recv().await else {
                return Err(WatcherError::ChannelClosed);
            };

            if is_interrupted(&first) {
                debug!("Wait interrupted, retrying");
                continue;
            }

            self.absorb(first, &mut batch)?;
            break;
        }

        let mut drained = 1usize;
        loop {
            match self.rx.try_recv() {
                Ok(notification) => {
                    drained += 1;
                    self.absorb(notification, &mut batch)?;
                }
                // Nothing more right now. A disconnect surfaces on the next wait.
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
            }
        }

        debug!(
            "Drained {drained} notifications into {} creation events",
            batch.len()
        );
        Ok(batch)
    }

    fn absorb(
        &mut self,
        notification: RawNotification,
        batch: &mut Vec<CreationEvent>,
    ) -> Result<()> {
        match notification {
            Ok(event) if event.need_rescan() => {
                self.overflows += 1;
                warn!(
                    "Notification queue overflowed ({} so far); new entries may have been missed",
                    self.overflows
                );
                Ok(())
            }
            Ok(event) => {
                batch.extend(CreationEvent::from_notify(event, self.include_renames));
                Ok(())
            }
            Err(e) if is_interrupted_error(&e) => {
                debug!("Ignoring interrupted notification: {e}");
                Ok(())
            }
            Err(e) => Err(WatcherError::Notify(e)),
        }
    }
}

fn is_interrupted(notification: &RawNotification) -> bool {
    notification.as_ref().is_err_and(is_interrupted_error)
}

fn is_interrupted_error(err: &notify::Error) -> bool {
    matches!(&err.kind, notify::ErrorKind::Io(e) if e.kind() == io::ErrorKind::Interrupted)
}
