//! The watch loop: wait, drain, match, place.

use coursedrop_directory_watcher::{CreationEvent, DirectoryWatcher};
use tracing::{debug, info};

use crate::config::SorterConfig;
use crate::error::Result;
use crate::matcher::{FilenameMatcher, MatchResult};
use crate::placement::{PlacementOutcome, Placer};

/// Matches new entries and places the ones that fit.
pub struct Sorter {
    matcher: FilenameMatcher,
    placer: Placer,
}

impl Sorter {
    /// Compile the pattern and build the placer.
    pub fn new(config: &SorterConfig) -> Result<Self> {
        Ok(Self {
            matcher: FilenameMatcher::new()?,
            placer: Placer::new(config),
        })
    }

    /// Process one drained batch, one event at a time, in arrival order.
    pub async fn handle_batch(&self, batch: Vec<CreationEvent>) -> Vec<PlacementOutcome> {
        let mut outcomes = Vec::new();
        for event in &batch {
            if let Some(outcome) = self.handle_event(event).await {
                outcomes.push(outcome);
            }
        }
        outcomes
    }

    /// Process one event. `None` if it was skipped before placement.
    pub async fn handle_event(&self, event: &CreationEvent) -> Option<PlacementOutcome> {
        if !event.is_candidate() {
            debug!("Ignoring {event:?}");
            return None;
        }

        let name = event.name.as_deref()?;
        debug!("Handling {:?} entry {name}", event.kind);
        self.handle_name(name).await
    }

    /// Match a bare name and place it if it fits.
    pub async fn handle_name(&self, name: &str) -> Option<PlacementOutcome> {
        match self.matcher.match_name(name) {
            MatchResult::NoMatch { name } => {
                debug!("No match for {name}");
                None
            }
            MatchResult::Matched(file) => {
                let outcome = self.placer.place(name, &file).await;
                outcome.report();
                Some(outcome)
            }
        }
    }
}

/// Run the sorter until a fatal error.
///
/// Per-file problems are logged and never end the loop; only a failed
/// subscription, a failed wait or an invalid config returns.
pub async fn run(config: SorterConfig) -> Result<()> {
    config.validate()?;

    let sorter = Sorter::new(&config)?;
    let mut watcher = DirectoryWatcher::subscribe(config.watch.clone())?;

    info!(
        "Sorting downloads from {} into {}",
        watcher.path().display(),
        config.base_dir.display()
    );

    loop {
        let batch = watcher.next_batch().await?;
        sorter.handle_batch(batch).await;
    }
}
