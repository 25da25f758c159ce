use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};

use crate::classifier::classify;
use crate::error::Result;
use crate::feed::FeedSource;
use crate::snapshot::{build_completed, build_in_progress, build_scheduled};
use crate::storage::{CacheStore, StorageGateway};
use crate::types::Stage;

/// Result of one fetch → classify → persist cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Non-terminal stage handled; poll again after the interval.
    Continue(Stage),
    /// Final result persisted; stop polling.
    Finished,
}

/// Polls one game until it is final or a cycle fails.
///
/// Cycles for the same game never overlap. A failing cycle is not retried:
/// the error ends the run and is returned to the coordinator.
pub struct EventPoller<F, C> {
    event_id: i64,
    feed: Arc<F>,
    gateway: Arc<StorageGateway<C>>,
    poll_interval: Duration,
    cycles: u32,
}

impl<F: FeedSource, C: CacheStore> EventPoller<F, C> {
    pub fn new(
        event_id: i64,
        feed: Arc<F>,
        gateway: Arc<StorageGateway<C>>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            event_id,
            feed,
            gateway,
            poll_interval,
            cycles: 0,
        }
    }

    /// Run to completion. Returns the number of cycles polled.
    pub async fn run(mut self) -> Result<u32> {
        loop {
            self.cycles += 1;
            info!(event_id = self.event_id, cycle = self.cycles, "Polling game {}", self.event_id);

            match self.poll_once().await {
                Ok(CycleOutcome::Finished) => {
                    info!(
                        event_id = self.event_id,
                        cycles = self.cycles,
                        "Game {} finished, polling complete",
                        self.event_id,
                    );
                    return Ok(self.cycles);
                }
                Ok(CycleOutcome::Continue(stage)) => {
                    debug!(
                        event_id = self.event_id,
                        stage = %stage,
                        "Game {} not final, next poll in {:?}",
                        self.event_id,
                        self.poll_interval,
                    );
                    tokio::time::sleep(self.poll_interval).await;
                }
                Err(e) => {
                    error!(
                        event_id = self.event_id,
                        cycle = self.cycles,
                        "Polling game {} aborted: {e}",
                        self.event_id,
                    );
                    return Err(e);
                }
            }
        }
    }

    pub async fn poll_once(&self) -> Result<CycleOutcome> {
        let feed = self.feed.fetch(self.event_id).await?;
        let stage = classify(&feed.game_data)?;

        match stage {
            Stage::Scheduled => {
                let snapshot = build_scheduled(&feed)?;
                self.gateway.upsert_scheduled_if_absent(&snapshot).await?;
            }
            Stage::InProgress => {
                let snapshot = build_in_progress(&feed)?;
                self.gateway.upsert_in_progress(&snapshot).await?;
            }
            Stage::Completed => {
                let snapshot = build_completed(&feed)?;
                self.gateway.upsert_completed(&snapshot).await?;
                self.gateway.commit_final_result(&snapshot).await?;
                return Ok(CycleOutcome::Finished);
            }
            Stage::Unknown => {
                debug!(event_id = self.event_id, "Game {} in unlisted state, skipping", self.event_id);
            }
        }

        Ok(CycleOutcome::Continue(stage))
    }
}
