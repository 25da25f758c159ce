use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::feed::FeedSource;
use crate::poller::EventPoller;
use crate::storage::{CacheStore, StorageGateway};

/// How one game's polling run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Finished { event_id: i64, cycles: u32 },
    Aborted { event_id: i64, reason: String },
}

/// Fans out one poller task per game and waits for all of them.
pub struct PollingCoordinator<F, C> {
    feed: Arc<F>,
    gateway: Arc<StorageGateway<C>>,
    poll_interval: Duration,
}

impl<F, C> PollingCoordinator<F, C>
where
    F: FeedSource + 'static,
    C: CacheStore + 'static,
{
    pub fn new(feed: Arc<F>, gateway: Arc<StorageGateway<C>>, poll_interval: Duration) -> Self {
        Self {
            feed,
            gateway,
            poll_interval,
        }
    }

    /// Poll every game concurrently until each one finishes or aborts.
    /// One game's failure never cancels the others.
    pub async fn run(&self, event_ids: Vec<i64>) -> Vec<EventOutcome> {
        if event_ids.is_empty() {
            warn!("No games to poll");
            return Vec::new();
        }
        info!(games = event_ids.len(), "Starting pollers for {} games", event_ids.len());

        let mut tasks = JoinSet::new();
        for event_id in event_ids {
            let poller = EventPoller::new(
                event_id,
                Arc::clone(&self.feed),
                Arc::clone(&self.gateway),
                self.poll_interval,
            );
            tasks.spawn(async move {
                match poller.run().await {
                    Ok(cycles) => EventOutcome::Finished { event_id, cycles },
                    Err(e) => EventOutcome::Aborted {
                        event_id,
                        reason: e.to_string(),
                    },
                }
            });
        }

        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => error!("Poller task failed to complete: {e}"),
            }
        }

        let finished = outcomes
            .iter()
            .filter(|o| matches!(o, EventOutcome::Finished { .. }))
            .count();
        info!(
            finished,
            aborted = outcomes.len() - finished,
            "All games processed"
        );
        outcomes
    }
}
