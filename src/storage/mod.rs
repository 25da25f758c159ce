pub mod cache;

use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::config::{cache_key, COMPLETED_TTL, IN_PROGRESS_TTL};
use crate::db::results::{FinalResultCommit, ResultStore};
use crate::error::Result;
use crate::types::{CompletedSnapshot, InProgressSnapshot, ScheduledSnapshot};

pub use cache::{CacheStore, RedisCache};

/// Sole owner of the cache and durable-store handles shared by every poller.
///
/// Each operation holds the lock of the one store it touches for its own
/// duration only, and never holds both locks at once.
pub struct StorageGateway<C> {
    cache: Mutex<C>,
    results: Mutex<ResultStore>,
}

impl<C: CacheStore> StorageGateway<C> {
    pub fn new(cache: C, results: ResultStore) -> Self {
        Self {
            cache: Mutex::new(cache),
            results: Mutex::new(results),
        }
    }

    /// Write the scheduled record only if nothing is cached for the game yet,
    /// so later progress is never overwritten. Returns whether a write happened.
    pub async fn upsert_scheduled_if_absent(&self, snapshot: &ScheduledSnapshot) -> Result<bool> {
        let key = cache_key(snapshot.event_id);
        let mut cache = self.cache.lock().await;

        if cache.get_field(&key, "status").await?.is_some() {
            info!(event_id = snapshot.event_id, "Game {} already cached", snapshot.event_id);
            return Ok(false);
        }

        cache.set_record(&key, &snapshot.cache_fields()).await?;
        info!(event_id = snapshot.event_id, "Game {} written to cache", snapshot.event_id);
        Ok(true)
    }

    pub async fn upsert_in_progress(&self, snapshot: &InProgressSnapshot) -> Result<()> {
        let key = cache_key(snapshot.event_id);
        let mut cache = self.cache.lock().await;

        cache.set_record(&key, &snapshot.cache_fields()).await?;
        cache.set_expiry(&key, IN_PROGRESS_TTL).await?;
        Ok(())
    }

    pub async fn upsert_completed(&self, snapshot: &CompletedSnapshot) -> Result<()> {
        let key = cache_key(snapshot.event_id);
        let mut cache = self.cache.lock().await;

        cache.set_record(&key, &snapshot.cache_fields()).await?;
        cache.set_expiry(&key, COMPLETED_TTL).await?;
        let record = serde_json::to_string(snapshot).unwrap_or_default();
        debug!(event_id = snapshot.event_id, record = %record, "Completed record");
        info!(event_id = snapshot.event_id, "Final score cached for game {}", snapshot.event_id);
        Ok(())
    }

    pub async fn commit_final_result(&self, snapshot: &CompletedSnapshot) -> Result<FinalResultCommit> {
        let results = self.results.lock().await;
        results.commit_final_result(snapshot).await
    }
}
