use std::time::Duration;

use crate::error::{AppError, Result};

pub const FEED_URL_TEMPLATE: &str = "https://statsapi.mlb.com/api/v1.1/game/{game_id}/feed/live";
pub const DATABASE_URL: &str = "sqlite:linescore.db";
pub const REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Placeholder substituted with the event id in the feed URL template.
pub const GAME_ID_PLACEHOLDER: &str = "{game_id}";

/// Delay between two poll cycles of the same event (seconds).
pub const POLL_INTERVAL_SECS: u64 = 20;

/// Per-request timeout for the live feed (seconds).
pub const FEED_TIMEOUT_SECS: u64 = 30;

/// Cache key prefix; the full key is `game:<event id>`.
pub const CACHE_KEY_PREFIX: &str = "game:";

/// In-progress records go stale quickly; keep them just past a few poll cycles.
pub const IN_PROGRESS_TTL: Duration = Duration::from_secs(10 * 60);

/// Final scores stay readable from the cache for a day.
pub const COMPLETED_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    /// Live feed URL with `{game_id}` in place of the event id (FEED_URL_TEMPLATE)
    pub feed_url_template: String,
    pub poll_interval: Duration,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let feed_url_template =
            std::env::var("FEED_URL_TEMPLATE").unwrap_or_else(|_| FEED_URL_TEMPLATE.to_string());
        if !feed_url_template.contains(GAME_ID_PLACEHOLDER) {
            return Err(AppError::Config(format!(
                "FEED_URL_TEMPLATE must contain {GAME_ID_PLACEHOLDER}"
            )));
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string()),
            redis_url: std::env::var("REDIS_URL").unwrap_or_else(|_| REDIS_URL.to_string()),
            feed_url_template,
            poll_interval: Duration::from_secs(
                std::env::var("POLL_INTERVAL_SECS")
                    .unwrap_or_else(|_| POLL_INTERVAL_SECS.to_string())
                    .parse::<u64>()
                    .map_err(|_| {
                        AppError::Config("POLL_INTERVAL_SECS must be a whole number of seconds".to_string())
                    })?,
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

pub fn cache_key(event_id: i64) -> String {
    format!("{CACHE_KEY_PREFIX}{event_id}")
}
