use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::config::{Config, FEED_TIMEOUT_SECS, GAME_ID_PLACEHOLDER};
use crate::error::Result;
use crate::feed::document::FeedDocument;

/// Source of live feed documents, one fetch per poll cycle.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, event_id: i64) -> Result<FeedDocument>;
}

/// HTTP client for the live game feed. No retries: a failed fetch is returned
/// to the poller as-is.
pub struct FeedClient {
    client: reqwest::Client,
    url_template: String,
}

impl FeedClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        Self::with_template(&cfg.feed_url_template)
    }

    pub fn with_template(url_template: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(FEED_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url_template: url_template.to_string(),
        })
    }

    pub fn url_for(&self, event_id: i64) -> String {
        self.url_template
            .replace(GAME_ID_PLACEHOLDER, &event_id.to_string())
    }
}

#[async_trait]
impl FeedSource for FeedClient {
    async fn fetch(&self, event_id: i64) -> Result<FeedDocument> {
        let url = self.url_for(event_id);
        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        debug!(event_id, bytes = body.len(), "Fetched live feed");
        FeedDocument::from_slice(&body)
    }
}
