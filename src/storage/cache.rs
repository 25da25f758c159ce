use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::{debug, info};

use crate::error::Result;

/// Key/hash cache with per-key expiry.
#[async_trait]
pub trait CacheStore: Send {
    /// One field of the hash at `key`; `None` when the key or field does not exist.
    async fn get_field(&mut self, key: &str, field: &str) -> Result<Option<String>>;

    /// Replace the whole hash at `key` with `fields`. Clears any expiry.
    async fn set_record(&mut self, key: &str, fields: &[(&'static str, String)]) -> Result<()>;

    async fn set_expiry(&mut self, key: &str, ttl: Duration) -> Result<()>;
}

/// Redis-backed cache. Each event is one hash under `game:<id>`.
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self> {
        let client = Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;

        info!("Connected to Redis at {url}");

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCache {
    async fn get_field(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        let value: Option<String> = self.conn.hget(key, field).await?;
        Ok(value)
    }

    async fn set_record(&mut self, key: &str, fields: &[(&'static str, String)]) -> Result<()> {
        let _: () = redis::pipe()
            .atomic()
            .del(key)
            .ignore()
            .hset_multiple(key, fields)
            .ignore()
            .query_async(&mut self.conn)
            .await?;

        debug!(key = %key, fields = fields.len(), "Replaced cache record");
        Ok(())
    }

    async fn set_expiry(&mut self, key: &str, ttl: Duration) -> Result<()> {
        let seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let _: () = self.conn.expire(key, seconds).await?;
        Ok(())
    }
}
