//! Test doubles and fixtures shared by the unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;

use crate::db::ResultStore;
use crate::error::{AppError, Result};
use crate::feed::{FeedDocument, FeedSource};
use crate::storage::{CacheStore, StorageGateway};

// ---------------------------------------------------------------------------
// Feed fixtures
// ---------------------------------------------------------------------------

/// A live feed payload with every path the snapshot builders read.
/// Home leads 5-3 in the top of the 7th, one out, runner on second.
pub fn feed_json(event_id: i64, code: &str) -> Value {
    json!({
        "gamePk": event_id,
        "gameData": {
            "game": { "pk": event_id, "type": "R", "season": "2026" },
            "datetime": { "dateTime": "2026-10-18T23:05:00Z", "dayNight": "night" },
            "status": { "abstractGameState": "Live", "codedGameState": code },
            "players": {
                "ID605141": { "id": 605141, "fullName": "Mookie Betts" },
                "ID543037": { "id": 543037, "fullName": "Gerrit Cole" },
                "ID660271": { "id": 660271, "fullName": "Shohei Ohtani" }
            }
        },
        "liveData": {
            "linescore": {
                "currentInning": 7,
                "isTopInning": true,
                "outs": 1,
                "teams": {
                    "home": { "runs": 5, "hits": 9, "errors": 0 },
                    "away": { "runs": 3, "hits": 6, "errors": 1 }
                }
            },
            "plays": {
                "currentPlay": {
                    "matchup": {
                        "batter": { "id": 605141, "fullName": "Mookie Betts" },
                        "pitcher": { "id": 543037, "fullName": "Gerrit Cole" },
                        "postOnSecond": { "id": 660271, "fullName": "Shohei Ohtani" }
                    }
                }
            }
        }
    })
}

pub fn feed_from(v: Value) -> FeedDocument {
    match v {
        Value::Object(root) => FeedDocument::from_root(root).expect("fixture has both sections"),
        other => panic!("fixture is not an object: {other}"),
    }
}

// ---------------------------------------------------------------------------
// ScriptedFeed
// ---------------------------------------------------------------------------

type Script = VecDeque<Result<FeedDocument>>;

/// Returns queued documents in order. Per-game scripts take precedence over
/// the shared script.
#[derive(Default)]
pub struct ScriptedFeed {
    shared: Mutex<Script>,
    per_event: Mutex<HashMap<i64, Script>>,
    fetches: AtomicU32,
}

impl ScriptedFeed {
    pub fn new(responses: Vec<Result<FeedDocument>>) -> Self {
        Self {
            shared: Mutex::new(responses.into()),
            ..Self::default()
        }
    }

    pub fn by_event(scripts: Vec<(i64, Vec<Result<FeedDocument>>)>) -> Self {
        Self {
            per_event: Mutex::new(
                scripts
                    .into_iter()
                    .map(|(id, responses)| (id, responses.into()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn fetches(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedSource for ScriptedFeed {
    async fn fetch(&self, event_id: i64) -> Result<FeedDocument> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let next = {
            let mut per_event = self.per_event.lock().unwrap();
            match per_event.get_mut(&event_id) {
                Some(script) => script.pop_front(),
                None => self.shared.lock().unwrap().pop_front(),
            }
        };
        next.unwrap_or_else(|| Err(AppError::Decode(format!("feed script exhausted for {event_id}"))))
    }
}

// ---------------------------------------------------------------------------
// MemoryCache
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct CachedRecord {
    pub fields: HashMap<String, String>,
    pub ttl: Option<Duration>,
}

#[derive(Default)]
struct MemoryState {
    records: HashMap<String, CachedRecord>,
    record_writes: u32,
    lookups: u32,
    failing: bool,
}

/// In-memory `CacheStore`. Clones share state so a test can inspect what the
/// gateway wrote.
#[derive(Clone, Default)]
pub struct MemoryCache {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryCache {
    /// Every later operation fails with a cache error.
    pub fn fail_all(&self) {
        self.state.lock().unwrap().failing = true;
    }

    pub fn record(&self, key: &str) -> Option<CachedRecord> {
        self.state.lock().unwrap().records.get(key).cloned()
    }

    pub fn record_writes(&self) -> u32 {
        self.state.lock().unwrap().record_writes
    }

    pub fn lookups(&self) -> u32 {
        self.state.lock().unwrap().lookups
    }

    fn check(state: &MemoryState) -> Result<()> {
        if state.failing {
            return Err(AppError::Cache(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "cache unavailable",
            ))));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheStore for MemoryCache {
    async fn get_field(&mut self, key: &str, field: &str) -> Result<Option<String>> {
        let mut state = self.state.lock().unwrap();
        state.lookups += 1;
        Self::check(&state)?;
        Ok(state
            .records
            .get(key)
            .and_then(|r| r.fields.get(field).cloned()))
    }

    async fn set_record(&mut self, key: &str, fields: &[(&'static str, String)]) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        state.record_writes += 1;
        let record = CachedRecord {
            fields: fields
                .iter()
                .map(|(f, v)| (f.to_string(), v.clone()))
                .collect(),
            ttl: None,
        };
        state.records.insert(key.to_string(), record);
        Ok(())
    }

    async fn set_expiry(&mut self, key: &str, ttl: Duration) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        Self::check(&state)?;
        if let Some(record) = state.records.get_mut(key) {
            record.ttl = Some(ttl);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Durable store
// ---------------------------------------------------------------------------

/// Single-connection in-memory SQLite with the schema applied and two past
/// games seeded: 42 (home 147, away 119) and 43, with picks on each.
pub async fn memory_pool() -> sqlx::SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations apply");

    sqlx::query(
        r#"
        INSERT INTO games (id, home_team_id, away_team_id, date) VALUES
            (42, 147, 119, '2026-04-01'),
            (43, 111, 136, '2026-04-01');
        INSERT INTO predictions (game_id, user_id, picked_home) VALUES
            (42, 'home-fan', 1),
            (42, 'away-fan', 0),
            (43, 'home-fan', 1);
        "#,
    )
    .execute(&pool)
    .await
    .expect("seed rows");

    pool
}

pub async fn memory_gateway(cache: MemoryCache) -> (StorageGateway<MemoryCache>, sqlx::SqlitePool) {
    let pool = memory_pool().await;
    (StorageGateway::new(cache, ResultStore::new(pool.clone())), pool)
}
