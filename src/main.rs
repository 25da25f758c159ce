mod classifier;
mod config;
mod coordinator;
mod db;
mod error;
mod feed;
mod poller;
mod snapshot;
mod storage;
#[cfg(test)]
mod testing;
mod types;

use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::coordinator::{EventOutcome, PollingCoordinator};
use crate::db::ResultStore;
use crate::error::Result;
use crate::feed::FeedClient;
use crate::storage::{RedisCache, StorageGateway};

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    info!("Initializing...");

    // --- Stores ---
    let pool = db::connect(&cfg.database_url).await?;
    let cache = RedisCache::connect(&cfg.redis_url).await?;
    let gateway = Arc::new(StorageGateway::new(cache, ResultStore::new(pool.clone())));

    // --- Today's games ---
    let games = db::todays_games(&pool).await?;
    info!("Found {} games scheduled for today", games.len());
    for game in &games {
        info!(
            event_id = game.id,
            "Game {}: team {} at team {} on {}",
            game.id, game.away_team_id, game.home_team_id, game.date,
        );
    }
    let game_ids = games.iter().map(|g| g.id).collect();

    // --- Poll until every game is final or aborted ---
    let feed = Arc::new(FeedClient::new(&cfg)?);
    let coordinator = PollingCoordinator::new(feed, gateway, cfg.poll_interval);
    for outcome in coordinator.run(game_ids).await {
        match outcome {
            EventOutcome::Finished { event_id, cycles } => {
                info!(event_id, cycles, "Game {event_id} final after {cycles} polls");
            }
            EventOutcome::Aborted { event_id, reason } => {
                error!(event_id, "Game {event_id} abandoned: {reason}");
            }
        }
    }

    info!("All games for today have been processed, exiting...");
    Ok(())
}
