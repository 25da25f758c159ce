pub mod models;
pub mod results;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tracing::info;

use crate::error::Result;

pub use models::GameRow;
pub use results::ResultStore;

/// Open the SQLite pool and bring the schema up to date.
pub async fn connect(database_url: &str) -> Result<sqlx::SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database ready at {database_url}");
    Ok(pool)
}

/// Games scheduled for today (UTC).
pub async fn todays_games(pool: &sqlx::SqlitePool) -> Result<Vec<GameRow>> {
    let games = sqlx::query_as::<_, GameRow>(
        "SELECT * FROM games WHERE date = date('now') ORDER BY id",
    )
    .fetch_all(pool)
    .await?;
    Ok(games)
}
