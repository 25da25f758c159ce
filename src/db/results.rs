use tracing::{info, warn};

use crate::error::Result;
use crate::types::{CompletedSnapshot, Side};

/// Row counts touched by one final-result commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalResultCommit {
    pub games_updated: u64,
    pub predictions_updated: u64,
}

/// Durable store for finished games and the picks that depend on them.
pub struct ResultStore {
    pool: sqlx::SqlitePool,
}

impl ResultStore {
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// Mark the game finished and grade every prediction for it, in one transaction.
    /// Any failure drops the transaction before commit, rolling both updates back.
    pub async fn commit_final_result(&self, result: &CompletedSnapshot) -> Result<FinalResultCommit> {
        let winner = result.winner();
        let winner_label = winner.map(|side| side.to_string());
        let home_won = winner.map(|side| side == Side::Home);

        let mut tx = self.pool.begin().await?;

        let games = sqlx::query(
            r#"
            UPDATE games
            SET finished = 1,
                home_score = ?,
                away_score = ?,
                winner = CASE ?
                    WHEN 'home' THEN home_team_id
                    WHEN 'away' THEN away_team_id
                    ELSE NULL
                END
            WHERE id = ?
            "#,
        )
        .bind(i64::from(result.home_score))
        .bind(i64::from(result.away_score))
        .bind(winner_label.as_deref())
        .bind(result.event_id)
        .execute(&mut *tx)
        .await?;

        // A tie grades every pick as incorrect.
        let predictions = sqlx::query(
            r#"
            UPDATE predictions
            SET correct = CASE WHEN ? IS NULL THEN 0 ELSE picked_home = ? END
            WHERE game_id = ?
            "#,
        )
        .bind(home_won)
        .bind(home_won)
        .bind(result.event_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let commit = FinalResultCommit {
            games_updated: games.rows_affected(),
            predictions_updated: predictions.rows_affected(),
        };
        if commit.games_updated == 0 {
            warn!(event_id = result.event_id, "Final result committed but no games row matched");
        }
        info!(
            event_id = result.event_id,
            home_score = result.home_score,
            away_score = result.away_score,
            winner = winner_label.as_deref().unwrap_or("tie"),
            predictions = commit.predictions_updated,
            "Final result committed for game {}",
            result.event_id,
        );
        Ok(commit)
    }
}
