/// Row types for the `games` and `predictions` tables (migrations/0001_schema.sql).

#[derive(Debug, sqlx::FromRow)]
pub struct GameRow {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub date: String,
    pub finished: bool,
    pub home_score: Option<i64>,
    pub away_score: Option<i64>,
    pub winner: Option<i64>,
}

#[derive(Debug, sqlx::FromRow)]
pub struct PredictionRow {
    pub id: i64,
    pub game_id: i64,
    pub user_id: String,
    pub picked_home: bool,
    pub correct: Option<bool>,
}
