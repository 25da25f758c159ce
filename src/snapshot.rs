use crate::error::Result;
use crate::feed::document::{
    extract, extract_path, has_key, required_bool, required_i64, required_str, required_u32,
    Document,
};
use crate::feed::FeedDocument;
use crate::types::{CompletedSnapshot, InProgressSnapshot, ScheduledSnapshot};

pub fn build_scheduled(feed: &FeedDocument) -> Result<ScheduledSnapshot> {
    let event_id = event_id(&feed.game_data)?;
    let datetime = extract(&feed.game_data, "datetime")?;
    Ok(ScheduledSnapshot {
        event_id,
        start_time_utc: required_str(datetime, "dateTime")?.to_string(),
    })
}

pub fn build_in_progress(feed: &FeedDocument) -> Result<InProgressSnapshot> {
    let event_id = event_id(&feed.game_data)?;
    let linescore = extract(&feed.live_data, "linescore")?;
    let (home_score, away_score) = scores(linescore)?;

    let matchup = extract_path(&feed.live_data, &["plays", "currentPlay", "matchup"])?;
    let players = extract(&feed.game_data, "players")?;

    Ok(InProgressSnapshot {
        event_id,
        home_score,
        away_score,
        current_inning: required_u32(linescore, "currentInning")?,
        is_top_inning: required_bool(linescore, "isTopInning")?,
        outs: required_u32(linescore, "outs")?,
        at_bat: player_name(players, matchup, "batter")?,
        current_pitcher: player_name(players, matchup, "pitcher")?,
        on_base: on_base(matchup),
    })
}

pub fn build_completed(feed: &FeedDocument) -> Result<CompletedSnapshot> {
    let event_id = event_id(&feed.game_data)?;
    let linescore = extract(&feed.live_data, "linescore")?;
    let (home_score, away_score) = scores(linescore)?;
    Ok(CompletedSnapshot {
        event_id,
        home_score,
        away_score,
    })
}

fn event_id(game_data: &Document) -> Result<i64> {
    required_i64(extract(game_data, "game")?, "pk")
}

/// `(home runs, away runs)` from `linescore.teams`.
fn scores(linescore: &Document) -> Result<(u32, u32)> {
    let teams = extract(linescore, "teams")?;
    let home = required_u32(extract(teams, "home")?, "runs")?;
    let away = required_u32(extract(teams, "away")?, "runs")?;
    Ok((home, away))
}

/// Resolve `matchup.<role>.id` to its roster entry `players.ID<id>.fullName`.
fn player_name(players: &Document, matchup: &Document, role: &str) -> Result<String> {
    let id = required_i64(extract(matchup, role)?, "id")?;
    let entry = extract(players, &format!("ID{id}"))?;
    Ok(required_str(entry, "fullName")?.to_string())
}

/// Runner presence on first, second and third. Only the key matters.
pub fn on_base(matchup: &Document) -> [bool; 3] {
    [
        has_key(matchup, "postOnFirst"),
        has_key(matchup, "postOnSecond"),
        has_key(matchup, "postOnThird"),
    ]
}
