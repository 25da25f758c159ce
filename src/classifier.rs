use crate::error::Result;
use crate::feed::document::{extract, required_str, Document};
use crate::types::Stage;

/// Classify a game from the `gameData` section using `status.codedGameState`.
///
/// `O` (game over, final pending review) is treated as `F`. Any code not listed
/// maps to `Unknown`, which the poller skips without error.
pub fn classify(game_data: &Document) -> Result<Stage> {
    let status = extract(game_data, "status")?;
    let code = required_str(status, "codedGameState")?;
    Ok(stage_for_code(code))
}

pub fn stage_for_code(code: &str) -> Stage {
    match code {
        "S" => Stage::Scheduled,
        "F" | "O" => Stage::Completed,
        "I" => Stage::InProgress,
        _ => Stage::Unknown,
    }
}
