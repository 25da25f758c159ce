use serde::Serialize;

// ---------------------------------------------------------------------------
// Lifecycle stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Scheduled,
    InProgress,
    /// Terminal: polling stops once this is handled.
    Completed,
    /// Postponed, suspended, delayed and any other unlisted code. Skipped silently.
    Unknown,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Scheduled => "SCHEDULED",
            Stage::InProgress => "IN_PROGRESS",
            Stage::Completed => "COMPLETED",
            Stage::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Winning side
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Winner of a final score, `None` on a tie.
    pub fn winner(home_score: u32, away_score: u32) -> Option<Side> {
        match home_score.cmp(&away_score) {
            std::cmp::Ordering::Greater => Some(Side::Home),
            std::cmp::Ordering::Less => Some(Side::Away),
            std::cmp::Ordering::Equal => None,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Home => write!(f, "home"),
            Side::Away => write!(f, "away"),
        }
    }
}

// ---------------------------------------------------------------------------
// Snapshots: one poll cycle's typed projection of the feed document
// ---------------------------------------------------------------------------

/// Flat field/value pairs written as one cache hash.
pub type CacheFields = Vec<(&'static str, String)>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledSnapshot {
    #[serde(rename = "gameID")]
    pub event_id: i64,
    /// ISO-8601 start time exactly as the feed supplied it.
    #[serde(rename = "startTimeUTC")]
    pub start_time_utc: String,
}

impl ScheduledSnapshot {
    pub fn cache_fields(&self) -> CacheFields {
        vec![
            ("status", Stage::Scheduled.to_string()),
            ("gameID", self.event_id.to_string()),
            ("startTimeUTC", self.start_time_utc.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InProgressSnapshot {
    #[serde(rename = "gameID")]
    pub event_id: i64,
    pub home_score: u32,
    pub away_score: u32,
    pub current_inning: u32,
    pub is_top_inning: bool,
    pub outs: u32,
    pub at_bat: String,
    pub current_pitcher: String,
    /// `[first, second, third]`
    pub on_base: [bool; 3],
}

impl InProgressSnapshot {
    pub fn cache_fields(&self) -> CacheFields {
        let on_base = format!(
            "[{},{},{}]",
            self.on_base[0], self.on_base[1], self.on_base[2]
        );
        vec![
            ("status", Stage::InProgress.to_string()),
            ("gameID", self.event_id.to_string()),
            ("homeScore", self.home_score.to_string()),
            ("awayScore", self.away_score.to_string()),
            ("currentInning", self.current_inning.to_string()),
            ("isTopInning", self.is_top_inning.to_string()),
            ("outs", self.outs.to_string()),
            ("atBat", self.at_bat.clone()),
            ("currentPitcher", self.current_pitcher.clone()),
            ("onBase", on_base),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedSnapshot {
    #[serde(rename = "gameID")]
    pub event_id: i64,
    pub home_score: u32,
    pub away_score: u32,
}

impl CompletedSnapshot {
    pub fn winner(&self) -> Option<Side> {
        Side::winner(self.home_score, self.away_score)
    }

    pub fn cache_fields(&self) -> CacheFields {
        vec![
            ("status", Stage::Completed.to_string()),
            ("gameID", self.event_id.to_string()),
            ("homeScore", self.home_score.to_string()),
            ("awayScore", self.away_score.to_string()),
        ]
    }
}
