//! Shared API request/response types used by the game UI and API server.

use chrono::{DateTime, Utc};
use garde::Validate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest nickname the leaderboard displays.
pub const MAX_NICKNAME_LEN: usize = 18;

/// Longest game id accepted before the catalog is even consulted.
const MAX_GAME_ID_LEN: usize = 64;
/// Raw nickname input cap; the server truncates far below this anyway.
const MAX_RAW_NICKNAME_LEN: usize = 64;

/// Submit a finished game's final score.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScorePayload {
    /// Which game produced the score.
    #[garde(length(min = 1, max = MAX_GAME_ID_LEN))]
    pub game_id: String,
    /// Display name as typed by the player; sanitized server-side.
    #[garde(length(max = MAX_RAW_NICKNAME_LEN))]
    pub nickname: String,
    /// Final score reported by the game loop.
    #[garde(range(min = 0))]
    pub score: i64,
    /// Wall-clock play time in milliseconds, when the game reports one.
    #[garde(skip)]
    #[serde(default)]
    pub play_time_ms: Option<i64>,
}

/// Returned after an accepted submission.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitScoreResponse {
    /// 1-based position among the game's persisted entries.
    pub rank: i64,
    /// Nickname as persisted (post-sanitization).
    pub nickname: String,
    pub score: i64,
    pub submitted_at: DateTime<Utc>,
}

/// Query parameters for a leaderboard page.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub game_id: Option<String>,
    pub limit: Option<u32>,
}

/// One row of a leaderboard page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryView {
    pub id: Uuid,
    pub nickname: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}

/// Returned by the leaderboard page endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntryView>,
}
