use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted leaderboard score.
///
/// Created when a submission passes validation and rate limiting, destroyed
/// only when retention trimming evicts it from the game's top 100. Both `id`
/// and `created_at` are assigned by the store at insert time; `created_at`
/// is the sole tie-break key for equal scores.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: Uuid,
    pub game_id: String,
    pub nickname: String,
    pub score: i64,
    pub created_at: DateTime<Utc>,
}
