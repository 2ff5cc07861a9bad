//! Leaderboard entry storage for PostgreSQL.
//!
//! Insert assigns both the row id and the submission timestamp server-side,
//! so every caller ranks against the same recorded `created_at`. All reads
//! and the retention delete share one ordering: `(score desc, created_at
//! asc)`, equal scores resolved by earlier submission.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::models::LeaderboardEntry;

/// Most entries retained per game.
pub const MAX_ENTRIES_PER_GAME: i64 = 100;

/// A submission row that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub game_id: String,
    pub nickname: String,
    pub score: i64,
}

/// Repository for leaderboard entry operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeaderboardRepo: Send + Sync {
    /// Persist a new entry, returning it with store-assigned id and created_at.
    async fn insert(&self, entry: NewEntry) -> Result<LeaderboardEntry>;

    /// Entries for the game with a strictly higher score.
    async fn count_higher(&self, game_id: &str, score: i64) -> Result<i64>;

    /// Entries for the game with an equal score submitted earlier.
    async fn count_ties_before(
        &self,
        game_id: &str,
        score: i64,
        created_at: DateTime<Utc>,
    ) -> Result<i64>;

    /// Top entries for the game, ordered by (score desc, created_at asc).
    async fn top_for_game(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardEntry>>;

    /// Delete every entry for the game ranked beyond `keep` under
    /// (score desc, created_at asc). Returns the number of rows removed.
    async fn delete_beyond_top(&self, game_id: &str, keep: i64) -> Result<u64>;
}

/// PostgreSQL implementation of LeaderboardRepo.
#[derive(Clone)]
pub struct PgLeaderboardRepo {
    pool: Pool<Postgres>,
}

impl PgLeaderboardRepo {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeaderboardRepo for PgLeaderboardRepo {
    async fn insert(&self, entry: NewEntry) -> Result<LeaderboardEntry> {
        let row = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            INSERT INTO leaderboard_entries (game_id, nickname, score)
            VALUES ($1, $2, $3)
            RETURNING id, game_id, nickname, score, created_at
            "#,
        )
        .bind(&entry.game_id)
        .bind(&entry.nickname)
        .bind(entry.score)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn count_higher(&self, game_id: &str, score: i64) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM leaderboard_entries WHERE game_id = $1 AND score > $2",
        )
        .bind(game_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn count_ties_before(
        &self,
        game_id: &str,
        score: i64,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM leaderboard_entries
            WHERE game_id = $1 AND score = $2 AND created_at < $3
            "#,
        )
        .bind(game_id)
        .bind(score)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn top_for_game(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT id, game_id, nickname, score, created_at
            FROM leaderboard_entries
            WHERE game_id = $1
            ORDER BY score DESC, created_at ASC
            LIMIT $2
            "#,
        )
        .bind(game_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    async fn delete_beyond_top(&self, game_id: &str, keep: i64) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM leaderboard_entries
            WHERE id IN (
                SELECT id FROM leaderboard_entries
                WHERE game_id = $1
                ORDER BY score DESC, created_at ASC
                OFFSET $2
            )
            "#,
        )
        .bind(game_id)
        .bind(keep)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
