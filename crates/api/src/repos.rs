//! Database repositories (PostgreSQL).
//!
//! Durable storage is abstracted behind a trait to enable mocking in tests
//! and to keep the ranking/retention logic independent of the store engine.
//!
//! ## Usage in Handlers
//!
//! The repository is accessed via `state.store`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let entry = state.store.insert(new_entry).await?;
//!     let above = state.store.count_higher(&entry.game_id, entry.score).await?;
//! }
//! ```

mod leaderboard;

pub use leaderboard::{LeaderboardRepo, NewEntry, PgLeaderboardRepo, MAX_ENTRIES_PER_GAME};

#[cfg(test)]
pub use leaderboard::MockLeaderboardRepo;
