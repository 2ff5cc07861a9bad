//! Top-100 retention for leaderboard entries.

use crate::repos::{LeaderboardRepo, MAX_ENTRIES_PER_GAME};

/// Bound a game's entry set to the retained top 100.
///
/// Runs after every accepted submission. Best-effort cleanup: failures are
/// logged and never propagate, so a trim error cannot fail or roll back the
/// submission that triggered it.
pub async fn trim_to_capacity(repo: &dyn LeaderboardRepo, game_id: &str) {
    match repo.delete_beyond_top(game_id, MAX_ENTRIES_PER_GAME).await {
        Ok(0) => {}
        Ok(removed) => {
            tracing::debug!(game_id, removed, "trimmed leaderboard to capacity");
        }
        Err(err) => {
            tracing::error!(game_id, error = %err, "failed to trim leaderboard");
        }
    }
}
