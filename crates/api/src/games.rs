//! Per-game score and play-time bounds.
//!
//! Games differ by orders of magnitude in scoring scale (a rally game whose
//! win counter tops out in the tens vs. a shooter capped at a million), so
//! bounds are table-driven per game rather than a single global cap. The
//! play-time floor encodes the shortest wall-clock session in which any
//! nonzero score is achievable, a cheap defense against replayed or
//! scripted submissions that skip actual play.

use std::collections::HashMap;

/// Bounds for a single game.
#[derive(Debug, Clone, Copy)]
pub struct GameLimits {
    /// Largest score the game can legitimately produce.
    pub max_score: i64,
    /// Shortest session (milliseconds) that can produce a nonzero score.
    pub min_play_time_ms: i64,
}

/// Immutable table of supported games and their limits.
#[derive(Debug, Clone)]
pub struct GameCatalog {
    limits: HashMap<&'static str, GameLimits>,
}

impl GameCatalog {
    /// The games shipped with the arcade.
    pub fn standard() -> Self {
        let limits = HashMap::from([
            (
                "snake",
                GameLimits {
                    max_score: 500,
                    min_play_time_ms: 10_000,
                },
            ),
            (
                "tetris",
                GameLimits {
                    max_score: 999_999,
                    min_play_time_ms: 30_000,
                },
            ),
            (
                "breakout",
                GameLimits {
                    max_score: 7_200,
                    min_play_time_ms: 20_000,
                },
            ),
            (
                "asteroids",
                GameLimits {
                    max_score: 1_000_000,
                    min_play_time_ms: 15_000,
                },
            ),
            // Best-of series: score is games won, not points.
            (
                "pong",
                GameLimits {
                    max_score: 70,
                    min_play_time_ms: 45_000,
                },
            ),
            (
                "minesweeper",
                GameLimits {
                    max_score: 999,
                    min_play_time_ms: 5_000,
                },
            ),
            (
                "flappy",
                GameLimits {
                    max_score: 1_000,
                    min_play_time_ms: 3_000,
                },
            ),
            (
                "2048",
                GameLimits {
                    max_score: 250_000,
                    min_play_time_ms: 60_000,
                },
            ),
        ]);

        Self { limits }
    }

    pub fn get(&self, game_id: &str) -> Option<GameLimits> {
        self.limits.get(game_id).copied()
    }

    /// Game ids in the catalog, for diagnostics and tests.
    pub fn game_ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.limits.keys().copied()
    }

    /// Check a reported score against the game's bounds.
    ///
    /// Unknown games, negative scores, and scores above the game's cap are
    /// rejected. Rejections are logged for abuse monitoring.
    pub fn validate_score(&self, game_id: &str, score: i64) -> bool {
        let Some(limits) = self.get(game_id) else {
            tracing::warn!(game_id, score, "score rejected: unknown game");
            return false;
        };

        if score < 0 || score > limits.max_score {
            tracing::warn!(
                game_id,
                score,
                max_score = limits.max_score,
                "score rejected: out of range"
            );
            return false;
        }

        true
    }

    /// Check a reported play time against the game's floor.
    ///
    /// Sessions shorter than the floor cannot have been played out, so they
    /// are treated as replayed or scripted submissions.
    pub fn validate_play_time(&self, game_id: &str, play_time_ms: i64) -> bool {
        let Some(limits) = self.get(game_id) else {
            tracing::warn!(game_id, play_time_ms, "play time rejected: unknown game");
            return false;
        };

        if play_time_ms < limits.min_play_time_ms {
            tracing::warn!(
                game_id,
                play_time_ms,
                min_play_time_ms = limits.min_play_time_ms,
                "play time rejected: below minimum"
            );
            return false;
        }

        true
    }
}
