//! Shared test utilities for API handler and service tests.
//!
//! Provides mock factories, a `TestStateBuilder` for constructing `AppState`
//! instances with only the mocks each test needs, and an in-memory
//! `LeaderboardRepo` with real ordering semantics for tests that exercise
//! ranking and retention end to end.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::{TestStateBuilder, mock_entry};
//!
//! let mut store = MockLeaderboardRepo::new();
//! store.expect_top_for_game().returning(|_, _| Ok(vec![mock_entry("snake", 120)]));
//!
//! let state = TestStateBuilder::new().with_store(store).build();
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::config::Config;
use crate::games::GameCatalog;
use crate::models::LeaderboardEntry;
use crate::repos::{LeaderboardRepo, MockLeaderboardRepo, NewEntry};
use crate::state::AppState;
use crate::stores::{MockRateLimiter, RateLimitDecision, RateLimiter};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 3000,
        database_url: "postgres://test".to_string(),
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Creates a persisted-looking entry for the given game and score.
pub fn mock_entry(game_id: &str, score: i64) -> LeaderboardEntry {
    LeaderboardEntry {
        id: Uuid::new_v4(),
        game_id: game_id.to_string(),
        nickname: "TurboFalcon".to_string(),
        score,
        created_at: Utc::now(),
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses defaults for anything not explicitly set: an empty store mock and a
/// limiter that admits everything, so tests only configure what they check.
pub struct TestStateBuilder {
    store: Option<MockLeaderboardRepo>,
    limiter: Option<MockRateLimiter>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            limiter: None,
        }
    }

    pub fn with_store(mut self, store: MockLeaderboardRepo) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_limiter(mut self, limiter: MockRateLimiter) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let database = PgPoolOptions::new()
            .connect_lazy("postgres://test")
            .expect("lazy test pool");

        let store: Arc<dyn LeaderboardRepo> =
            Arc::new(self.store.unwrap_or_else(MockLeaderboardRepo::new));
        let limiter: Arc<dyn RateLimiter> =
            Arc::new(self.limiter.unwrap_or_else(default_limiter));

        AppState {
            config: test_config(),
            database,
            store,
            limiter,
            games: Arc::new(GameCatalog::standard()),
        }
    }
}

impl Default for TestStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a limiter mock that admits every submission.
fn default_limiter() -> MockRateLimiter {
    let mut limiter = MockRateLimiter::new();
    limiter
        .expect_check()
        .returning(|_, _| RateLimitDecision::Allowed(1));
    limiter
}

/// In-memory `LeaderboardRepo` with real ordering semantics.
///
/// Assigns strictly increasing timestamps, like a store whose clock ticks
/// between sequential inserts.
pub struct InMemoryLeaderboardRepo {
    entries: Mutex<Vec<LeaderboardEntry>>,
    next_at: Mutex<DateTime<Utc>>,
}

impl InMemoryLeaderboardRepo {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            next_at: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        }
    }

    /// All stored entries, in insertion order.
    pub fn snapshot(&self) -> Vec<LeaderboardEntry> {
        self.entries.lock().unwrap().clone()
    }

    fn ranked_ids(&self, game_id: &str) -> Vec<Uuid> {
        let entries = self.entries.lock().unwrap();
        let mut ranked: Vec<&LeaderboardEntry> =
            entries.iter().filter(|e| e.game_id == game_id).collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then(a.created_at.cmp(&b.created_at))
        });
        ranked.into_iter().map(|e| e.id).collect()
    }
}

#[async_trait]
impl LeaderboardRepo for InMemoryLeaderboardRepo {
    async fn insert(&self, entry: NewEntry) -> Result<LeaderboardEntry> {
        let created_at = {
            let mut next = self.next_at.lock().unwrap();
            let at = *next;
            *next = at + Duration::milliseconds(1);
            at
        };

        let entry = LeaderboardEntry {
            id: Uuid::new_v4(),
            game_id: entry.game_id,
            nickname: entry.nickname,
            score: entry.score,
            created_at,
        };
        self.entries.lock().unwrap().push(entry.clone());

        Ok(entry)
    }

    async fn count_higher(&self, game_id: &str, score: i64) -> Result<i64> {
        let count = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.game_id == game_id && e.score > score)
            .count();

        Ok(count as i64)
    }

    async fn count_ties_before(
        &self,
        game_id: &str,
        score: i64,
        created_at: DateTime<Utc>,
    ) -> Result<i64> {
        let count = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.game_id == game_id && e.score == score && e.created_at < created_at)
            .count();

        Ok(count as i64)
    }

    async fn top_for_game(&self, game_id: &str, limit: i64) -> Result<Vec<LeaderboardEntry>> {
        let ranked = self.ranked_ids(game_id);
        let entries = self.entries.lock().unwrap();

        Ok(ranked
            .into_iter()
            .take(limit as usize)
            .filter_map(|id| entries.iter().find(|e| e.id == id).cloned())
            .collect())
    }

    async fn delete_beyond_top(&self, game_id: &str, keep: i64) -> Result<u64> {
        let evicted: HashSet<Uuid> = self
            .ranked_ids(game_id)
            .into_iter()
            .skip(keep as usize)
            .collect();

        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|e| !evicted.contains(&e.id));

        Ok((before - entries.len()) as u64)
    }
}
