use std::sync::Arc;

use sqlx::{Pool, Postgres};

use crate::{config::Config, games::GameCatalog, repos::LeaderboardRepo, stores::RateLimiter};

#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Database pool (health checks run straight against it).
    pub database: Pool<Postgres>,
    /// Durable leaderboard entry storage.
    pub store: Arc<dyn LeaderboardRepo>,
    /// Per-client submission throttle.
    pub limiter: Arc<dyn RateLimiter>,
    /// Supported games and their score/playtime bounds.
    pub games: Arc<GameCatalog>,
}
