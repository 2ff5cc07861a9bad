//! In-process submission throttling.
//!
//! Fixed-window counters keyed by client and game. A window admits up to
//! [`MAX_REQUESTS_PER_WINDOW`] submissions, then rejects until its reset
//! time passes. Fixed, not sliding: a client can land up to twice the limit
//! across a window boundary, an accepted precision tradeoff.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;

/// Submissions admitted per key within one window.
pub const MAX_REQUESTS_PER_WINDOW: u32 = 5;
/// Window length in seconds.
pub const WINDOW_SECS: i64 = 60;
/// How often expired windows are swept out of the map.
pub const SWEEP_INTERVAL_SECS: u64 = 300;

/// Time source for window bookkeeping, injectable so expiry is testable.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Outcome of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// Admitted; carries the count consumed so far in this window.
    Allowed(u32),
    /// Over the limit; carries when the window resets.
    Exceeded { reset_at: DateTime<Utc> },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitDecision::Allowed(_))
    }
}

/// Abuse throttle for score submissions.
#[cfg_attr(test, mockall::automock)]
pub trait RateLimiter: Send + Sync {
    /// Check and count one submission for a client+game pair.
    fn check(&self, client_id: &str, game_id: &str) -> RateLimitDecision;

    /// Drop windows whose reset time has passed. Live windows are untouched.
    fn sweep_expired(&self);
}

struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// In-memory fixed-window counter map.
pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    clock: Arc<dyn Clock>,
}

impl FixedWindowLimiter {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            windows: DashMap::new(),
            clock,
        }
    }

    fn key(client_id: &str, game_id: &str) -> String {
        format!("{client_id}:{game_id}")
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check(&self, client_id: &str, game_id: &str) -> RateLimitDecision {
        let now = self.clock.now();

        // The entry guard holds the key's shard lock, so the
        // increment-and-compare below is atomic per key.
        let mut window = self
            .windows
            .entry(Self::key(client_id, game_id))
            .or_insert_with(|| Window {
                count: 0,
                reset_at: now + Duration::seconds(WINDOW_SECS),
            });

        if now >= window.reset_at {
            window.count = 1;
            window.reset_at = now + Duration::seconds(WINDOW_SECS);
            return RateLimitDecision::Allowed(1);
        }

        if window.count >= MAX_REQUESTS_PER_WINDOW {
            tracing::warn!(
                client_id,
                game_id,
                reset_at = %window.reset_at,
                "submission rate limited"
            );
            return RateLimitDecision::Exceeded {
                reset_at: window.reset_at,
            };
        }

        window.count += 1;
        RateLimitDecision::Allowed(window.count)
    }

    fn sweep_expired(&self) {
        let now = self.clock.now();
        self.windows.retain(|_, window| window.reset_at > now);

        tracing::debug!(
            live_windows = self.windows.len(),
            "swept expired rate limit windows"
        );
    }
}
