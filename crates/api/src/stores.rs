//! Ephemeral in-process state.
//!
//! The only shared mutable state in the service is the rate limiter's
//! window map. It is deliberately per-process: when the service runs as
//! multiple instances behind a load balancer, each instance enforces its
//! own limits. Sharing the counter would require an external store and is
//! out of scope here.

mod rate_limit;

pub use rate_limit::{
    Clock, FixedWindowLimiter, RateLimitDecision, RateLimiter, SystemClock,
    MAX_REQUESTS_PER_WINDOW, SWEEP_INTERVAL_SECS, WINDOW_SECS,
};

#[cfg(test)]
pub use rate_limit::MockRateLimiter;
