use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Set to "production" for JSON logging, anything else for human-readable.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking.
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }
}
