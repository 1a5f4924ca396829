//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use exchange_rates::{DEFAULT_BASE_URL, RateSourceKind};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub rate_source: RateSourceKind,
    pub rate_api_url: String,
    /// Only read by the static source.
    pub rate_fluctuation: bool,
    pub dependency_timeout: Duration,
    pub recent_limit: i64,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("PORT is not a valid port: {e}"))?;

        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let rate_source = lookup("RATE_SOURCE")
            .unwrap_or_else(|| "awesome".to_string())
            .parse()?;

        let rate_api_url = lookup("RATE_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let rate_fluctuation = match lookup("RATE_FLUCTUATION") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| anyhow::anyhow!("RATE_FLUCTUATION must be true or false, got {raw:?}"))?,
            None => false,
        };

        let timeout_secs: u64 = lookup("DEPENDENCY_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("DEPENDENCY_TIMEOUT_SECS is not a number: {e}"))?;
        if timeout_secs == 0 {
            anyhow::bail!("DEPENDENCY_TIMEOUT_SECS must be greater than zero");
        }

        let recent_limit: i64 = lookup("RECENT_LIMIT")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .map_err(|e| anyhow::anyhow!("RECENT_LIMIT is not a number: {e}"))?;
        if recent_limit <= 0 {
            anyhow::bail!("RECENT_LIMIT must be positive");
        }

        Ok(Self {
            port,
            database_url,
            rate_source,
            rate_api_url,
            rate_fluctuation,
            dependency_timeout: Duration::from_secs(timeout_secs),
            recent_limit,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
