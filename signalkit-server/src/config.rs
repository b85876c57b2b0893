//! Environment-sourced settings
//!
//! Variables:
//!   DATABASE_URL          Postgres connection string
//!   ENV                   deployment name reported by /health (default: local)
//!   SIGNALKIT_POOL_MIN    minimum pooled connections (default: 1)
//!   SIGNALKIT_POOL_MAX    maximum pooled connections (default: 5)

use crate::db::pool::{PoolConfig, DEFAULT_MAX_CONNECTIONS, DEFAULT_MIN_CONNECTIONS};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL not set")]
    MissingDatabaseUrl,

    #[error("{var} must be a non-negative integer, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

/// Process settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: Option<String>,
    pub env: String,
    pub pool_min: u32,
    pub pool_max: u32,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup (used by tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let number = |var: &'static str, default: u32| -> Result<u32, ConfigError> {
            match lookup(var) {
                Some(value) => value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber { var, value }),
                None => Ok(default),
            }
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            env: lookup("ENV").unwrap_or_else(|| "local".to_string()),
            pool_min: number("SIGNALKIT_POOL_MIN", DEFAULT_MIN_CONNECTIONS)?,
            pool_max: number("SIGNALKIT_POOL_MAX", DEFAULT_MAX_CONNECTIONS)?,
        })
    }

    /// Pool settings for the configured database.
    pub fn pool_config(&self) -> Result<PoolConfig, ConfigError> {
        let url = self
            .database_url
            .as_deref()
            .ok_or(ConfigError::MissingDatabaseUrl)?;
        Ok(PoolConfig::new(url).with_size(self.pool_min, self.pool_max))
    }
}
