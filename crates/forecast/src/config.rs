use std::{env, time::Duration};

use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The database connection string was never assigned.
    #[error("database connection string is undefined: set DATABASE_URL")]
    MissingConnectionString,
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. Required when the `postgres` storage
    /// backend is active; ignored by the in-memory backend.
    pub database_url: Option<String>,
    /// Bearer token checked by the authorization stage.
    pub api_token: String,
    /// Whether the API documentation stage is mounted (default: true)
    pub docs_enabled: bool,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DATABASE_URL` - Postgres connection string (required with the
    ///   `postgres` feature; read once, before the persistence context is
    ///   registered)
    /// - `API_TOKEN` - bearer token for the authorization stage
    /// - `DOCS_ENABLED` - toggle for the documentation stage (default: true)
    /// - `REQUEST_TIMEOUT_SECONDS` - request timeout (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = env::var("API_TOKEN").unwrap_or_else(|_| {
            tracing::warn!("API_TOKEN not set, using the development token");
            "dev-token".to_string()
        });

        let config = Self {
            database_url: env::var("DATABASE_URL").ok(),
            api_token,
            docs_enabled: env::var("DOCS_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        };

        // The connection string must exist before the persistence context
        // can be constructed; fail startup here rather than mid-wiring.
        #[cfg(feature = "postgres")]
        config.connection_string()?;

        Ok(config)
    }

    /// The database connection string, or an error if it was never set.
    pub fn connection_string(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::MissingConnectionString)
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}
