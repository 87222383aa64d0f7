//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOPTRACK_DATABASE_URL` - `SQLite` URL (default: `sqlite://shop-track.db`)
//! - `SHOPTRACK_LOGIN_POLICY` - `accept_any` (default) or `verify`
//! - `SHOPTRACK_CATALOG_PATH` - YAML catalog replacing the built-in one
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;

use crate::services::auth::LoginPolicy;

/// Default on-disk database.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://shop-track.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Shop-Track configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `SQLite` connection URL
    pub database_url: String,
    /// How login treats submitted credentials
    pub login_policy: LoginPolicy,
    /// Alternative catalog file
    pub catalog_path: Option<PathBuf>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            login_policy: LoginPolicy::default(),
            catalog_path: None,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let database_url =
            get("SHOPTRACK_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let login_policy = match get("SHOPTRACK_LOGIN_POLICY") {
            Some(value) => value.parse::<LoginPolicy>().map_err(|e| {
                ConfigError::InvalidEnvVar("SHOPTRACK_LOGIN_POLICY".to_string(), e)
            })?,
            None => LoginPolicy::default(),
        };
        let catalog_path = get("SHOPTRACK_CATALOG_PATH").map(PathBuf::from);

        Ok(Self {
            database_url,
            login_policy,
            catalog_path,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for a throwaway in-memory store with the built-in catalog.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            database_url: crate::db::IN_MEMORY_URL.to_string(),
            ..Self::default()
        }
    }
}
