//! Database operations for the embedded `SQLite` store.
//!
//! # Database: `shop-track.db`
//!
//! Stores registered credentials only; the catalog is static and the
//! shopping list lives in memory.
//!
//! ## Tables
//!
//! - `credential` - Registered email/password pairs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/app/migrations/`, embedded at compile
//! time, and run via:
//! ```bash
//! cargo run -p shop-track-cli -- migrate
//! ```
//!
//! Writes are plain `INSERT`s with no conflict detection, so overlapping
//! edits resolve last-writer-wins.

pub mod credentials;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;
use tracing::info;

use self::credentials::CredentialRepository;

/// In-memory database URL used for previews and tests.
pub const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Email of the preview user created by [`seed_preview`].
pub const PREVIEW_EMAIL: &str = "preview@example.com";

/// Password of the preview user created by [`seed_preview`].
pub const PREVIEW_PASSWORD: &str = "password";

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Create a `SQLite` connection pool.
///
/// The database file is created if it does not exist. An in-memory database
/// lives only as long as its connection, so it gets exactly one connection
/// that is never reaped.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(10))
    };

    pool_options.connect_with(options).await
}

/// Apply all pending schema migrations.
///
/// # Errors
///
/// Returns `RepositoryError::Migration` if a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), RepositoryError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Migrations complete");
    Ok(())
}

/// Insert the preview user unless it already exists.
///
/// Returns `true` if a credential was created.
///
/// # Errors
///
/// Returns `RepositoryError` if the lookup or insert fails.
pub async fn seed_preview(pool: &SqlitePool) -> Result<bool, RepositoryError> {
    let credentials = CredentialRepository::new(pool);

    if credentials.find_by_email(PREVIEW_EMAIL).await?.is_some() {
        info!(email = PREVIEW_EMAIL, "Preview user already present");
        return Ok(false);
    }

    credentials.create(PREVIEW_EMAIL, PREVIEW_PASSWORD).await?;
    info!(email = PREVIEW_EMAIL, "Preview user created");
    Ok(true)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_survives_queries() {
        let pool = create_pool(IN_MEMORY_URL).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let repo = CredentialRepository::new(&pool);
        repo.create("a@b.com", "p").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool(IN_MEMORY_URL).await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_seed_preview_runs_once() {
        let pool = create_pool(IN_MEMORY_URL).await.unwrap();
        run_migrations(&pool).await.unwrap();

        assert!(seed_preview(&pool).await.unwrap());
        assert!(!seed_preview(&pool).await.unwrap());

        let found = CredentialRepository::new(&pool)
            .find_by_email(PREVIEW_EMAIL)
            .await
            .unwrap()
            .unwrap();
        assert!(found.password_matches(PREVIEW_PASSWORD));
    }

    #[tokio::test]
    async fn test_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shop-track.db");
        let url = format!("sqlite://{}", path.display());

        let pool = create_pool(&url).await.unwrap();
        run_migrations(&pool).await.unwrap();
        pool.close().await;

        assert!(path.exists());
    }
}
