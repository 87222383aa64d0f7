//! Credential repository.
//!
//! Queries use runtime-checked `sqlx::query_as` so the crate builds without a
//! live database.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tracing::instrument;

use shop_track_core::CredentialId;

use super::RepositoryError;
use crate::models::Credential;

/// Raw `credential` row.
#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: CredentialId,
    email: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<CredentialRow> for Credential {
    fn from(row: CredentialRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password: SecretString::from(row.password),
            created_at: row.created_at,
        }
    }
}

/// Repository for credential database operations.
pub struct CredentialRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CredentialRepository<'a> {
    /// Create a new credential repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new credential.
    ///
    /// No uniqueness is enforced: the same email may be registered repeatedly.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    #[instrument(skip(self, password))]
    pub async fn create(&self, email: &str, password: &str) -> Result<Credential, RepositoryError> {
        let row: CredentialRow = sqlx::query_as(
            r"
            INSERT INTO credential (email, password, created_at)
            VALUES (?, ?, ?)
            RETURNING id, email, password, created_at
            ",
        )
        .bind(email)
        .bind(password)
        .bind(Utc::now())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Get a credential by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CredentialId) -> Result<Option<Credential>, RepositoryError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, email, password, created_at
            FROM credential
            WHERE id = ?
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Credential::from))
    }

    /// Get the most recently registered credential for an email.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, RepositoryError> {
        let row: Option<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, email, password, created_at
            FROM credential
            WHERE email = ?
            ORDER BY id DESC
            LIMIT 1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Credential::from))
    }

    /// Get every credential registered under an email, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_all_by_email(&self, email: &str) -> Result<Vec<Credential>, RepositoryError> {
        let rows: Vec<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, email, password, created_at
            FROM credential
            WHERE email = ?
            ORDER BY id
            ",
        )
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Credential::from).collect())
    }

    /// List all credentials, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Credential>, RepositoryError> {
        let rows: Vec<CredentialRow> = sqlx::query_as(
            r"
            SELECT id, email, password, created_at
            FROM credential
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Credential::from).collect())
    }

    /// Count registered credentials.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the count is negative.
    pub async fn count(&self) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM credential")
            .fetch_one(self.pool)
            .await?;

        u64::try_from(count)
            .map_err(|_| RepositoryError::DataCorruption(format!("negative row count: {count}")))
    }
}
