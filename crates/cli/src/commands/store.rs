//! Store management commands.
//!
//! # Usage
//!
//! ```bash
//! shop-track migrate
//! shop-track seed
//! shop-track register -e a@b.com -p secret -c secret
//! shop-track users
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPTRACK_DATABASE_URL` - `SQLite` URL (default: `sqlite://shop-track.db`)

use std::io::Write;

use tracing::info;

use shop_track::config::AppConfig;
use shop_track::db::{self, credentials::CredentialRepository};
use shop_track::error::AppError;
use shop_track::state::AppState;

use super::CliError;

/// Create the database if needed and apply migrations.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or migrated.
pub async fn migrate(config: AppConfig) -> Result<(), CliError> {
    info!(database_url = %config.database_url, "Running migrations...");
    AppState::connect(config).await?;
    Ok(())
}

/// Insert the preview user if it is missing.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
pub async fn seed(config: AppConfig) -> Result<(), CliError> {
    let state = AppState::connect(config).await?;
    let created = db::seed_preview(state.pool()).await.map_err(AppError::from)?;

    let mut out = std::io::stdout().lock();
    if created {
        writeln!(out, "Created preview user {}", db::PREVIEW_EMAIL)?;
    } else {
        writeln!(out, "Preview user {} already exists", db::PREVIEW_EMAIL)?;
    }
    Ok(())
}

/// Register a credential.
///
/// Validation and storage failures are printed and returned as errors.
///
/// # Errors
///
/// Returns an error if validation fails or the store rejects the write.
pub async fn register(
    config: AppConfig,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), CliError> {
    let state = AppState::connect(config).await?;
    let credential = state
        .auth()
        .register(email, password, confirm_password)
        .await
        .map_err(AppError::from)?;

    writeln!(
        std::io::stdout().lock(),
        "Registered {} (id {})",
        credential.email,
        credential.id
    )?;
    Ok(())
}

/// List registered emails, oldest first.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub async fn users(config: AppConfig) -> Result<(), CliError> {
    let state = AppState::connect(config).await?;
    let credentials = CredentialRepository::new(state.pool())
        .list()
        .await
        .map_err(AppError::from)?;

    let mut out = std::io::stdout().lock();
    for credential in &credentials {
        writeln!(
            out,
            "{:>4}  {}  {}",
            credential.id,
            credential.created_at.format("%Y-%m-%d %H:%M"),
            credential.email
        )?;
    }
    writeln!(out, "{} credential(s)", credentials.len())?;
    Ok(())
}
