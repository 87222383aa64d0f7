//! CLI command implementations.
//!
//! - `store` - Migrations, seeding and credential management
//! - `catalog` - One-shot catalog listings
//! - `shell` - Interactive front end

pub mod catalog;
pub mod shell;
pub mod store;

use thiserror::Error;

use shop_track::error::AppError;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Log the error, capturing internal failures to Sentry.
    pub fn report(&self) {
        match self {
            Self::App(err) => err.report(),
            Self::Io(err) => tracing::error!(error = %err, "Terminal I/O failed"),
        }
    }
}
