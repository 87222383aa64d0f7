//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for front ends. Every variant is
//! recoverable: front ends show [`AppError::user_message`] inline and keep
//! running. Store and configuration failures are captured to Sentry through
//! [`AppError::report`].

use thiserror::Error;

use crate::config::ConfigError;
use crate::db::RepositoryError;
use crate::services::auth::AuthError;
use crate::services::catalog::CatalogError;
use crate::services::shopping_list::ListError;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Registration or login failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog could not be loaded.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Shopping-list operation failed.
    #[error("List error: {0}")]
    List(#[from] ListError),

    /// Configuration is invalid.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The intent requires a logged-in session.
    #[error("Not logged in")]
    NotLoggedIn,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    /// Message suitable for showing to the user.
    ///
    /// Internal database details are hidden, except for auth persistence
    /// failures whose diagnostic is part of the registration message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Database(_) => "Storage error, please try again".to_string(),
            Self::Auth(err) => err.user_message(),
            Self::NotLoggedIn => "Please log in first".to_string(),
            _ => self.to_string(),
        }
    }

    /// Whether the error originates in the store or configuration rather than
    /// in user input.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::Database(_) | Self::Catalog(_) | Self::Config(_) => true,
            Self::Auth(err) => err.is_persistence(),
            _ => false,
        }
    }

    /// Log the error and, for internal errors, capture it to Sentry.
    pub fn report(&self) {
        if self.is_internal() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Operation failed"
            );
        } else {
            tracing::debug!(error = %self, "Rejected intent");
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("list", "Added product", Some(&[("product", "Cheese")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
