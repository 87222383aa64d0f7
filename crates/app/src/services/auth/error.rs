//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during registration and login.
///
/// None of these are fatal: the front end shows [`AuthError::user_message`]
/// inline and lets the user resubmit.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration input was incomplete or the passwords differ.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No stored credential matches the submitted email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The credential store could not complete the operation.
    #[error("{action} failed: {source}")]
    Persistence {
        /// User-facing name of the operation, e.g. `"Registration"`.
        action: &'static str,
        #[source]
        source: RepositoryError,
    },
}

impl AuthError {
    /// Message suitable for showing next to the form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) => msg.clone(),
            Self::InvalidCredentials => "Invalid email or password.".to_string(),
            Self::Persistence { action, source } => format!("{action} failed: {source}"),
        }
    }

    /// Whether this error came from the store rather than from user input.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence { .. })
    }
}
