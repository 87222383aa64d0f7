//! Authentication service.
//!
//! Provides registration against the credential store and login gated by a
//! configurable [`LoginPolicy`].

mod error;

pub use error::AuthError;

use core::fmt;

use sqlx::SqlitePool;
use tracing::{info, instrument, warn};

use crate::db::credentials::CredentialRepository;
use crate::models::Credential;
use crate::services::session::SessionManager;

/// Message shown when registration input is rejected.
pub const VALIDATION_MESSAGE: &str =
    "Please ensure all fields are filled correctly and passwords match.";

/// How `login` treats the submitted email and password.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoginPolicy {
    /// Any submission logs the user in; the store is never consulted.
    #[default]
    AcceptAny,
    /// The pair must match a registered credential.
    VerifyCredentials,
}

impl fmt::Display for LoginPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AcceptAny => write!(f, "accept_any"),
            Self::VerifyCredentials => write!(f, "verify"),
        }
    }
}

impl std::str::FromStr for LoginPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept_any" => Ok(Self::AcceptAny),
            "verify" => Ok(Self::VerifyCredentials),
            _ => Err(format!("invalid login policy: {s} (expected accept_any or verify)")),
        }
    }
}

/// Authentication service.
///
/// Handles registration and login. The session it drives is owned elsewhere
/// (usually [`crate::state::AppState`]).
pub struct AuthService<'a> {
    credentials: CredentialRepository<'a>,
    session: &'a SessionManager,
    policy: LoginPolicy,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, session: &'a SessionManager, policy: LoginPolicy) -> Self {
        Self {
            credentials: CredentialRepository::new(pool),
            session,
            policy,
        }
    }

    /// The active login policy.
    #[must_use]
    pub const fn policy(&self) -> LoginPolicy {
        self.policy
    }

    /// Register a new credential.
    ///
    /// Does not check for an existing registration under the same email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if the email or password is empty or the
    /// confirmation differs.
    /// Returns `AuthError::Persistence` if the store rejects the write.
    #[instrument(skip(self, password, confirm_password))]
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<Credential, AuthError> {
        validate_registration(email, password, confirm_password)?;

        let credential = self
            .credentials
            .create(email, password)
            .await
            .map_err(|source| AuthError::Persistence {
                action: "Registration",
                source,
            })?;

        info!(credential_id = %credential.id, "Registered credential");
        Ok(credential)
    }

    /// Log in and mark the session as authenticated.
    ///
    /// Under [`LoginPolicy::AcceptAny`] this always succeeds. Under
    /// [`LoginPolicy::VerifyCredentials`] the pair must match one of the
    /// credentials registered for the email.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if verification fails.
    /// Returns `AuthError::Persistence` if the store cannot be read.
    #[instrument(skip(self, password), fields(policy = %self.policy))]
    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        if self.policy == LoginPolicy::VerifyCredentials {
            let candidates = self
                .credentials
                .find_all_by_email(email)
                .await
                .map_err(|source| AuthError::Persistence {
                    action: "Login",
                    source,
                })?;

            if !candidates.iter().any(|c| c.password_matches(password)) {
                warn!("Rejected login");
                return Err(AuthError::InvalidCredentials);
            }
        }

        self.session.login(email);
        Ok(())
    }

    /// Log out. Returns `true` if the session was logged in.
    pub fn logout(&self) -> bool {
        self.session.logout()
    }
}

/// Check registration input.
///
/// # Errors
///
/// Returns `AuthError::Validation` with [`VALIDATION_MESSAGE`] on empty fields
/// or a confirmation mismatch.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    if email.is_empty() || password.is_empty() || password != confirm_password {
        return Err(AuthError::Validation(VALIDATION_MESSAGE.to_string()));
    }
    Ok(())
}
