//! Authentication state.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Process-wide authentication state.
///
/// No user identity is retained; the session only knows whether someone is
/// logged in. Resets to [`SessionState::LoggedOut`] on every process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn,
}

impl SessionState {
    /// Whether a user is currently authenticated.
    #[must_use]
    pub const fn is_logged_in(self) -> bool {
        matches!(self, Self::LoggedIn)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoggedOut => write!(f, "logged_out"),
            Self::LoggedIn => write!(f, "logged_in"),
        }
    }
}
