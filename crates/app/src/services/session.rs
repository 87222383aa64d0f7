//! Authentication state holder.
//!
//! The session is a single [`SessionState`] published through a
//! `tokio::sync::watch` channel. Transitions update the channel before the
//! call returns, so a subscriber that checks right after `login`/`logout`
//! always sees the new state.

use tokio::sync::watch;
use tracing::info;

use shop_track_core::SessionState;

/// Receiver half handed to the front end.
pub type SessionWatcher = watch::Receiver<SessionState>;

/// Owns the process-wide logged-in flag.
///
/// `LoggedOut` is the initial state. `login` and `logout` are idempotent:
/// repeating a transition neither changes the state nor notifies subscribers.
#[derive(Debug)]
pub struct SessionManager {
    state: watch::Sender<SessionState>,
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionManager {
    /// Create a logged-out session.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::LoggedOut);
        Self { state }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Whether a user is currently authenticated.
    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.state().is_logged_in()
    }

    /// Subscribe to state changes.
    ///
    /// The receiver starts with the current state marked as seen.
    #[must_use]
    pub fn subscribe(&self) -> SessionWatcher {
        self.state.subscribe()
    }

    /// Mark the session as logged in.
    ///
    /// This does not consult any credential store; use
    /// [`AuthService::login`](crate::services::auth::AuthService::login) for
    /// policy-aware login. Returns `true` if the state changed.
    pub fn login(&self, email: &str) -> bool {
        let changed = self.transition(SessionState::LoggedIn);
        if changed {
            info!(email, "Logged in");
        }
        changed
    }

    /// Mark the session as logged out.
    ///
    /// Catalog and shopping-list state are left untouched. Returns `true` if
    /// the state changed.
    pub fn logout(&self) -> bool {
        let changed = self.transition(SessionState::LoggedOut);
        if changed {
            info!("Logged out");
        }
        changed
    }

    fn transition(&self, to: SessionState) -> bool {
        self.state.send_if_modified(|state| {
            if *state == to {
                false
            } else {
                *state = to;
                true
            }
        })
    }
}
