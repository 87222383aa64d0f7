//! Credential domain type.

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use shop_track_core::CredentialId;

/// A registered login credential.
///
/// The password is stored as entered; it is only wrapped in a secret so it
/// never ends up in logs or `Debug` output.
#[derive(Debug, Clone)]
pub struct Credential {
    /// Store-assigned ID.
    pub id: CredentialId,
    /// Email address as entered at registration.
    pub email: String,
    /// Password as entered at registration.
    pub password: SecretString,
    /// When the credential was registered.
    pub created_at: DateTime<Utc>,
}

impl Credential {
    /// Whether `password` matches the stored password exactly.
    #[must_use]
    pub fn password_matches(&self, password: &str) -> bool {
        self.password.expose_secret() == password
    }
}
