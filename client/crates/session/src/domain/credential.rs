//! Credential Entity
//!
//! Bearer token issued by the account service for one account.

use chrono::{DateTime, Utc};
use platform::secret::SecretToken;

/// Authentication credential
///
/// The token is opaque: it is attached verbatim to every gated request until
/// the credential is cleared.
#[derive(Debug, Clone)]
pub struct Credential {
    token: SecretToken,
    /// Account the token was issued for
    email: String,
    issued_at: DateTime<Utc>,
}

impl Credential {
    /// Create a credential issued now
    pub fn new(token: SecretToken, email: impl Into<String>) -> Self {
        Self {
            token,
            email: email.into(),
            issued_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &SecretToken {
        &self.token
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Token preview for display
    pub fn preview(&self) -> String {
        self.token.preview()
    }
}
