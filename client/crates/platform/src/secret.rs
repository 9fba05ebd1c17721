//! Secrets held by the client
//!
//! Passwords typed by the user and bearer tokens issued by the account
//! service. Both are zeroized when dropped and never printed in full.
//!
//! No password policy is applied here: the account service is the
//! authority on what it accepts.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Characters shown by [`SecretToken::preview`]
pub const TOKEN_PREVIEW_LEN: usize = 20;

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::secret::ClearTextPassword;
///
/// let password = ClearTextPassword::new("pikachu-58");
/// assert_eq!(format!("{:?}", password), "ClearTextPassword([REDACTED])");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the password for a form field
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

// ============================================================================
// Bearer token (Zeroized on drop)
// ============================================================================

/// Opaque bearer token
///
/// The value is never inspected, only attached verbatim to gated requests.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretToken(String);

impl SecretToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Borrow the raw token for an `Authorization` header
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short display form: the first [`TOKEN_PREVIEW_LEN`] characters and `...`
    pub fn preview(&self) -> String {
        let head: String = self.0.chars().take(TOKEN_PREVIEW_LEN).collect();
        format!("{}...", head)
    }
}

impl fmt::Debug for SecretToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretToken([REDACTED])")
    }
}
