//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum every component reports failures in.

use serde::Serialize;

/// Error category
///
/// Classifies remote responses (by HTTP status) and client-side guard
/// failures on the same scale.
///
/// ## Notes
/// * `non_exhaustive` - more categories may be added
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::from_status(401);
/// assert_eq!(kind, ErrorKind::Auth);
/// assert_eq!(kind.as_str(), "Authentication failed");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// No response: transport failure, refused connection or timeout
    Network,
    /// 401/403: credentials rejected
    Auth,
    /// Other 4xx, or a client-side input check
    Validation,
    /// 5xx, or an unexpected payload shape
    Server,
    /// No credential held; detected locally, nothing is sent
    Unauthenticated,
}

impl ErrorKind {
    /// Category for a non-success HTTP status
    ///
    /// ## Arguments
    /// * `status` - non-success HTTP status code
    ///
    /// ## Returns
    /// * 401/403 → [`ErrorKind::Auth`]
    /// * other 4xx → [`ErrorKind::Validation`]
    /// * anything else (5xx, unexpected codes) → [`ErrorKind::Server`]
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::from_status(400), ErrorKind::Validation);
    /// assert_eq!(ErrorKind::from_status(503), ErrorKind::Server);
    /// ```
    #[inline]
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Auth,
            400..=499 => ErrorKind::Validation,
            _ => ErrorKind::Server,
        }
    }

    /// User-facing label
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::Network.as_str(), "Network error");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "Network error",
            ErrorKind::Auth => "Authentication failed",
            ErrorKind::Validation => "Invalid input",
            ErrorKind::Server => "Server error",
            ErrorKind::Unauthenticated => "Not signed in",
        }
    }

    /// Whether retrying by hand can help
    ///
    /// Network and server failures may succeed with unchanged input.
    /// Nothing is retried automatically.
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::Network | ErrorKind::Server)
    }

    /// Whether the user must log in again
    #[inline]
    pub const fn requires_login(&self) -> bool {
        matches!(self, ErrorKind::Auth | ErrorKind::Unauthenticated)
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
