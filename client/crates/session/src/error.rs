//! Session Error Types
//!
//! Session-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Session-specific result type alias
pub type SessionResult<T> = Result<T, SessionError>;

/// Session-specific error variants
#[derive(Debug, Error)]
pub enum SessionError {
    /// No credential is held
    #[error("Not signed in")]
    NotSignedIn,

    /// The account service rejected the request or could not be reached
    #[error("{0}")]
    Remote(AppError),
}

impl SessionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::NotSignedIn => ErrorKind::Unauthenticated,
            SessionError::Remote(e) => e.kind(),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            SessionError::Remote(e) => match e.kind() {
                ErrorKind::Server => tracing::error!(error = %e, "Account service error"),
                ErrorKind::Auth => tracing::warn!("Invalid credentials"),
                ErrorKind::Network => tracing::warn!(error = %e, "Account service unreachable"),
                _ => tracing::debug!(error = %e, "Account request rejected"),
            },
            SessionError::NotSignedIn => tracing::debug!("No credential held"),
        }
    }
}

impl From<AppError> for SessionError {
    fn from(err: AppError) -> Self {
        SessionError::Remote(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotSignedIn => {
                AppError::unauthenticated("Not signed in").with_action("Log in first")
            }
            SessionError::Remote(e) => e,
        }
    }
}
