//! Acquisition Error Types
//!
//! This module provides acquisition-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use session::SessionError;
use thiserror::Error;

use crate::domain::state::{Event, WorkflowState};
use crate::domain::value_objects::ImageSide;

/// Acquisition-specific result type alias
pub type AcquisitionResult<T> = Result<T, AcquisitionError>;

/// Acquisition-specific error variants
///
/// Every variant except `Remote` is raised locally and never reaches the
/// network.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    /// No credential is held
    #[error("You must be logged in first")]
    Unauthenticated,

    /// One half of the image pair is missing
    #[error("Select the {missing} image before submitting")]
    IncompleteInput { missing: ImageSide },

    /// Zero-byte image file
    #[error("Image '{file_name}' is empty")]
    EmptyImage { file_name: String },

    /// A request is already in flight
    #[error("A request is already in progress ({state})")]
    InFlight { state: WorkflowState },

    /// Event not accepted in the current state
    #[error("Cannot {event} while {state}")]
    InvalidTransition { state: WorkflowState, event: Event },

    /// Candidate index outside the received list
    #[error("No candidate #{index} ({len} available)")]
    CandidateOutOfRange { index: usize, len: usize },

    /// Draft field name not recognized
    #[error("Unknown draft field '{key}'")]
    UnknownField { key: String },

    /// Price that does not parse to a finite number
    #[error("Invalid price '{value}'")]
    InvalidPrice { value: String },

    /// Finish outside Normal / Holo / Reverse
    #[error("Invalid finish '{value}': expected Normal, Holo or Reverse")]
    InvalidFinish { value: String },

    /// Confirmation attempted without a draft
    #[error("No draft to confirm: choose a candidate or enter one manually")]
    NoDraft,

    /// Completion for a request that is no longer pending
    #[error("Completion does not match the pending request")]
    StaleCompletion,

    /// Remote call failed
    #[error("{0}")]
    Remote(AppError),
}

impl AcquisitionError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AcquisitionError::Unauthenticated => ErrorKind::Unauthenticated,
            AcquisitionError::Remote(e) => e.kind(),
            _ => ErrorKind::Validation,
        }
    }

    /// Whether the error came back from the service
    pub fn is_remote(&self) -> bool {
        matches!(self, AcquisitionError::Remote(_))
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AcquisitionError::Remote(e) => match e.kind() {
                ErrorKind::Server => tracing::error!(error = %e, "Recognition service error"),
                ErrorKind::Auth => tracing::warn!(error = %e, "Credential rejected"),
                ErrorKind::Network => tracing::warn!(error = %e, "Recognition service unreachable"),
                _ => tracing::debug!(error = %e, "Request rejected by service"),
            },
            AcquisitionError::StaleCompletion => {
                tracing::warn!("Discarded stale completion");
            }
            _ => {
                tracing::debug!(error = %self, "Acquisition guard rejected event");
            }
        }
    }
}

impl From<AppError> for AcquisitionError {
    fn from(err: AppError) -> Self {
        AcquisitionError::Remote(err)
    }
}

impl From<SessionError> for AcquisitionError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NotSignedIn => AcquisitionError::Unauthenticated,
            SessionError::Remote(e) => AcquisitionError::Remote(e),
        }
    }
}

impl From<AcquisitionError> for AppError {
    fn from(err: AcquisitionError) -> Self {
        match err {
            AcquisitionError::Remote(e) => e,
            AcquisitionError::Unauthenticated => {
                AppError::unauthenticated(AcquisitionError::Unauthenticated.to_string())
                    .with_action("Log in first")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}
