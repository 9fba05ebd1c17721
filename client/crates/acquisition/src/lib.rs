//! Card Acquisition Module
//!
//! Drives one card from photographs to a collection entry.
//!
//! Structure:
//! - `domain/` - images, candidates, the draft, workflow states
//! - `application/` - the [`AcquisitionWorkflow`] state machine and the
//!   per-session [`SessionContext`]
//!
//! ## Flow
//! `Idle → AwaitingImages → Submitting → Reviewing → Editing → Confirming →
//! Confirmed`. At most one remote request is in flight per workflow; while
//! one is, every other event is rejected. Nothing is retried automatically.

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::{
    context::SessionContext,
    workflow::{AcquisitionWorkflow, PendingConfirm, PendingSubmit},
};
pub use domain::{
    collection::{CardSummary, CollectionEntry, CollectionStats},
    entities::{Candidate, CandidateDraft, CardImage, ImagePair, Recognition, RecognitionSummary},
    state::{Event, WorkflowState},
    value_objects::{DraftField, DraftPatch, Finish, ImageSide},
};
pub use error::{AcquisitionError, AcquisitionResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
