//! Domain Layer
//!
//! Contains entities, value objects and the workflow states.

pub mod collection;
pub mod entities;
pub mod state;
pub mod value_objects;

// Re-exports
pub use entities::{Candidate, CandidateDraft, CardImage, ImagePair, Recognition};
pub use state::{Event, WorkflowState};
pub use value_objects::{DraftPatch, Finish, ImageSide};
