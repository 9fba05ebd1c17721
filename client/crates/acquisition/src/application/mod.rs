//! Application Layer
//!
//! The workflow state machine and the per-session context driving it.

pub mod context;
pub mod workflow;

// Re-exports
pub use context::SessionContext;
pub use workflow::{AcquisitionWorkflow, PendingConfirm, PendingSubmit};
