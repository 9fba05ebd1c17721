//! Workflow States and Events

use std::fmt;

use crate::domain::value_objects::ImageSide;

/// Acquisition workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    AwaitingImages,
    Submitting,
    Reviewing,
    Editing,
    Confirming,
    Confirmed,
}

impl WorkflowState {
    /// A remote request is pending
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, WorkflowState::Submitting | WorkflowState::Confirming)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            WorkflowState::Idle => "idle",
            WorkflowState::AwaitingImages => "awaiting images",
            WorkflowState::Submitting => "submitting",
            WorkflowState::Reviewing => "reviewing candidates",
            WorkflowState::Editing => "editing draft",
            WorkflowState::Confirming => "confirming",
            WorkflowState::Confirmed => "confirmed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Workflow event, as reported in transition errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    SelectImage(ImageSide),
    Submit,
    SubmitCompleted,
    ChooseCandidate,
    EnterManually,
    EditField,
    Confirm,
    ConfirmCompleted,
    Reset,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::SelectImage(side) => write!(f, "select the {} image", side),
            Event::Submit => f.write_str("submit"),
            Event::SubmitCompleted => f.write_str("complete a submission"),
            Event::ChooseCandidate => f.write_str("choose a candidate"),
            Event::EnterManually => f.write_str("enter a card manually"),
            Event::EditField => f.write_str("edit the draft"),
            Event::Confirm => f.write_str("confirm"),
            Event::ConfirmCompleted => f.write_str("complete a confirmation"),
            Event::Reset => f.write_str("reset"),
        }
    }
}
