//! Acquisition Workflow
//!
//! Synchronous state machine. Each remote step is split in two halves:
//! `begin_*` checks the guards, enters the in-flight state and hands back
//! the request to send; `complete_*` takes the outcome of exactly that
//! request and performs the success or failure transition. The async
//! [`AcquisitionWorkflow::submit`] / [`AcquisitionWorkflow::confirm`] run
//! both halves around one gateway call.

use gateway::RemoteGateway;
use gateway::dto::{ConfirmRequest, MessageResponse, UploadRequest, UploadResponse};
use kernel::error::app_error::AppResult;
use kernel::id::RequestId;
use platform::secret::SecretToken;
use session::Credential;

use crate::domain::entities::{Candidate, CandidateDraft, CardImage, ImagePair, Recognition};
use crate::domain::state::{Event, WorkflowState};
use crate::domain::value_objects::{DraftPatch, ImageSide};
use crate::error::{AcquisitionError, AcquisitionResult};

/// Submission handed out by [`AcquisitionWorkflow::begin_submit`]
#[derive(Debug)]
pub struct PendingSubmit {
    pub id: RequestId,
    pub token: SecretToken,
    pub request: UploadRequest,
}

/// Confirmation handed out by [`AcquisitionWorkflow::begin_confirm`]
#[derive(Debug)]
pub struct PendingConfirm {
    pub id: RequestId,
    pub token: SecretToken,
    pub request: ConfirmRequest,
}

/// Card acquisition state machine
///
/// Owns the image pair, the candidates of the last submission and the
/// single active draft.
#[derive(Debug, Default)]
pub struct AcquisitionWorkflow {
    state: WorkflowState,
    images: ImagePair,
    recognition: Option<Recognition>,
    draft: Option<CandidateDraft>,
    pending: Option<RequestId>,
    last_confirmation: Option<String>,
}

impl AcquisitionWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn images(&self) -> &ImagePair {
        &self.images
    }

    pub fn recognition(&self) -> Option<&Recognition> {
        self.recognition.as_ref()
    }

    /// Candidates of the last submission, in relevance order
    pub fn candidates(&self) -> &[Candidate] {
        self.recognition
            .as_ref()
            .map(|r| r.candidates.as_slice())
            .unwrap_or_default()
    }

    pub fn draft(&self) -> Option<&CandidateDraft> {
        self.draft.as_ref()
    }

    /// Service message of the last successful confirmation
    pub fn last_confirmation(&self) -> Option<&str> {
        self.last_confirmation.as_deref()
    }

    // ------------------------------------------------------------------------
    // Guards
    // ------------------------------------------------------------------------

    fn reject(&self, err: AcquisitionError) -> AcquisitionError {
        err.log();
        err
    }

    /// Accept `event` only from `allowed`; in-flight states reject everything
    fn expect_state(&self, event: Event, allowed: &[WorkflowState]) -> AcquisitionResult<()> {
        if self.state.is_in_flight() {
            return Err(self.reject(AcquisitionError::InFlight { state: self.state }));
        }
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(self.reject(AcquisitionError::InvalidTransition {
                state: self.state,
                event,
            }))
        }
    }

    /// Completion must arrive in `expected` and carry the pending id
    fn expect_completion(
        &mut self,
        event: Event,
        expected: WorkflowState,
        id: RequestId,
    ) -> AcquisitionResult<()> {
        if self.state != expected {
            return Err(self.reject(AcquisitionError::InvalidTransition {
                state: self.state,
                event,
            }));
        }
        if self.pending != Some(id) {
            return Err(self.reject(AcquisitionError::StaleCompletion));
        }
        self.pending = None;
        Ok(())
    }

    fn token(credential: Option<&Credential>) -> Option<SecretToken> {
        credential.map(|c| c.token().clone())
    }

    // ------------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------------

    /// Store one half of the image pair
    pub fn select_image(&mut self, side: ImageSide, image: CardImage) -> AcquisitionResult<()> {
        self.expect_state(
            Event::SelectImage(side),
            &[WorkflowState::Idle, WorkflowState::AwaitingImages],
        )?;

        tracing::debug!(side = %side, file = image.file_name(), bytes = image.len(), "Image selected");
        self.images.set(side, image);
        self.state = WorkflowState::AwaitingImages;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Check the submission guards and enter `Submitting`
    ///
    /// ## Errors
    /// * `Unauthenticated` - no credential; state unchanged, nothing sent
    /// * `IncompleteInput` - an image is missing; state unchanged, nothing sent
    /// * `InFlight` - a request is already pending
    pub fn begin_submit(&mut self, credential: Option<&Credential>) -> AcquisitionResult<PendingSubmit> {
        self.expect_state(
            Event::Submit,
            &[WorkflowState::Idle, WorkflowState::AwaitingImages],
        )?;

        let token = Self::token(credential).ok_or_else(|| self.reject(AcquisitionError::Unauthenticated))?;
        let request = self.images.to_request().map_err(|e| self.reject(e))?;

        let id = RequestId::new();
        self.pending = Some(id);
        self.state = WorkflowState::Submitting;

        tracing::info!(request_id = %id, "Submitting card images");
        Ok(PendingSubmit { id, token, request })
    }

    /// Apply the outcome of the pending submission
    ///
    /// Success enters `Reviewing` (zero candidates included). Failure returns
    /// to `AwaitingImages` with the images kept and earlier results dropped.
    pub fn complete_submit(
        &mut self,
        id: RequestId,
        outcome: AppResult<UploadResponse>,
    ) -> AcquisitionResult<&Recognition> {
        self.expect_completion(Event::SubmitCompleted, WorkflowState::Submitting, id)?;
        self.draft = None;

        match outcome {
            Ok(response) => {
                let recognition = Recognition::from(response);
                if recognition.is_empty() {
                    tracing::info!(request_id = %id, "No candidates found");
                } else {
                    tracing::info!(
                        request_id = %id,
                        candidates = recognition.candidates.len(),
                        "Candidates received"
                    );
                }
                self.state = WorkflowState::Reviewing;
                Ok(self.recognition.insert(recognition))
            }
            Err(e) => {
                self.recognition = None;
                self.state = WorkflowState::AwaitingImages;
                let err = AcquisitionError::Remote(e);
                err.log();
                Err(err)
            }
        }
    }

    /// Submit the image pair through `gateway`
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        credential: Option<&Credential>,
    ) -> AcquisitionResult<&Recognition>
    where
        G: RemoteGateway,
    {
        let pending = self.begin_submit(credential)?;
        let outcome = gateway.submit_images(&pending.token, &pending.request).await;
        self.complete_submit(pending.id, outcome)
    }

    // ------------------------------------------------------------------------
    // Draft
    // ------------------------------------------------------------------------

    /// Build the draft from candidate `index`
    ///
    /// Also accepted while editing (replaces the draft) and after a
    /// confirmation (the candidate list is kept).
    pub fn choose_candidate(&mut self, index: usize) -> AcquisitionResult<&CandidateDraft> {
        self.expect_state(
            Event::ChooseCandidate,
            &[
                WorkflowState::Reviewing,
                WorkflowState::Editing,
                WorkflowState::Confirmed,
            ],
        )?;

        let candidates = self.candidates();
        let candidate = candidates.get(index).ok_or_else(|| {
            self.reject(AcquisitionError::CandidateOutOfRange {
                index,
                len: candidates.len(),
            })
        })?;
        let draft = CandidateDraft::from_candidate(candidate);

        tracing::debug!(index, name = %draft.name, "Candidate chosen");
        self.state = WorkflowState::Editing;
        Ok(self.draft.insert(draft))
    }

    /// Open an empty draft for manual entry
    pub fn enter_manually(&mut self) -> AcquisitionResult<&CandidateDraft> {
        self.expect_state(
            Event::EnterManually,
            &[
                WorkflowState::Reviewing,
                WorkflowState::Editing,
                WorkflowState::Confirmed,
            ],
        )?;

        tracing::debug!("Manual draft opened");
        self.state = WorkflowState::Editing;
        Ok(self.draft.insert(CandidateDraft::manual()))
    }

    /// Patch one field of the current draft
    ///
    /// A rejected patch leaves the draft unchanged.
    pub fn edit_field(&mut self, patch: DraftPatch) -> AcquisitionResult<&CandidateDraft> {
        self.expect_state(Event::EditField, &[WorkflowState::Editing])?;

        let field = patch.field();
        let Some(draft) = self.draft.as_mut() else {
            let err = AcquisitionError::NoDraft;
            err.log();
            return Err(err);
        };
        if let Err(e) = draft.apply(patch) {
            e.log();
            return Err(e);
        }

        tracing::debug!(field = %field, "Draft field updated");
        Ok(draft)
    }

    /// Parse `key` / `value` and patch the draft
    pub fn set_field(&mut self, key: &str, value: &str) -> AcquisitionResult<&CandidateDraft> {
        let patch = DraftPatch::parse(key, value).map_err(|e| self.reject(e))?;
        self.edit_field(patch)
    }

    // ------------------------------------------------------------------------
    // Confirmation
    // ------------------------------------------------------------------------

    /// Check the confirmation guards and enter `Confirming`
    ///
    /// The draft is kept until the service accepts it.
    pub fn begin_confirm(&mut self, credential: Option<&Credential>) -> AcquisitionResult<PendingConfirm> {
        if self.state == WorkflowState::Confirmed {
            return Err(self.reject(AcquisitionError::NoDraft));
        }
        self.expect_state(Event::Confirm, &[WorkflowState::Editing])?;

        let token = Self::token(credential).ok_or_else(|| self.reject(AcquisitionError::Unauthenticated))?;
        let request = self
            .draft
            .as_ref()
            .map(CandidateDraft::to_request)
            .ok_or_else(|| self.reject(AcquisitionError::NoDraft))?;

        let id = RequestId::new();
        self.pending = Some(id);
        self.state = WorkflowState::Confirming;

        tracing::info!(request_id = %id, name = %request.name, "Confirming draft");
        Ok(PendingConfirm { id, token, request })
    }

    /// Apply the outcome of the pending confirmation
    ///
    /// Success clears the draft and enters `Confirmed`. Failure returns to
    /// `Editing` with the draft intact.
    pub fn complete_confirm(
        &mut self,
        id: RequestId,
        outcome: AppResult<MessageResponse>,
    ) -> AcquisitionResult<&str> {
        self.expect_completion(Event::ConfirmCompleted, WorkflowState::Confirming, id)?;

        match outcome {
            Ok(response) => {
                self.draft = None;
                self.state = WorkflowState::Confirmed;
                tracing::info!(request_id = %id, "Card added to collection");
                Ok(self.last_confirmation.insert(response.message).as_str())
            }
            Err(e) => {
                self.state = WorkflowState::Editing;
                let err = AcquisitionError::Remote(e);
                err.log();
                Err(err)
            }
        }
    }

    /// Confirm the draft through `gateway`
    ///
    /// Exactly one confirm call is made; it is never retried.
    pub async fn confirm<G>(
        &mut self,
        gateway: &G,
        credential: Option<&Credential>,
    ) -> AcquisitionResult<&str>
    where
        G: RemoteGateway,
    {
        let pending = self.begin_confirm(credential)?;
        let outcome = gateway.confirm_draft(&pending.token, &pending.request).await;
        self.complete_confirm(pending.id, outcome)
    }

    // ------------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------------

    /// Drop images, candidates and draft and return to `Idle`
    pub fn reset(&mut self) -> AcquisitionResult<()> {
        if self.state.is_in_flight() {
            return Err(self.reject(AcquisitionError::InFlight { state: self.state }));
        }
        self.images.clear();
        self.recognition = None;
        self.draft = None;
        self.state = WorkflowState::Idle;
        tracing::debug!("Workflow reset");
        Ok(())
    }
}
