//! Session Context
//!
//! One user session: the credential store, the acquisition workflow and a
//! shared gateway handle. Sessions share nothing else, so several can run
//! side by side.

use std::sync::Arc;

use gateway::RemoteGateway;
use gateway::dto::CollectionFilter;
use kernel::error::{app_error::AppResult, kind::ErrorKind};
use kernel::id::SessionId;
use platform::secret::ClearTextPassword;
use session::{Credential, RegisterOutput, SessionResult, SessionStore};

use crate::application::workflow::AcquisitionWorkflow;
use crate::domain::collection::{CollectionEntry, CollectionStats};
use crate::domain::entities::Recognition;
use crate::error::{AcquisitionError, AcquisitionResult};

/// Per-session context
///
/// A gated call answered with `Auth` clears the credential here, through
/// [`SessionStore::invalidate`].
pub struct SessionContext<G>
where
    G: RemoteGateway,
{
    id: SessionId,
    gateway: Arc<G>,
    session: SessionStore<G>,
    workflow: AcquisitionWorkflow,
}

impl<G> SessionContext<G>
where
    G: RemoteGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        let id = SessionId::new();
        tracing::debug!(session_id = %id, "Session opened");
        Self {
            id,
            session: SessionStore::new(gateway.clone()),
            gateway,
            workflow: AcquisitionWorkflow::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn session(&self) -> &SessionStore<G> {
        &self.session
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.session.credential()
    }

    pub fn workflow(&self) -> &AcquisitionWorkflow {
        &self.workflow
    }

    /// Local workflow events (image selection, candidate choice, edits, reset)
    pub fn workflow_mut(&mut self) -> &mut AcquisitionWorkflow {
        &mut self.workflow
    }

    // ------------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------------

    pub async fn register(
        &self,
        email: impl Into<String>,
        password: ClearTextPassword,
    ) -> SessionResult<RegisterOutput> {
        self.session.register(email, password).await
    }

    pub async fn login(
        &mut self,
        email: impl Into<String>,
        password: ClearTextPassword,
    ) -> SessionResult<&Credential> {
        let credential = self.session.login(email, password).await?;
        tracing::info!(session_id = %self.id, "Session authenticated");
        Ok(credential)
    }

    pub fn logout(&mut self) -> bool {
        self.session.logout()
    }

    // ------------------------------------------------------------------------
    // Gated workflow steps
    // ------------------------------------------------------------------------

    /// Submit the selected images
    pub async fn submit(&mut self) -> AcquisitionResult<&Recognition> {
        let result = self
            .workflow
            .submit(self.gateway.as_ref(), self.session.credential())
            .await;
        if let Err(err) = &result {
            Self::expire_on_auth(&mut self.session, self.id, err);
        }
        result
    }

    /// Confirm the current draft
    pub async fn confirm(&mut self) -> AcquisitionResult<&str> {
        let result = self
            .workflow
            .confirm(self.gateway.as_ref(), self.session.credential())
            .await;
        if let Err(err) = &result {
            Self::expire_on_auth(&mut self.session, self.id, err);
        }
        result
    }

    // ------------------------------------------------------------------------
    // Collection (read-only)
    // ------------------------------------------------------------------------

    pub async fn collection(&mut self, filter: &CollectionFilter) -> AcquisitionResult<Vec<CollectionEntry>> {
        let outcome = {
            let token = self.session.require_token()?;
            self.gateway.list_collection(token, filter).await
        };
        let entries = self.gated(outcome)?;
        tracing::debug!(session_id = %self.id, entries = entries.len(), "Collection listed");
        Ok(entries.into_iter().map(CollectionEntry::from).collect())
    }

    /// Total value of the collection
    pub async fn collection_value(&mut self) -> AcquisitionResult<f64> {
        let outcome = {
            let token = self.session.require_token()?;
            self.gateway.collection_value(token).await
        };
        Ok(self.gated(outcome)?.total_value)
    }

    pub async fn collection_stats(&mut self) -> AcquisitionResult<CollectionStats> {
        let outcome = {
            let token = self.session.require_token()?;
            self.gateway.collection_stats(token).await
        };
        Ok(self.gated(outcome)?.into())
    }

    fn gated<T>(&mut self, outcome: AppResult<T>) -> AcquisitionResult<T> {
        outcome.map_err(|e| {
            let err = AcquisitionError::Remote(e);
            err.log();
            Self::expire_on_auth(&mut self.session, self.id, &err);
            err
        })
    }

    fn expire_on_auth(session: &mut SessionStore<G>, id: SessionId, err: &AcquisitionError) {
        if err.kind() == ErrorKind::Auth && err.is_remote() && session.invalidate(&err.to_string()) {
            tracing::warn!(session_id = %id, "Signed out after the service rejected the credential");
        }
    }
}
