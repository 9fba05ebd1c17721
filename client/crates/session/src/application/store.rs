//! Session Store
//!
//! Sole owner of the current credential.

use std::sync::Arc;

use gateway::RemoteGateway;
use platform::secret::{ClearTextPassword, SecretToken};

use crate::application::login::{LoginInput, LoginUseCase};
use crate::application::register::{RegisterInput, RegisterOutput, RegisterUseCase};
use crate::domain::credential::Credential;
use crate::error::{SessionError, SessionResult};

/// Session store
///
/// Holds at most one [`Credential`]. A successful login replaces it; a
/// failed login leaves it untouched.
pub struct SessionStore<G>
where
    G: RemoteGateway,
{
    register: RegisterUseCase<G>,
    login: LoginUseCase<G>,
    credential: Option<Credential>,
}

impl<G> SessionStore<G>
where
    G: RemoteGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            register: RegisterUseCase::new(gateway.clone()),
            login: LoginUseCase::new(gateway),
            credential: None,
        }
    }

    /// Create an account; the held credential is not affected
    pub async fn register(
        &self,
        email: impl Into<String>,
        password: ClearTextPassword,
    ) -> SessionResult<RegisterOutput> {
        self.register
            .execute(RegisterInput {
                email: email.into(),
                password,
            })
            .await
    }

    /// Sign in and replace the held credential
    pub async fn login(
        &mut self,
        email: impl Into<String>,
        password: ClearTextPassword,
    ) -> SessionResult<&Credential> {
        let credential = self
            .login
            .execute(LoginInput {
                email: email.into(),
                password,
            })
            .await?;

        if let Some(previous) = &self.credential {
            tracing::debug!(previous = %previous.email(), "Replacing credential");
        }
        Ok(self.credential.insert(credential))
    }

    /// Clear the credential
    ///
    /// Returns whether one was held.
    pub fn logout(&mut self) -> bool {
        match self.credential.take() {
            Some(credential) => {
                tracing::info!(email = %credential.email(), "Signed out");
                true
            }
            None => false,
        }
    }

    /// Clear the credential after the service rejected it
    pub fn invalidate(&mut self, reason: &str) -> bool {
        match self.credential.take() {
            Some(credential) => {
                tracing::warn!(email = %credential.email(), reason, "Credential rejected, signed out");
                true
            }
            None => false,
        }
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn token(&self) -> Option<&SecretToken> {
        self.credential.as_ref().map(Credential::token)
    }

    /// Token for a gated call
    pub fn require_token(&self) -> SessionResult<&SecretToken> {
        self.token().ok_or_else(|| {
            let err = SessionError::NotSignedIn;
            err.log();
            err
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}
