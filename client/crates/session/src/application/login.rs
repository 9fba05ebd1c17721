//! Login Use Case
//!
//! Exchanges email and password for a bearer token.

use std::sync::Arc;

use gateway::RemoteGateway;
use gateway::dto::TokenRequest;
use platform::secret::{ClearTextPassword, SecretToken};

use crate::domain::credential::Credential;
use crate::error::{SessionError, SessionResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: ClearTextPassword,
}

/// Login use case
pub struct LoginUseCase<G>
where
    G: RemoteGateway,
{
    gateway: Arc<G>,
}

impl<G> LoginUseCase<G>
where
    G: RemoteGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: LoginInput) -> SessionResult<Credential> {
        // The service calls the account identifier `username`
        let request = TokenRequest {
            username: input.email,
            password: input.password,
        };

        let response = self.gateway.authenticate(&request).await.map_err(|e| {
            let err = SessionError::from(e);
            err.log();
            err
        })?;

        let credential = Credential::new(SecretToken::new(response.access_token), request.username);

        tracing::info!(email = %credential.email(), "Signed in");
        Ok(credential)
    }
}
