//! Register Use Case
//!
//! Creates an account. Does not authenticate.

use std::sync::Arc;

use gateway::RemoteGateway;
use gateway::dto::RegisterRequest;
use platform::secret::ClearTextPassword;

use crate::error::{SessionError, SessionResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: ClearTextPassword,
}

/// Register output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterOutput {
    /// Service message, shown verbatim
    pub message: String,
}

/// Register use case
pub struct RegisterUseCase<G>
where
    G: RemoteGateway,
{
    gateway: Arc<G>,
}

impl<G> RegisterUseCase<G>
where
    G: RemoteGateway,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    pub async fn execute(&self, input: RegisterInput) -> SessionResult<RegisterOutput> {
        let request = RegisterRequest {
            email: input.email,
            password: input.password,
        };

        let response = self.gateway.register(&request).await.map_err(|e| {
            let err = SessionError::from(e);
            err.log();
            err
        })?;

        tracing::info!(email = %request.email, "Account registered");
        Ok(RegisterOutput {
            message: response.message,
        })
    }
}
