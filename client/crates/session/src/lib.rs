//! Session Module
//!
//! Holds the authentication credential of one user session.
//!
//! Structure:
//! - `domain/` - the [`Credential`] entity
//! - `application/` - register / login use cases and the [`SessionStore`]
//!
//! ## Ownership
//! [`SessionStore`] is the only writer of the credential. Other components
//! read it through [`SessionStore::credential`] / [`SessionStore::token`].

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::{
    LoginInput, LoginUseCase, RegisterInput, RegisterOutput, RegisterUseCase, SessionStore,
};
pub use domain::credential::Credential;
pub use error::{SessionError, SessionResult};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
