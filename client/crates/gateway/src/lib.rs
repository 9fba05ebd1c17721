//! Remote Gateway
//!
//! The single boundary between the client and the recognition / account
//! service. Owns no session state: every call takes the request record it
//! needs (and the bearer token for gated calls), performs one exchange and
//! returns either the decoded payload or a normalized
//! [`kernel::error::app_error::AppError`].
//!
//! Structure:
//! - `contract` - the [`RemoteGateway`] trait
//! - `dto` - wire request / response records
//! - `infra/` - reqwest implementation
//! - `status` - startup discovery probe
//!
//! ## Retry policy
//! The gateway never retries. `confirm_draft` is not idempotent (each call
//! may create a collection entry), so callers must not retry it silently.

pub mod contract;
pub mod dto;
pub mod infra;
pub mod status;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-exports for convenience
pub use contract::{LocalRemoteGateway, RemoteGateway};
pub use infra::http::HttpGateway;
pub use status::{ServiceStatus, probe};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
