//! Application Layer
//!
//! Use cases and the session store composing them.

pub mod login;
pub mod register;
pub mod store;

// Re-exports
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use store::SessionStore;
