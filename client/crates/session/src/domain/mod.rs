//! Domain Layer

pub mod credential;

pub use credential::Credential;
