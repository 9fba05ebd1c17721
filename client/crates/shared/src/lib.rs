//! Shared Kernel - Cross-crate minimal core
//!
//! This crate contains the "smallest core" of client vocabulary:
//! - The error taxonomy every component reports in (network / auth /
//!   validation / server / unauthenticated)
//! - The unified [`error::app_error::AppError`] carried across crate borders
//! - Typed ID wrappers used to correlate sessions and in-flight requests
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
