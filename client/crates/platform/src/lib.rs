//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Client configuration (service URL, request timeout, user agent)
//! - HTTP transport plumbing (client construction, URL normalization,
//!   error-body detail extraction)
//! - Zeroized secrets (clear text passwords, bearer tokens)

pub mod config;
pub mod http;
pub mod secret;
