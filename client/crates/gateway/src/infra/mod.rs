//! Infrastructure Layer
//!
//! Transport implementations of the gateway contract.

pub mod http;
