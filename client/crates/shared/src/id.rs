//! Typed ids
//!
//! Random UUID v4 ids tagged with a marker type, so a session id can never be
//! passed where a request id is expected.

use std::fmt;
use std::marker::PhantomData;

use uuid::Uuid;

/// UUID tagged with the kind of thing it names
///
/// ```
/// use kernel::id::{RequestId, SessionId};
///
/// let session = SessionId::new();
/// let request = RequestId::new();
/// assert_ne!(session.to_string(), request.to_string());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id<T> {
    value: Uuid,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Fresh random id
    pub fn new() -> Self {
        Self {
            value: Uuid::new_v4(),
            _marker: PhantomData,
        }
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

pub mod markers {
    /// Interactive session
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Session;

    /// In-flight remote request
    #[derive(Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Request;
}

pub type SessionId = Id<markers::Session>;
pub type RequestId = Id<markers::Request>;
