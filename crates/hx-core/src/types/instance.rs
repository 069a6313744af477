//! Caller-supplied instance identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier correlating a request with its asynchronous response.
///
/// The host runtime assigns one per script context. Endpoints carry it
/// through unchanged and never mint new ones.
///
/// # Examples
///
/// ```
/// use hx_core::InstanceId;
///
/// let id = InstanceId::new(7);
/// assert_eq!(id.to_string(), "7");
/// assert_eq!(id.as_i32(), 7);
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct InstanceId(pub i32);

impl InstanceId {
    /// Wraps a raw identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self.0
    }
}

impl From<i32> for InstanceId {
    #[inline]
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
