//! Roster storage errors.

use thiserror::Error;

/// Errors from a roster store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    /// Name is empty or only whitespace
    #[error("player name is empty")]
    EmptyName,

    /// Another roster entry already has this name
    #[error("player {0:?} is already on the roster")]
    DuplicateName(String),

    /// The backing store could not be reached
    #[error("roster storage unavailable: {0}")]
    Unavailable(String),

    /// A stored entry could not be encoded or decoded
    #[error("roster entry serialization failed: {0}")]
    Serialization(String),
}

impl RosterError {
    pub(crate) fn unavailable(e: impl std::fmt::Display) -> Self {
        Self::Unavailable(e.to_string())
    }

    pub(crate) fn serialization(e: impl std::fmt::Display) -> Self {
        Self::Serialization(e.to_string())
    }
}
