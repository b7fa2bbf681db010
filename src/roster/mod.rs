//! Roster storage.
//!
//! The roster is the durable list of player names, independent of any
//! session. Stores are constructed explicitly and handed to whatever needs
//! them; clones share the same underlying roster.
//!
//! Names are unique by exact match. Listing order is insertion order, and a
//! rename keeps the entry's place in that order.

mod error;
mod memory;
mod redb;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use error::RosterError;
pub use memory::MemoryRoster;

pub use self::redb::RedbRoster;

/// A stored roster row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Autoincrement row id; defines listing order
    pub id: u64,
    pub name: String,
    pub added_at: DateTime<Utc>,
}

impl RosterEntry {
    pub fn new(id: u64, name: String) -> Self {
        Self {
            id,
            name,
            added_at: Utc::now(),
        }
    }
}

/// Roster storage abstraction.
///
/// Synchronous, single writer. Every operation is safe to repeat: removing
/// or renaming a name that isn't there is a no-op.
pub trait RosterStore: Clone + Send + Sync + 'static {
    /// Add a name to the end of the roster.
    ///
    /// # Errors
    ///
    /// `EmptyName` for a blank name, `DuplicateName` if it already exists.
    fn insert(&self, name: &str) -> Result<(), RosterError>;

    /// All entries in insertion order.
    fn entries(&self) -> Result<Vec<RosterEntry>, RosterError>;

    /// Remove every entry with this exact name.
    fn delete_by_name(&self, name: &str) -> Result<(), RosterError>;

    /// Rename in place.
    ///
    /// No-op if `old_name` is absent or equal to `new_name`.
    ///
    /// # Errors
    ///
    /// `EmptyName` for a blank new name, `DuplicateName` if another entry
    /// already has `new_name`.
    fn update_name(&self, old_name: &str, new_name: &str) -> Result<(), RosterError>;

    /// All names in insertion order.
    fn fetch_all(&self) -> Result<Vec<String>, RosterError> {
        Ok(self.entries()?.into_iter().map(|e| e.name).collect())
    }

    fn contains(&self, name: &str) -> Result<bool, RosterError> {
        Ok(self.entries()?.iter().any(|e| e.name == name))
    }
}

/// Reject blank names.
pub(crate) fn validate_name(name: &str) -> Result<(), RosterError> {
    if name.trim().is_empty() {
        Err(RosterError::EmptyName)
    } else {
        Ok(())
    }
}

/// Validate a rename against the current entries.
///
/// `Ok(None)` means nothing to do; `Ok(Some(i))` is the index to rename.
pub(crate) fn plan_rename(
    entries: &[RosterEntry],
    old_name: &str,
    new_name: &str,
) -> Result<Option<usize>, RosterError> {
    validate_name(new_name)?;

    let Some(index) = entries.iter().position(|e| e.name == old_name) else {
        return Ok(None);
    };

    if old_name == new_name {
        return Ok(None);
    }

    if entries.iter().any(|e| e.name == new_name) {
        return Err(RosterError::DuplicateName(new_name.to_string()));
    }

    Ok(Some(index))
}
