use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::{plan_rename, validate_name, RosterEntry, RosterError, RosterStore};

/// In-memory roster for tests and previews.
///
/// State lives behind `Arc<Mutex<>>`, so clones share one roster. A poisoned
/// lock surfaces as `RosterError::Unavailable`.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoster {
    inner: Arc<Mutex<MemoryRosterInner>>,
}

#[derive(Debug, Default)]
struct MemoryRosterInner {
    /// Entries in id order
    entries: Vec<RosterEntry>,
}

impl MemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Roster pre-filled with `names`, in order.
    pub fn with_names<I, S>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roster = Self::new();
        for name in names {
            roster.insert(name.as_ref())?;
        }
        Ok(roster)
    }

    pub fn len(&self) -> Result<usize, RosterError> {
        Ok(self.lock()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, RosterError> {
        Ok(self.len()? == 0)
    }

    /// Poison the shared lock by panicking while holding it.
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let inner = Arc::clone(&self.inner);
        let _ = std::thread::spawn(move || {
            let _guard = inner.lock().unwrap();
            panic!("poisoning roster lock");
        })
        .join();
    }

    fn lock(&self) -> Result<MutexGuard<'_, MemoryRosterInner>, RosterError> {
        self.inner
            .lock()
            .map_err(|_| RosterError::Unavailable("roster lock poisoned".to_string()))
    }
}

impl RosterStore for MemoryRoster {
    fn insert(&self, name: &str) -> Result<(), RosterError> {
        validate_name(name)?;
        let mut inner = self.lock()?;

        if inner.entries.iter().any(|e| e.name == name) {
            return Err(RosterError::DuplicateName(name.to_string()));
        }

        let id = inner.entries.last().map_or(0, |e| e.id) + 1;
        inner.entries.push(RosterEntry::new(id, name.to_string()));
        debug!("Added {:?} to in-memory roster", name);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<RosterEntry>, RosterError> {
        Ok(self.lock()?.entries.clone())
    }

    fn delete_by_name(&self, name: &str) -> Result<(), RosterError> {
        let mut inner = self.lock()?;
        inner.entries.retain(|e| e.name != name);
        Ok(())
    }

    fn update_name(&self, old_name: &str, new_name: &str) -> Result<(), RosterError> {
        let mut inner = self.lock()?;
        if let Some(index) = plan_rename(&inner.entries, old_name, new_name)? {
            inner.entries[index].name = new_name.to_string();
        }
        Ok(())
    }
}
