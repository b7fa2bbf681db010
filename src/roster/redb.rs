//! Redb-backed durable roster.
//!
//! One table of `(id, entry)` rows. Ids autoincrement, so key order is
//! insertion order. Entries are stored as JSON.

use std::{path::Path, sync::Arc};

use redb::{Database, ReadableTable, Table, TableDefinition};
use tracing::{debug, info};

use super::{plan_rename, validate_name, RosterEntry, RosterError, RosterStore};

/// Table: players
/// Key: row id (u64, autoincrement)
/// Value: JSON-encoded RosterEntry
const PLAYERS: TableDefinition<u64, &[u8]> = TableDefinition::new("players");

/// Durable roster backed by Redb.
///
/// Clone is cheap (Arc); clones share the same database.
#[derive(Clone)]
pub struct RedbRoster {
    db: Arc<Database>,
}

impl std::fmt::Debug for RedbRoster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbRoster").finish_non_exhaustive()
    }
}

impl RedbRoster {
    /// Open or create a roster database at the given path.
    ///
    /// # Errors
    ///
    /// Returns `RosterError::Unavailable` if the database cannot be opened or
    /// created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let db = Database::create(path.as_ref()).map_err(RosterError::unavailable)?;

        let txn = db.begin_write().map_err(RosterError::unavailable)?;
        {
            let _ = txn.open_table(PLAYERS).map_err(RosterError::unavailable)?;
        }
        txn.commit().map_err(RosterError::unavailable)?;

        info!("Opened roster at {}", path.as_ref().display());
        Ok(Self { db: Arc::new(db) })
    }

    /// Apply `f` to the players table inside one write transaction.
    fn write<F>(&self, f: F) -> Result<(), RosterError>
    where
        F: FnOnce(&mut Table<'_, u64, &'static [u8]>) -> Result<(), RosterError>,
    {
        let txn = self.db.begin_write().map_err(RosterError::unavailable)?;
        {
            let mut table = txn.open_table(PLAYERS).map_err(RosterError::unavailable)?;
            f(&mut table)?;
        }
        txn.commit().map_err(RosterError::unavailable)
    }
}

fn read_entries<T: ReadableTable<u64, &'static [u8]>>(
    table: &T,
) -> Result<Vec<RosterEntry>, RosterError> {
    let mut entries = Vec::new();
    for row in table.iter().map_err(RosterError::unavailable)? {
        let (_, value) = row.map_err(RosterError::unavailable)?;
        entries.push(decode_entry(value.value())?);
    }
    Ok(entries)
}

fn encode_entry(entry: &RosterEntry) -> Result<Vec<u8>, RosterError> {
    serde_json::to_vec(entry).map_err(RosterError::serialization)
}

fn decode_entry(bytes: &[u8]) -> Result<RosterEntry, RosterError> {
    serde_json::from_slice(bytes).map_err(RosterError::serialization)
}

impl RosterStore for RedbRoster {
    fn insert(&self, name: &str) -> Result<(), RosterError> {
        validate_name(name)?;

        self.write(|table| {
            if read_entries(&*table)?.iter().any(|e| e.name == name) {
                return Err(RosterError::DuplicateName(name.to_string()));
            }

            let last_id = table
                .last()
                .map_err(RosterError::unavailable)?
                .map(|(key, _)| key.value())
                .unwrap_or(0);

            let entry = RosterEntry::new(last_id + 1, name.to_string());
            let bytes = encode_entry(&entry)?;
            table
                .insert(entry.id, bytes.as_slice())
                .map_err(RosterError::unavailable)?;
            Ok(())
        })?;

        debug!("Added {:?} to roster", name);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<RosterEntry>, RosterError> {
        let txn = self.db.begin_read().map_err(RosterError::unavailable)?;
        let table = txn.open_table(PLAYERS).map_err(RosterError::unavailable)?;
        read_entries(&table)
    }

    fn delete_by_name(&self, name: &str) -> Result<(), RosterError> {
        self.write(|table| {
            let ids: Vec<u64> = read_entries(&*table)?
                .into_iter()
                .filter(|e| e.name == name)
                .map(|e| e.id)
                .collect();

            for id in &ids {
                table.remove(id).map_err(RosterError::unavailable)?;
            }
            if !ids.is_empty() {
                debug!("Removed {:?} from roster", name);
            }
            Ok(())
        })
    }

    fn update_name(&self, old_name: &str, new_name: &str) -> Result<(), RosterError> {
        self.write(|table| {
            let entries = read_entries(&*table)?;
            let Some(index) = plan_rename(&entries, old_name, new_name)? else {
                return Ok(());
            };

            let mut entry = entries[index].clone();
            entry.name = new_name.to_string();
            let bytes = encode_entry(&entry)?;
            table
                .insert(entry.id, bytes.as_slice())
                .map_err(RosterError::unavailable)?;

            debug!("Renamed {:?} to {:?}", old_name, new_name);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_insert_list_rename_remove() {
        let dir = tempdir().unwrap();
        let roster = RedbRoster::open(dir.path().join("roster.redb")).unwrap();

        roster.insert("Alice").unwrap();
        roster.insert("Bob").unwrap();
        roster.insert("Carol").unwrap();
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alice", "Bob", "Carol"]);

        roster.update_name("Alice", "Alicia").unwrap();
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alicia", "Bob", "Carol"]);

        roster.delete_by_name("Bob").unwrap();
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alicia", "Carol"]);
    }

    #[test]
    fn test_rejects_blank_and_duplicate() {
        let dir = tempdir().unwrap();
        let roster = RedbRoster::open(dir.path().join("roster.redb")).unwrap();
        roster.insert("Alice").unwrap();
        roster.insert("Bob").unwrap();

        assert_eq!(roster.insert(" "), Err(RosterError::EmptyName));
        assert_eq!(
            roster.insert("Alice"),
            Err(RosterError::DuplicateName("Alice".to_string()))
        );
        assert_eq!(
            roster.update_name("Bob", "Alice"),
            Err(RosterError::DuplicateName("Alice".to_string()))
        );
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_missing_names_are_noops() {
        let dir = tempdir().unwrap();
        let roster = RedbRoster::open(dir.path().join("roster.redb")).unwrap();
        roster.insert("Alice").unwrap();

        roster.update_name("Nobody", "Somebody").unwrap();
        roster.delete_by_name("Nobody").unwrap();
        roster.delete_by_name("Alice").unwrap();
        roster.delete_by_name("Alice").unwrap();

        assert!(roster.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_ids_follow_last_row() {
        let dir = tempdir().unwrap();
        let roster = RedbRoster::open(dir.path().join("roster.redb")).unwrap();
        roster.insert("Alice").unwrap();
        roster.insert("Bob").unwrap();
        roster.delete_by_name("Alice").unwrap();
        roster.insert("Carol").unwrap();

        let ids: Vec<u64> = roster.entries().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
