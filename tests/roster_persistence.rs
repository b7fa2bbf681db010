//! Roster durability tests for `RedbRoster`.
//!
//! Data must survive closing and reopening the database.

use lifetally_state::roster::{RedbRoster, RosterError, RosterStore};
use lifetally_state::{Tracker, TrackerConfig};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_roster_survives_reopen() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("players.redb");

    {
        let roster = RedbRoster::open(&db_path).unwrap();
        roster.insert("Alice").unwrap();
        roster.insert("Bob").unwrap();
        roster.insert("Carol").unwrap();
        roster.update_name("Bob", "Robert").unwrap();
        roster.delete_by_name("Carol").unwrap();
        // Database dropped
    }

    {
        let roster = RedbRoster::open(&db_path).unwrap();
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alice", "Robert"]);

        let entries = roster.entries().unwrap();
        assert_eq!(entries[1].id, 2);

        roster.insert("Dan").unwrap();
        assert_eq!(roster.fetch_all().unwrap(), vec!["Alice", "Robert", "Dan"]);
    }
}

#[test]
fn test_tracker_opens_configured_path() {
    let dir = tempdir().unwrap();
    let config = TrackerConfig::default().with_database_path(dir.path().join("roster.redb"));

    {
        let mut tracker = Tracker::open(&config).unwrap();
        tracker.add_player("Alice").unwrap();
    }

    let tracker = Tracker::open(&config).unwrap();
    let listing = tracker.roster_listing();
    assert_eq!(listing.names, vec!["Alice"]);
    assert_eq!(listing.notice, None);
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("tracker.json");
    let db_path = dir.path().join("from-file.redb");
    std::fs::write(
        &config_path,
        serde_json::json!({ "database_path": db_path, "log_filter": "debug" }).to_string(),
    )
    .unwrap();

    let config = TrackerConfig::load(&config_path).unwrap();
    assert_eq!(config.database_path, db_path);

    let tracker = Tracker::open(&config).unwrap();
    assert!(tracker.roster_listing().names.is_empty());
    assert!(db_path.exists());
}

#[test]
fn test_unopenable_path_is_unavailable() {
    let dir = tempdir().unwrap();
    // A directory cannot be opened as a database file
    let result = RedbRoster::open(dir.path());
    assert!(matches!(result, Err(RosterError::Unavailable(_))));
}
