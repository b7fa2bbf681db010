//! Lifetally State Library
//!
//! Roster and session state for a multiplayer life counter.
//!
//! # Overview
//!
//! - **Roster** - Durable list of player names behind the `RosterStore`
//!   trait, with a redb-backed store and an in-memory one.
//!
//! - **Selection** - Pick 2 to 4 roster players and a starting life total.
//!
//! - **Session** - Live life totals with saturating steppers, dice rolls,
//!   and automatic winner detection after every change.
//!
//! - **Phase State Machine** - Selection → Live → Winner with validated
//!   transitions.
//!
//! # Design Principles
//!
//! 1. **No UI** - Pure state and transitions; snapshots convert to JSON for
//!    whatever renders them.
//!
//! 2. **Injected storage** - The roster store is constructed by the host and
//!    passed in. There is no global instance.
//!
//! 3. **Sessions hold copies** - A running session never sees roster edits.
//!
//! # Example
//!
//! ```rust
//! use lifetally_state::{roster::MemoryRoster, DiceRoller, Outcome, Tracker};
//!
//! let roster = MemoryRoster::with_names(["Alice", "Bob"]).unwrap();
//! let mut tracker = Tracker::new(roster);
//!
//! tracker.toggle_player("Alice");
//! tracker.toggle_player("Bob");
//! assert!(tracker.can_start());
//!
//! let session = tracker.start_session_with(DiceRoller::seeded(1)).unwrap();
//! let bob = session.seat_of("Bob").unwrap();
//! let outcome = session.adjust_score(bob, -20).unwrap();
//!
//! assert_eq!(outcome, Outcome::Winner(0));
//! assert_eq!(session.winner(), Some("Alice"));
//! ```

pub mod roster;
pub mod state;
pub mod telemetry;

// Re-export everything from state module at crate root
pub use state::*;
