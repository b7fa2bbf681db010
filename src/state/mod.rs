//! State management for the life tracker.
//!
//! - `config` - session settings and process configuration
//! - `phase` - phase state machine (selection → live → winner)
//! - `selection` - picking players for a session
//! - `session` - live life totals, dice, winner
//! - `rules` - life clamping and winner detection
//! - `dice` - dice rolls
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        Tracker<S>                               │
//! │                                                                 │
//! │  ┌────────────────┐  names  ┌─────────────┐  copies  ┌────────┐ │
//! │  │ S: RosterStore │────────▶│  Selection  │─────────▶│Session │ │
//! │  │ (injected)     │         │             │  start   │        │ │
//! │  └────────────────┘         └─────────────┘          └────────┘ │
//! │                                                                 │
//! │   Selection ──start──▶ Live ──last standing──▶ Winner           │
//! │       ▲                  │                        │             │
//! │       └──────exit────────┴────────────────────────┘             │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store is only touched from the selection side. Once a session is
//! running it works on its own copies of the names.

pub mod config;
pub mod dice;
pub mod phase;
pub mod rules;
pub mod selection;
pub mod session;

use std::path::Path;

use tracing::{debug, info, warn};

use crate::roster::{RedbRoster, RosterError, RosterStore};

// Re-export commonly used types
pub use config::{
    ConfigError, PlayerCount, SessionConfig, StartingLife, TrackerConfig, MAX_PLAYERS, MIN_PLAYERS,
};
pub use dice::{DicePair, DiceRoller, DIE_FACES};
pub use phase::{InvalidTransition, SessionEvent, SessionPhase};
pub use rules::{detect_outcome, Outcome, MAX_LIFE, MIN_LIFE};
pub use selection::Selection;
pub use session::{Seat, Session, SessionError};

/// Roster names for display, with a notice if the store could not be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterListing {
    pub names: Vec<String>,
    pub notice: Option<String>,
}

/// Application state: roster handle, current selection, and the running
/// session if there is one.
#[derive(Debug)]
pub struct Tracker<S: RosterStore> {
    roster: S,
    selection: Selection,
    session: Option<Session>,
}

impl Tracker<RedbRoster> {
    /// Open the durable roster named in `config`.
    pub fn open(config: &TrackerConfig) -> Result<Self, RosterError> {
        Self::open_path(&config.database_path)
    }

    pub fn open_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        Ok(Self::new(RedbRoster::open(path)?))
    }
}

impl<S: RosterStore> Tracker<S> {
    pub fn new(roster: S) -> Self {
        Self {
            roster,
            selection: Selection::new(),
            session: None,
        }
    }

    pub fn roster(&self) -> &S {
        &self.roster
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// Current phase. `Selection` whenever no session is running.
    pub fn phase(&self) -> SessionPhase {
        self.session
            .as_ref()
            .map(|s| s.phase().clone())
            .unwrap_or_default()
    }

    // Roster

    /// Roster names. A storage failure yields an empty list and a notice.
    pub fn roster_listing(&self) -> RosterListing {
        match self.roster.fetch_all() {
            Ok(names) => RosterListing {
                names,
                notice: None,
            },
            Err(e) => {
                warn!("Could not load roster: {}", e);
                RosterListing {
                    names: Vec::new(),
                    notice: Some(e.to_string()),
                }
            }
        }
    }

    /// Add a player to the roster. Blank names are ignored.
    pub fn add_player(&mut self, name: &str) -> Result<(), RosterError> {
        if name.trim().is_empty() {
            debug!("Ignoring blank player name");
            return Ok(());
        }
        self.roster.insert(name)?;
        info!("Added {:?} to roster", name);
        Ok(())
    }

    /// Rename a roster player. Blank or unchanged names are ignored.
    ///
    /// A successful rename clears the selection. Blank or unchanged names
    /// return early and keep the current selection.
    pub fn rename_player(&mut self, old_name: &str, new_name: &str) -> Result<(), RosterError> {
        if new_name.trim().is_empty() || old_name == new_name {
            return Ok(());
        }
        self.roster.update_name(old_name, new_name)?;
        self.selection.reset();
        info!("Renamed {:?} to {:?}", old_name, new_name);
        Ok(())
    }

    /// Remove a player from the roster. Clears the selection.
    pub fn remove_player(&mut self, name: &str) -> Result<(), RosterError> {
        self.roster.delete_by_name(name)?;
        self.selection.reset();
        info!("Removed {:?} from roster", name);
        Ok(())
    }

    // Selection

    /// Toggle a roster player in or out of the selection.
    ///
    /// Names not on the roster are ignored. Returns whether the selection
    /// changed.
    pub fn toggle_player(&mut self, name: &str) -> bool {
        if self.selection.is_selected(name) {
            return self.selection.toggle(name);
        }
        match self.roster.contains(name) {
            Ok(true) => self.selection.toggle(name),
            Ok(false) => {
                debug!("Ignoring toggle of {:?}: not on roster", name);
                false
            }
            Err(e) => {
                warn!("Could not check roster for {:?}: {}", name, e);
                false
            }
        }
    }

    pub fn set_player_count(&mut self, count: PlayerCount) {
        self.selection.set_player_count(count);
    }

    pub fn set_starting_life(&mut self, life: StartingLife) {
        self.selection.set_starting_life(life);
    }

    /// Whether the start action should be enabled.
    pub fn can_start(&self) -> bool {
        self.session.is_none() && self.selection.is_complete()
    }

    // Session

    /// Start a session from the current selection.
    ///
    /// Nothing changes if the selection is incomplete or a session is
    /// already running.
    pub fn start_session(&mut self) -> Result<&mut Session, SessionError> {
        self.start_session_with(DiceRoller::new())
    }

    /// Start a session with a specific dice roller.
    pub fn start_session_with(&mut self, roller: DiceRoller) -> Result<&mut Session, SessionError> {
        if let Some(running) = &self.session {
            running.phase().apply(SessionEvent::Start)?;
        }

        let players = self.selection.selected().to_vec();
        let session = Session::with_roller(players, self.selection.config(), roller)?;
        info!(
            "Session started: {} players at {} life",
            session.seats().len(),
            session.config().starting_life.value()
        );

        Ok(self.session.insert(session))
    }

    /// Leave the running session. The session is discarded and the previous
    /// selection is kept.
    pub fn exit_session(&mut self) -> Option<Session> {
        let mut session = self.session.take()?;
        if let Err(e) = session.close() {
            warn!("{}", e);
        }
        info!("Session ended");
        Some(session)
    }

    /// Convert to JSON for the host UI.
    pub fn to_json(&self) -> serde_json::Value {
        let listing = self.roster_listing();
        let roster: Vec<serde_json::Value> = listing
            .names
            .iter()
            .map(|name| {
                serde_json::json!({
                    "name": name,
                    "seat": self.selection.position_of(name)
                })
            })
            .collect();

        serde_json::json!({
            "phase": self.phase().as_str(),
            "roster": roster,
            "notice": listing.notice,
            "selection": self.selection.to_json(),
            "session": self.session.as_ref().map(Session::to_json)
        })
    }
}
