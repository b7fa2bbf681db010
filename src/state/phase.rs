//! Session phase state machine.
//!
//! Tracks which screen of the tracker is live and validates transitions.
//!
//! # State Diagram
//!
//! ```text
//! ┌──────────────┐
//! │  Selection   │◀─────────────────────────────────┐
//! └──────┬───────┘                                  │
//!        │ start (selection complete)               │ exit
//!        ▼                                          │
//! ┌──────────────┐                                  │
//! │     Live     │──────────────────────────────────┤
//! └──┬────────▲──┘                                  │
//!    │        │ score change, alive != 1            │
//!    │        └─────────                            │
//!    │ last player standing                         │
//!    ▼                                              │
//! ┌──────────────────────┐   dismiss   ┌─────────────────────┐
//! │ Winner (announcing)  │────────────▶│ Winner (dismissed)  │
//! └──────────────────────┘             └─────────────────────┘
//! ```
//!
//! The Live self-loop is not an event: score changes that leave more or
//! fewer than one player alive do not touch the phase.

use std::fmt;

use thiserror::Error;

/// Where the tracker currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// Picking players and settings
    #[default]
    Selection,

    /// Session running, life totals changing
    Live,

    /// One player left alive. `announcing` is the celebration overlay.
    Winner { name: String, announcing: bool },
}

impl SessionPhase {
    /// Check if a session exists (live or decided).
    pub fn in_session(&self) -> bool {
        !matches!(self, Self::Selection)
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live)
    }

    pub fn is_decided(&self) -> bool {
        matches!(self, Self::Winner { .. })
    }

    /// Winner's name, if decided.
    pub fn winner(&self) -> Option<&str> {
        match self {
            Self::Winner { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Whether the winner overlay should be shown.
    pub fn is_announcing(&self) -> bool {
        matches!(
            self,
            Self::Winner {
                announcing: true,
                ..
            }
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Live => "live",
            Self::Winner { .. } => "winner",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Selection => write!(f, "Selection"),
            Self::Live => write!(f, "Live"),
            Self::Winner { name, .. } => write!(f, "Winner({})", name),
        }
    }
}

/// Phase transition events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Start,
    LastStanding { name: String },
    Dismiss,
    Exit,
}

/// Error when a phase transition is invalid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid transition from {from} via {event:?}: {reason}")]
pub struct InvalidTransition {
    pub from: SessionPhase,
    pub event: SessionEvent,
    pub reason: &'static str,
}

impl SessionPhase {
    /// Apply an event, returning the new phase or an error.
    pub fn apply(&self, event: SessionEvent) -> Result<Self, InvalidTransition> {
        self.transition(&event)
    }

    /// Apply an event in place, returning error if invalid.
    pub fn apply_mut(&mut self, event: SessionEvent) -> Result<(), InvalidTransition> {
        *self = self.transition(&event)?;
        Ok(())
    }

    fn transition(&self, event: &SessionEvent) -> Result<Self, InvalidTransition> {
        use SessionEvent::*;
        use SessionPhase::*;

        let invalid = |reason: &'static str| InvalidTransition {
            from: self.clone(),
            event: event.clone(),
            reason,
        };

        match (self, event) {
            // Start: Selection -> Live
            (Selection, Start) => Ok(Live),
            (_, Start) => Err(invalid("Session already running")),

            // LastStanding: Live -> Winner
            (Live, LastStanding { name }) => Ok(Winner {
                name: name.clone(),
                announcing: true,
            }),
            (Winner { .. }, LastStanding { .. }) => Err(invalid("Winner already decided")),
            (Selection, LastStanding { .. }) => Err(invalid("No session running")),

            // Dismiss: hide the overlay, stay decided
            (Winner { name, .. }, Dismiss) => Ok(Winner {
                name: name.clone(),
                announcing: false,
            }),
            (_, Dismiss) => Err(invalid("No winner to dismiss")),

            // Exit: any session -> Selection
            (Selection, Exit) => Err(invalid("No session running")),
            (_, Exit) => Ok(Selection),
        }
    }
}
