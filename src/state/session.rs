//! Live session state.
//!
//! Tracks each seat's life total and dice, and decides the winner after
//! every life change.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use super::config::SessionConfig;
use super::dice::{DicePair, DiceRoller};
use super::phase::{InvalidTransition, SessionEvent, SessionPhase};
use super::rules::{adjust_life, detect_outcome, Outcome};

/// Session errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{selected} of {required} players selected")]
    IncompleteSelection { selected: usize, required: usize },
    #[error("{0} is selected more than once")]
    DuplicatePlayer(String),
    #[error("no seat {0} in this session")]
    NoSuchSeat(usize),
    #[error("a winner has already been decided")]
    Finished,
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
}

/// One player's place at the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    /// Copied from the roster when the session started
    pub name: String,
    pub life: i32,
    /// `None` until the first roll
    pub dice: Option<DicePair>,
}

impl Seat {
    fn new(name: String, life: i32) -> Self {
        Self {
            name,
            life,
            dice: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        super::rules::is_alive(self.life)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "name": self.name,
            "life": self.life,
            "dice": self.dice.map(|d| d.to_json())
        })
    }
}

/// A running session.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,

    /// Seats in selection order
    seats: Vec<Seat>,

    phase: SessionPhase,

    /// Result of the last winner check
    outcome: Outcome,

    /// Set by the first roll
    dice_visible: bool,

    roller: DiceRoller,

    pub started_at: DateTime<Utc>,

    /// When the winner was decided
    pub decided_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Start a session for `players` (seat order) with entropy-seeded dice.
    pub fn start(players: Vec<String>, config: SessionConfig) -> Result<Self, SessionError> {
        Self::with_roller(players, config, DiceRoller::new())
    }

    /// Start a session with a specific dice roller.
    pub fn with_roller(
        players: Vec<String>,
        config: SessionConfig,
        roller: DiceRoller,
    ) -> Result<Self, SessionError> {
        let required = config.player_count.get();
        if players.len() != required {
            return Err(SessionError::IncompleteSelection {
                selected: players.len(),
                required,
            });
        }

        for (i, name) in players.iter().enumerate() {
            if players[..i].contains(name) {
                return Err(SessionError::DuplicatePlayer(name.clone()));
            }
        }

        let phase = SessionPhase::Selection.apply(SessionEvent::Start)?;
        let life = config.starting_life.value();
        let seats = players
            .into_iter()
            .map(|name| Seat::new(name, life))
            .collect();

        Ok(Self {
            config,
            seats,
            phase,
            outcome: Outcome::Undecided,
            dice_visible: false,
            roller,
            started_at: Utc::now(),
            decided_at: None,
        })
    }

    /// Change a seat's life by `delta`, saturating at the life bounds, then
    /// check for a winner.
    pub fn adjust_score(&mut self, seat: usize, delta: i32) -> Result<Outcome, SessionError> {
        if self.phase.is_decided() {
            return Err(SessionError::Finished);
        }

        let entry = self
            .seats
            .get_mut(seat)
            .ok_or(SessionError::NoSuchSeat(seat))?;
        entry.life = adjust_life(entry.life, delta);
        debug!("Seat {} ({}) life now {}", seat, entry.name, entry.life);

        self.check_outcome()
    }

    fn check_outcome(&mut self) -> Result<Outcome, SessionError> {
        let lives: Vec<i32> = self.seats.iter().map(|s| s.life).collect();
        self.outcome = detect_outcome(&lives);

        if let Outcome::Winner(seat) = self.outcome {
            let name = self.seats[seat].name.clone();
            self.phase
                .apply_mut(SessionEvent::LastStanding { name: name.clone() })?;
            self.decided_at = Some(Utc::now());
            info!("{} is the last player standing", name);
        }

        Ok(self.outcome)
    }

    /// Roll two fresh dice for every seat and show them.
    pub fn roll_dice(&mut self) -> Vec<DicePair> {
        let rolls = self.roller.roll_seats(self.seats.len());
        for (seat, pair) in self.seats.iter_mut().zip(&rolls) {
            seat.dice = Some(*pair);
        }
        self.dice_visible = true;
        rolls
    }

    /// Hide the winner announcement. Scores and the winner stay as they are.
    ///
    /// Returns whether an announcement was showing.
    pub fn dismiss(&mut self) -> bool {
        let was_announcing = self.phase.is_announcing();
        if self.phase.apply_mut(SessionEvent::Dismiss).is_err() {
            debug!("Dismiss ignored in {} phase", self.phase);
        }
        was_announcing
    }

    /// Leave the session; its phase drops back to selection.
    pub(crate) fn close(&mut self) -> Result<(), InvalidTransition> {
        self.phase.apply_mut(SessionEvent::Exit)
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<&str> {
        self.phase.winner()
    }

    pub fn is_announcing(&self) -> bool {
        self.phase.is_announcing()
    }

    pub fn dice_visible(&self) -> bool {
        self.dice_visible
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn seat(&self, seat: usize) -> Option<&Seat> {
        self.seats.get(seat)
    }

    /// Seat index of a player.
    pub fn seat_of(&self, name: &str) -> Option<usize> {
        self.seats.iter().position(|s| s.name == name)
    }

    pub fn player_names(&self) -> impl Iterator<Item = &str> {
        self.seats.iter().map(|s| s.name.as_str())
    }

    pub fn life_of(&self, name: &str) -> Option<i32> {
        self.seats.iter().find(|s| s.name == name).map(|s| s.life)
    }

    pub fn alive_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_alive()).count()
    }

    /// Convert full session state to a JSON snapshot.
    pub fn to_json(&self) -> serde_json::Value {
        let seats: Vec<serde_json::Value> = self.seats.iter().map(|s| s.to_json()).collect();

        serde_json::json!({
            "phase": self.phase.as_str(),
            "player_count": u8::from(self.config.player_count),
            "starting_life": self.config.starting_life.value(),
            "seats": seats,
            "outcome": self.outcome.as_str(),
            "winner": self.winner(),
            "announcing": self.is_announcing(),
            "dice_visible": self.dice_visible,
            "started_at": self.started_at.to_rfc3339()
        })
    }
}
