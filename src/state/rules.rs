//! Life total rules: clamping and winner detection.

/// Lowest life total a player can have.
pub const MIN_LIFE: i32 = 0;

/// Highest life total a player can have.
pub const MAX_LIFE: i32 = 1000;

/// Apply a delta to a life total, saturating at `MIN_LIFE..=MAX_LIFE`.
pub fn adjust_life(life: i32, delta: i32) -> i32 {
    life.saturating_add(delta).clamp(MIN_LIFE, MAX_LIFE)
}

/// A player is alive while their life is strictly above zero.
pub fn is_alive(life: i32) -> bool {
    life > 0
}

/// Result of checking life totals for a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Two or more players still alive
    Undecided,
    /// Exactly one player alive, by seat index
    Winner(usize),
    /// Nobody alive. Not a winner; the session stays live.
    Draw,
}

impl Outcome {
    pub fn winner(self) -> Option<usize> {
        match self {
            Self::Winner(seat) => Some(seat),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undecided => "undecided",
            Self::Winner(_) => "winner",
            Self::Draw => "draw",
        }
    }
}

/// Check life totals (in seat order) for a winner.
pub fn detect_outcome(lives: &[i32]) -> Outcome {
    let mut alive = lives
        .iter()
        .enumerate()
        .filter(|(_, life)| is_alive(**life))
        .map(|(seat, _)| seat);

    match (alive.next(), alive.next()) {
        (None, _) => Outcome::Draw,
        (Some(seat), None) => Outcome::Winner(seat),
        (Some(_), Some(_)) => Outcome::Undecided,
    }
}
