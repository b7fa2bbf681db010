//! Dice for deciding who goes first.
//!
//! Every roll is an independent draw; nothing about a previous roll is kept.
//! `DiceRoller::seeded` gives a reproducible sequence for tests.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Faces on a die.
pub const DIE_FACES: u8 = 6;

/// Two six-sided dice rolled for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DicePair {
    pub first: u8,
    pub second: u8,
}

impl DicePair {
    pub fn total(&self) -> u8 {
        self.first + self.second
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!([self.first, self.second])
    }
}

/// Source of dice rolls.
#[derive(Debug, Clone)]
pub struct DiceRoller {
    rng: ChaCha8Rng,
}

impl DiceRoller {
    /// Roller seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Deterministic roller.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn roll_die(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }

    pub fn roll_pair(&mut self) -> DicePair {
        DicePair {
            first: self.roll_die(),
            second: self.roll_die(),
        }
    }

    /// One pair per seat.
    pub fn roll_seats(&mut self, seats: usize) -> Vec<DicePair> {
        (0..seats).map(|_| self.roll_pair()).collect()
    }
}

impl Default for DiceRoller {
    fn default() -> Self {
        Self::new()
    }
}
