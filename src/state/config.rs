//! Session and application configuration.
//!
//! Session settings (`PlayerCount`, `StartingLife`) only ever come from the
//! selection screen. `TrackerConfig` covers the process-level knobs: where
//! the roster lives and how noisy logging is.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fewest players a session can have.
pub const MIN_PLAYERS: u8 = 2;

/// Most players a session can have.
pub const MAX_PLAYERS: u8 = 4;

/// Default roster database file name.
pub const DEFAULT_DATABASE_PATH: &str = "players.redb";

/// Default tracing filter directive.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between 2 and 4, got {0}")]
    InvalidPlayerCount(u8),
    #[error("starting life must be 20 or 40, got {0}")]
    InvalidStartingLife(i32),
    #[error("could not read config: {0}")]
    Io(String),
    #[error("could not parse config: {0}")]
    Parse(String),
}

/// Number of players in a session, always within `MIN_PLAYERS..=MAX_PLAYERS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerCount(u8);

impl PlayerCount {
    pub const TWO: Self = Self(2);
    pub const THREE: Self = Self(3);
    pub const FOUR: Self = Self(4);

    pub fn new(count: u8) -> Result<Self, ConfigError> {
        if (MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            Ok(Self(count))
        } else {
            Err(ConfigError::InvalidPlayerCount(count))
        }
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// All valid counts, in picker order.
    pub fn all() -> [Self; 3] {
        [Self::TWO, Self::THREE, Self::FOUR]
    }
}

impl Default for PlayerCount {
    fn default() -> Self {
        Self::TWO
    }
}

impl TryFrom<u8> for PlayerCount {
    type Error = ConfigError;

    fn try_from(count: u8) -> Result<Self, Self::Error> {
        Self::new(count)
    }
}

impl From<PlayerCount> for u8 {
    fn from(count: PlayerCount) -> Self {
        count.0
    }
}

impl fmt::Display for PlayerCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Players", self.0)
    }
}

/// Life total every player starts a session with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum StartingLife {
    #[default]
    Twenty,
    Forty,
}

impl StartingLife {
    pub fn value(self) -> i32 {
        match self {
            Self::Twenty => 20,
            Self::Forty => 40,
        }
    }
}

impl TryFrom<i32> for StartingLife {
    type Error = ConfigError;

    fn try_from(life: i32) -> Result<Self, Self::Error> {
        match life {
            20 => Ok(Self::Twenty),
            40 => Ok(Self::Forty),
            other => Err(ConfigError::InvalidStartingLife(other)),
        }
    }
}

impl From<StartingLife> for i32 {
    fn from(life: StartingLife) -> Self {
        life.value()
    }
}

impl fmt::Display for StartingLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Life", self.value())
    }
}

/// Settings a session is started with. Fixed once the session is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub player_count: PlayerCount,
    pub starting_life: StartingLife,
}

impl SessionConfig {
    pub fn new(player_count: PlayerCount, starting_life: StartingLife) -> Self {
        Self {
            player_count,
            starting_life,
        }
    }
}

/// Process-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Roster database file
    pub database_path: PathBuf,

    /// `tracing_subscriber::EnvFilter` directive
    pub log_filter: String,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl TrackerConfig {
    /// Parse from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&raw)
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }
}
