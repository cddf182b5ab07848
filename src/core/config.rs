//! Match configuration and rule constants.
//!
//! A match is configured at startup with:
//! - `RobotSpawn`: where each robot starts and who controls it
//! - `MatchConfig`: seed, robot durability and the map to load
//!
//! `MatchConfig` deserializes from TOML with every field defaulted:
//!
//! ```toml
//! seed = 7
//! max_health = 10
//! max_lives = 3
//! map = "maps/factory.json"
//!
//! [[robots]]
//! start = { x = 0, y = 0 }
//! facing = "north"
//! controller = "player"
//!
//! [[robots]]
//! start = { x = 0, y = 9 }
//! controller = "ai_medium"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::direction::{Direction, GridPos};

/// Program registers filled per round.
pub const NUM_REGISTERS: usize = 5;

/// Cards in a full deck.
pub const DECK_SIZE: usize = 84;

/// Hand size for an undamaged robot.
pub const BASE_HAND_SIZE: usize = 9;

/// Hand size never shrinks below this.
pub const MIN_HAND_SIZE: usize = 5;

/// Who chooses a robot's cards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Human input through `select_card` / `undo_selection`.
    #[default]
    Player,
    /// Uniform random selection.
    AiEasy,
    /// Greedy scorer toward the next checkpoint.
    AiMedium,
    /// Currently plays exactly like `AiMedium`.
    AiHard,
}

impl ControllerKind {
    #[must_use]
    pub fn is_ai(self) -> bool {
        !matches!(self, ControllerKind::Player)
    }
}

/// Starting placement for one robot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotSpawn {
    /// Start tile; also the initial respawn point.
    pub start: GridPos,

    #[serde(default = "default_facing")]
    pub facing: Direction,

    #[serde(default)]
    pub controller: ControllerKind,
}

fn default_facing() -> Direction {
    Direction::North
}

impl RobotSpawn {
    /// A robot at `start` facing North.
    pub fn new(start: GridPos, controller: ControllerKind) -> Self {
        Self {
            start,
            facing: Direction::North,
            controller,
        }
    }

    /// Set the starting facing.
    #[must_use]
    pub fn facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }
}

/// Top-level match configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Seed for deck shuffles and AI randomness.
    pub seed: u64,

    pub max_health: u32,

    pub max_lives: u32,

    /// JSON map file; the built-in demo board is used when absent.
    pub map: Option<PathBuf>,

    pub robots: Vec<RobotSpawn>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_health: 10,
            max_lives: 3,
            map: None,
            robots: vec![
                RobotSpawn::new(GridPos::new(0, 0), ControllerKind::Player),
                RobotSpawn::new(GridPos::new(0, 9), ControllerKind::AiMedium),
            ],
        }
    }
}

/// Errors raised while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_health must be at least 1")]
    ZeroHealth,

    #[error("max_lives must be at least 1")]
    ZeroLives,

    #[error("a match needs at least one robot")]
    NoRobots,

    #[error("at most 255 robots are supported, got {0}")]
    TooManyRobots(usize),
}

impl MatchConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_health == 0 {
            return Err(ConfigError::ZeroHealth);
        }
        if self.max_lives == 0 {
            return Err(ConfigError::ZeroLives);
        }
        if self.robots.is_empty() {
            return Err(ConfigError::NoRobots);
        }
        if self.robots.len() > 255 {
            return Err(ConfigError::TooManyRobots(self.robots.len()));
        }
        Ok(())
    }
}
