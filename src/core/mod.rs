//! Core types: robot ids, grid directions, RNG and match configuration.
//!
//! Everything here is independent of the rules: the board, card and
//! resolver modules build on these types.

pub mod config;
pub mod direction;
pub mod rng;
pub mod robot_id;

pub use config::{
    ConfigError, ControllerKind, MatchConfig, RobotSpawn, BASE_HAND_SIZE, DECK_SIZE,
    MIN_HAND_SIZE, NUM_REGISTERS,
};
pub use direction::{Direction, GridPos};
pub use rng::{GameRng, GameRngState};
pub use robot_id::{RobotId, RobotMap};
