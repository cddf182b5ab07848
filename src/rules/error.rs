//! Errors surfaced by a match.

use crate::board::MapError;
use crate::cards::ProgramError;
use crate::core::{ConfigError, GridPos, RobotId};

use super::result::Phase;

/// A rejected inbound action. The match state is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("action not allowed during the {0:?} phase")]
    WrongPhase(Phase),

    #[error("unknown robot: {0}")]
    UnknownRobot(RobotId),

    #[error("{0} has been destroyed")]
    RobotDestroyed(RobotId),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error("registers are not filled for {0:?}")]
    NotReady(Vec<RobotId>),
}

/// Failure while setting up or restoring a match.
#[derive(Debug, thiserror::Error)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("{robot} starts off the board at {pos}")]
    SpawnOutOfBounds { robot: RobotId, pos: GridPos },

    #[error("{robot} starts on {pos}, which is already taken")]
    SpawnOverlap { robot: RobotId, pos: GridPos },
}
