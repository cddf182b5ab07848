//! Outbound match events.
//!
//! Events describe what happened during resolution so a presentation layer
//! can animate or log it. The rules never read them back; the final state
//! is already settled when an event is emitted.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::core::{Direction, GridPos, RobotId};
use crate::rules::{GameResult, Phase};

/// Why a robot changed tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveCause {
    /// Its own card.
    Card,
    /// Another robot moved into it.
    Pushed,
    Conveyor,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    PhaseChanged {
        phase: Phase,
        round: u32,
    },
    HandDealt {
        robot: RobotId,
        cards: usize,
    },
    RegisterExecuted {
        robot: RobotId,
        register: usize,
        card: Card,
    },
    RobotMoved {
        robot: RobotId,
        from: GridPos,
        to: GridPos,
        cause: MoveCause,
    },
    RobotRotated {
        robot: RobotId,
        facing: Direction,
    },
    RobotDamaged {
        robot: RobotId,
        amount: u32,
        health: u32,
    },
    RobotRespawned {
        robot: RobotId,
        pos: GridPos,
        lives: u32,
    },
    RobotDestroyed {
        robot: RobotId,
    },
    CheckpointReached {
        robot: RobotId,
        number: u32,
    },
    GameOver {
        result: GameResult,
    },
    /// Human-readable message for an on-screen event log.
    Notice {
        robot: Option<RobotId>,
        message: String,
    },
}

impl MatchEvent {
    /// Notice about a specific robot.
    pub fn notice(robot: RobotId, message: impl Into<String>) -> Self {
        MatchEvent::Notice {
            robot: Some(robot),
            message: message.into(),
        }
    }

    /// The robot this event concerns, if any.
    #[must_use]
    pub fn robot(&self) -> Option<RobotId> {
        match self {
            MatchEvent::HandDealt { robot, .. }
            | MatchEvent::RegisterExecuted { robot, .. }
            | MatchEvent::RobotMoved { robot, .. }
            | MatchEvent::RobotRotated { robot, .. }
            | MatchEvent::RobotDamaged { robot, .. }
            | MatchEvent::RobotRespawned { robot, .. }
            | MatchEvent::RobotDestroyed { robot }
            | MatchEvent::CheckpointReached { robot, .. } => Some(*robot),
            MatchEvent::Notice { robot, .. } => *robot,
            MatchEvent::PhaseChanged { .. } | MatchEvent::GameOver { .. } => None,
        }
    }
}

impl std::fmt::Display for MatchEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchEvent::PhaseChanged { phase, round } => write!(f, "round {round}: {phase:?} phase"),
            MatchEvent::HandDealt { robot, cards } => write!(f, "{robot} dealt {cards} cards"),
            MatchEvent::RegisterExecuted { robot, register, card } => {
                write!(f, "{robot} plays {card} in register {}", register + 1)
            }
            MatchEvent::RobotMoved { robot, from, to, cause } => {
                write!(f, "{robot} {from} -> {to} ({cause:?})")
            }
            MatchEvent::RobotRotated { robot, facing } => write!(f, "{robot} now faces {facing}"),
            MatchEvent::RobotDamaged { robot, amount, health } => {
                write!(f, "{robot} takes {amount} damage ({health} left)")
            }
            MatchEvent::RobotRespawned { robot, pos, lives } => {
                write!(f, "{robot} respawns at {pos} ({lives} lives left)")
            }
            MatchEvent::RobotDestroyed { robot } => write!(f, "{robot} is destroyed"),
            MatchEvent::CheckpointReached { robot, number } => {
                write!(f, "{robot} reached checkpoint {number}")
            }
            MatchEvent::GameOver { result } => match result {
                GameResult::Winner(robot) => write!(f, "game over: {robot} wins"),
                GameResult::Defeat => write!(f, "game over: no winner"),
            },
            MatchEvent::Notice { robot: Some(robot), message } => write!(f, "{robot}: {message}"),
            MatchEvent::Notice { robot: None, message } => f.write_str(message),
        }
    }
}
