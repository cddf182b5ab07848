//! # robot-rally
//!
//! A deterministic turn resolution engine for a Robot Rally style board game.
//!
//! ## Design Principles
//!
//! 1. **Explicit Match State**: Every rule function takes the board and
//!    robots it works on. No globals, no engine singletons.
//!
//! 2. **Synchronous Settle**: Moves resolve instantly. The event log tells a
//!    presentation layer what to animate; the rules never wait for it.
//!
//! 3. **Outcomes, Not Failures**: Blocked moves, short hands and missing
//!    registers degrade to "do less". Only inbound player actions and
//!    setup can be rejected, and those return typed errors.
//!
//! ## Architecture
//!
//! - **Priority Ordering**: Each register builds a queue sorted by card
//!   priority. Equal priorities form groups resolved in registration order.
//!
//! - **Atomic Pushes**: A robot pushed by another pushes everything behind
//!   it, and the whole chain either moves or stays put.
//!
//! - **Seeded Streams**: Deck shuffles and AI choices draw from separate
//!   ChaCha8 streams of one seed, so matches replay exactly.
//!
//! ## Modules
//!
//! - `core`: Robot ids, directions, RNG, configuration and constants
//! - `board`: Tiles, walls, the board grid and the JSON map format
//! - `cards`: The 84-card deck, piles, hands and program registers
//! - `robots`: Robot health, lives and checkpoint progress
//! - `events`: Outbound events for a presentation layer
//! - `rules`: Execution queue, movement, tile effects and the turn resolver
//! - `ai`: Card selection for computer-controlled robots

pub mod core;
pub mod board;
pub mod cards;
pub mod robots;
pub mod events;
pub mod rules;
pub mod ai;

// Re-export commonly used types
pub use crate::core::{
    RobotId, RobotMap,
    Direction, GridPos,
    GameRng, GameRngState,
    ControllerKind, RobotSpawn, MatchConfig, ConfigError,
    NUM_REGISTERS, DECK_SIZE, BASE_HAND_SIZE, MIN_HAND_SIZE,
};

pub use crate::board::{Board, Tile, TileType, WallFlags, MapDescription, MapError};

pub use crate::cards::{Card, CardAction, CardPiles, RobotProgram, ProgramError};

pub use crate::robots::Robot;

pub use crate::events::{MatchEvent, MoveCause, EventLog, EventSink};

pub use crate::rules::{
    Match, MatchState, RegisterReport, CardResolution,
    Phase, GameResult,
    ActionError, MatchError,
    MoveOutcome, BlockReason, ConveyorOutcome, ConveyorBlock,
    ExecutionQueueEntry,
};

pub use crate::ai::{CardPolicy, RandomPolicy, GreedyPolicy};
