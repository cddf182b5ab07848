//! Turn resolution.
//!
//! ## Key Types
//!
//! - `Match`: owns a match and drives Programming → Executing → GameOver
//! - `ExecutionQueueEntry`: one robot's card for one register
//! - `MoveOutcome`: how far a card actually carried a robot
//! - `ConveyorOutcome`: what a belt did to a robot standing on it
//! - `GameResult`: winner or defeat
//!
//! Resolution order inside a register is fixed: cards in descending
//! priority, then hazards, then conveyors, then the win/loss check.

pub mod effects;
pub mod engine;
pub mod error;
pub mod movement;
pub mod queue;
pub mod result;

pub use effects::{
    apply_hazard, apply_hazards, check_game_over, resolve_tile_effects, run_conveyors,
    ConveyorBlock, ConveyorOutcome,
};
pub use engine::{CardResolution, Match, MatchState, RegisterReport};
pub use error::{ActionError, MatchError};
pub use movement::{apply_card, occupant, BlockReason, MoveOutcome};
pub use queue::{build_queue, priority_groups, ExecutionQueueEntry};
pub use result::{GameResult, Phase};
