//! Robots on the board.

pub mod robot;

pub use robot::{CheckpointOutcome, DamageOutcome, Robot};
