//! Card system: the fixed deck, hands and program registers.
//!
//! ## Key Types
//!
//! - `Card` / `CardAction`: immutable program cards
//! - `CardPiles`: shared deck and discard pile
//! - `RobotProgram`: a robot's hand, register slots and committed program

pub mod card;
pub mod deck;
pub mod program;

pub use card::{Card, CardAction};
pub use deck::{build_deck, hand_size, CardPiles};
pub use program::{ProgramError, RobotProgram};
