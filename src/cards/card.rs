//! Program cards.

use serde::{Deserialize, Serialize};

/// The motion a card commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardAction {
    Move1,
    Move2,
    Move3,
    MoveBack,
    RotateRight,
    RotateLeft,
    UTurn,
}

impl CardAction {
    /// Display name as printed on the card.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardAction::Move1 => "Move 1",
            CardAction::Move2 => "Move 2",
            CardAction::Move3 => "Move 3",
            CardAction::MoveBack => "Back Up",
            CardAction::RotateRight => "Rotate Right",
            CardAction::RotateLeft => "Rotate Left",
            CardAction::UTurn => "U-Turn",
        }
    }

    /// Tiles travelled: positive is forward, negative is backward.
    #[must_use]
    pub const fn distance(self) -> i32 {
        match self {
            CardAction::Move1 => 1,
            CardAction::Move2 => 2,
            CardAction::Move3 => 3,
            CardAction::MoveBack => -1,
            _ => 0,
        }
    }

    /// Clockwise quarter turns applied to facing.
    #[must_use]
    pub const fn rotation(self) -> i32 {
        match self {
            CardAction::RotateRight => 1,
            CardAction::RotateLeft => -1,
            CardAction::UTurn => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for CardAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable program card. Priority orders simultaneous execution,
/// higher first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub action: CardAction,
    pub priority: u32,
}

impl Card {
    #[must_use]
    pub const fn new(action: CardAction, priority: u32) -> Self {
        Self { action, priority }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.action, self.priority)
    }
}
