//! Match phases and outcomes.

use serde::{Deserialize, Serialize};

use crate::core::RobotId;

/// Turn resolver state.
///
/// `Programming` and `Executing` alternate each round; `GameOver` is
/// terminal and only entered after tile effects of a register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Programming,
    Executing,
    GameOver,
}

/// Result of a finished match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameResult {
    /// A robot touched the final checkpoint.
    Winner(RobotId),
    /// Every robot, or every human-controlled robot, is out of play.
    Defeat,
}

impl GameResult {
    /// Check if a robot won.
    #[must_use]
    pub fn is_winner(&self, robot: RobotId) -> bool {
        matches!(self, GameResult::Winner(r) if *r == robot)
    }

    #[must_use]
    pub fn winner(&self) -> Option<RobotId> {
        match self {
            GameResult::Winner(r) => Some(*r),
            GameResult::Defeat => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(RobotId::new(1));
        assert!(!result.is_winner(RobotId::new(0)));
        assert!(result.is_winner(RobotId::new(1)));
        assert_eq!(result.winner(), Some(RobotId::new(1)));

        let defeat = GameResult::Defeat;
        assert!(!defeat.is_winner(RobotId::new(0)));
        assert_eq!(defeat.winner(), None);
    }
}
