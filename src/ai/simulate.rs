//! Lightweight card look-ahead used by the greedy policy.
//!
//! The simulation ignores walls, other robots and the board edge: cards are
//! applied as straight offsets so an out-of-bounds landing can be scored
//! (and penalized) instead of silently truncated.

use crate::board::{Board, TileType};
use crate::cards::CardAction;
use crate::core::{Direction, GridPos};
use crate::robots::Robot;

/// Penalty for ending a card off the board or on a pit.
pub const LETHAL_PENALTY: f64 = 100.0;

/// Penalty for ending a card on a laser.
pub const LASER_PENALTY: f64 = 2.0;

/// Bonus for ending a card facing straight at the target.
pub const FACING_BONUS: f64 = 0.5;

/// Simulated robot pose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pose {
    pub pos: GridPos,
    pub facing: Direction,
}

impl Pose {
    #[must_use]
    pub const fn new(pos: GridPos, facing: Direction) -> Self {
        Self { pos, facing }
    }

    #[must_use]
    pub fn of(robot: &Robot) -> Self {
        Self::new(robot.pos, robot.facing)
    }

    /// Pose after playing `action` on an empty, unbounded floor.
    #[must_use]
    pub fn after(self, action: CardAction) -> Self {
        match action {
            CardAction::RotateRight | CardAction::RotateLeft | CardAction::UTurn => Self {
                pos: self.pos,
                facing: self.facing.rotated(action.rotation()),
            },
            _ => Self {
                pos: self.pos.offset(self.facing, action.distance()),
                facing: self.facing,
            },
        }
    }
}

/// Where a robot is heading: its next checkpoint, or the board center.
#[must_use]
pub fn target_for(board: &Board, robot: &Robot) -> GridPos {
    board
        .checkpoint_position(robot.current_checkpoint + 1)
        .unwrap_or_else(|| board.center())
}

/// Score one card from `pose`. Higher is better.
#[must_use]
pub fn score_card(board: &Board, pose: Pose, action: CardAction, target: GridPos) -> f64 {
    let next = pose.after(action);
    let mut score = f64::from(pose.pos.manhattan(target) - next.pos.manhattan(target));

    match board.tile_type(next.pos) {
        TileType::Pit => score -= LETHAL_PENALTY,
        TileType::Laser => score -= LASER_PENALTY,
        _ => {}
    }
    if !board.is_in_bounds(next.pos) {
        score -= LETHAL_PENALTY;
    }

    let toward = (
        (target.x - next.pos.x).signum(),
        (target.y - next.pos.y).signum(),
    );
    if next.facing.delta() == toward {
        score += FACING_BONUS;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Tile;

    #[test]
    fn test_pose_after_cards() {
        let start = Pose::new(GridPos::new(2, 2), Direction::North);
        assert_eq!(start.after(CardAction::Move2).pos, GridPos::new(4, 2));
        assert_eq!(start.after(CardAction::MoveBack).pos, GridPos::new(1, 2));
        assert_eq!(start.after(CardAction::RotateLeft).facing, Direction::West);
        assert_eq!(start.after(CardAction::UTurn), Pose::new(GridPos::new(2, 2), Direction::South));
    }

    #[test]
    fn test_score_progress_and_facing() {
        let board = Board::new(10, 10);
        let pose = Pose::new(GridPos::new(0, 0), Direction::North);
        let target = GridPos::new(5, 0);

        // Two tiles closer, still facing straight at the target.
        assert_eq!(score_card(&board, pose, CardAction::Move2, target), 2.5);
        assert_eq!(score_card(&board, pose, CardAction::RotateRight, target), 0.0);
        assert_eq!(score_card(&board, pose, CardAction::UTurn, target), 0.0);
    }

    #[test]
    fn test_score_hazards() {
        let mut board = Board::new(10, 10);
        board.set_tile(GridPos::new(1, 0), Tile::pit());
        board.set_tile(GridPos::new(2, 0), Tile::laser());
        let pose = Pose::new(GridPos::new(0, 0), Direction::North);
        let target = GridPos::new(9, 0);

        assert_eq!(score_card(&board, pose, CardAction::Move1, target), 1.0 - 100.0 + 0.5);
        assert_eq!(score_card(&board, pose, CardAction::Move2, target), 2.0 - 2.0 + 0.5);
        // Off the board: counted as a pit and as out of bounds.
        assert_eq!(score_card(&board, pose, CardAction::MoveBack, target), -1.0 - 200.0 + 0.5);
    }

    #[test]
    fn test_target_falls_back_to_center() {
        let mut board = Board::new(10, 10);
        let robot = Robot::new(
            &crate::core::RobotSpawn::new(GridPos::new(0, 0), crate::core::ControllerKind::AiMedium),
            10,
            3,
        );
        assert_eq!(target_for(&board, &robot), GridPos::new(5, 5));

        board.set_tile(GridPos::new(7, 1), Tile::checkpoint(1));
        assert_eq!(target_for(&board, &robot), GridPos::new(7, 1));
    }
}
