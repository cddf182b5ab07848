//! Card movement with robot pushing.
//!
//! Moves resolve one tile at a time. Before each step the next tile is
//! checked for the board edge, walls and other robots; an occupying robot
//! is pushed one tile further along the same direction, chaining through
//! any robots behind it. A push chain either moves completely or not at
//! all. Pits never block: shoving a robot into one is legal.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardAction};
use crate::core::{Direction, GridPos, RobotId, RobotMap};
use crate::events::{EventSink, MatchEvent, MoveCause};
use crate::robots::Robot;
use crate::board::Board;

/// Why a move stopped short.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockReason {
    /// The next tile is off the board.
    BoardEdge,
    /// A wall sits between the current and next tile.
    Wall,
    /// `robot` is in the way and its push chain is blocked.
    Push { robot: RobotId },
}

/// How far a card actually carried a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub steps_taken: u32,
    pub steps_requested: u32,
    pub blocked_by: Option<BlockReason>,
}

impl MoveOutcome {
    /// Outcome of a card that moves nothing (rotations, dead robots).
    #[must_use]
    pub const fn stationary() -> Self {
        Self {
            steps_taken: 0,
            steps_requested: 0,
            blocked_by: None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.blocked_by.is_none() && self.steps_taken == self.steps_requested
    }
}

/// Alive robot standing on `pos`.
#[must_use]
pub fn occupant(robots: &RobotMap<Robot>, pos: GridPos) -> Option<RobotId> {
    robots
        .iter()
        .find(|(_, r)| r.alive && r.pos == pos)
        .map(|(id, _)| id)
}

/// Edge and wall check for a single step out of `from`.
fn step_blocker(board: &Board, from: GridPos, dir: Direction) -> Option<BlockReason> {
    let to = from.step(dir);
    if !board.is_valid_tile(to) {
        Some(BlockReason::BoardEdge)
    } else if board.is_movement_blocked(from, to) {
        Some(BlockReason::Wall)
    } else {
        None
    }
}

/// Push the robot on `pos` one tile along `dir`, along with everything
/// stacked behind it. Nothing moves unless the whole chain can.
fn push_chain(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    pos: GridPos,
    dir: Direction,
    sink: &mut impl EventSink,
) -> Result<(), BlockReason> {
    let Some(pushed) = occupant(robots, pos) else {
        return Ok(());
    };
    if let Some(reason) = step_blocker(board, pos, dir) {
        return Err(reason);
    }
    let next = pos.step(dir);
    push_chain(board, robots, next, dir, sink)?;

    robots[pushed].pos = next;
    sink.emit(MatchEvent::RobotMoved {
        robot: pushed,
        from: pos,
        to: next,
        cause: MoveCause::Pushed,
    });
    Ok(())
}

/// Move `robot` exactly one tile along `dir`, pushing if needed.
pub(crate) fn step_robot(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    robot: RobotId,
    dir: Direction,
    sink: &mut impl EventSink,
) -> Result<(), BlockReason> {
    let from = robots[robot].pos;
    if let Some(reason) = step_blocker(board, from, dir) {
        return Err(reason);
    }
    let to = from.step(dir);
    if let Some(blocker) = occupant(robots, to) {
        push_chain(board, robots, to, dir, sink).map_err(|_| BlockReason::Push { robot: blocker })?;
    }

    robots[robot].pos = to;
    sink.emit(MatchEvent::RobotMoved {
        robot,
        from,
        to,
        cause: MoveCause::Card,
    });
    Ok(())
}

/// Move up to `distance` tiles; negative distances back up without turning.
pub(crate) fn move_robot(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    robot: RobotId,
    distance: i32,
    sink: &mut impl EventSink,
) -> MoveOutcome {
    let facing = robots[robot].facing;
    let dir = if distance < 0 { facing.opposite() } else { facing };
    let requested = distance.unsigned_abs();

    let mut outcome = MoveOutcome {
        steps_taken: 0,
        steps_requested: requested,
        blocked_by: None,
    };
    for _ in 0..requested {
        match step_robot(board, robots, robot, dir, sink) {
            Ok(()) => outcome.steps_taken += 1,
            Err(reason) => {
                tracing::debug!(%robot, ?reason, steps = outcome.steps_taken, "move truncated");
                outcome.blocked_by = Some(reason);
                break;
            }
        }
    }
    outcome
}

/// Turn in place by quarter turns, clockwise positive.
pub(crate) fn rotate_robot(
    robots: &mut RobotMap<Robot>,
    robot: RobotId,
    steps: i32,
    sink: &mut impl EventSink,
) {
    let facing = robots[robot].facing.rotated(steps);
    robots[robot].facing = facing;
    sink.emit(MatchEvent::RobotRotated { robot, facing });
}

/// Carry out one card for `robot`.
pub fn apply_card(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    robot: RobotId,
    card: Card,
    sink: &mut impl EventSink,
) -> MoveOutcome {
    if !robots.get(robot).is_some_and(|r| r.alive) {
        return MoveOutcome::stationary();
    }
    match card.action {
        CardAction::RotateRight | CardAction::RotateLeft | CardAction::UTurn => {
            rotate_robot(robots, robot, card.action.rotation(), sink);
            MoveOutcome::stationary()
        }
        action => move_robot(board, robots, robot, action.distance(), sink),
    }
}
