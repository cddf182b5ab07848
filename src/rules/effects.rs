//! Tile effects that run after each register's cards settle.
//!
//! Two sub-phases, in order:
//!
//! 1. **Hazards**: every alive robot looks at the tile it stands on. Pits
//!    deal the robot's full max health, lasers deal one point, checkpoints
//!    advance progress when touched in order.
//! 2. **Conveyors**: every robot on a conveyor moves exactly one tile in the
//!    belt direction, then the hazard check is repeated on its new tile.
//!
//! Conveyors never push. All belt moves are planned against the same
//! snapshot of positions and applied together, so robots riding a belt in
//! a line all advance. A planned move is cancelled when the destination is
//! off the board, behind a wall, held by a robot that is not itself moving,
//! or claimed by another belt move.

use serde::{Deserialize, Serialize};

use crate::board::{Board, TileType};
use crate::core::{Direction, GridPos, RobotId, RobotMap};
use crate::events::{EventSink, MatchEvent, MoveCause};
use crate::robots::{CheckpointOutcome, DamageOutcome, Robot};

use super::result::GameResult;

/// Why a conveyor failed to carry a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConveyorBlock {
    BoardEdge,
    Wall,
    /// A robot that is staying put holds the destination.
    Occupied(RobotId),
    /// Another belt move targets the same tile, or the two robots would
    /// swap places head-on.
    Contested,
}

/// Result of the conveyor sub-phase for one robot on a belt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConveyorOutcome {
    Moved {
        robot: RobotId,
        from: GridPos,
        to: GridPos,
    },
    Cancelled {
        robot: RobotId,
        reason: ConveyorBlock,
    },
}

impl ConveyorOutcome {
    #[must_use]
    pub fn robot(&self) -> RobotId {
        match self {
            ConveyorOutcome::Moved { robot, .. } | ConveyorOutcome::Cancelled { robot, .. } => *robot,
        }
    }
}

// =============================================================================
// Hazards
// =============================================================================

/// Where a robot that just respawned actually lands.
///
/// The respawn point itself unless another alive robot holds it; then the
/// nearest free, in-bounds, non-pit tile by Manhattan distance, scanning
/// each ring from low X to high X and high Y before low Y. With no free
/// tile anywhere the robot stays on its respawn point.
fn respawn_landing(board: &Board, robots: &RobotMap<Robot>, id: RobotId, origin: GridPos) -> GridPos {
    let free = |pos: GridPos| {
        board.is_in_bounds(pos)
            && board.tile_type(pos) != TileType::Pit
            && !robots.iter().any(|(other, r)| other != id && r.alive && r.pos == pos)
    };
    if !robots.iter().any(|(other, r)| other != id && r.alive && r.pos == origin) {
        return origin;
    }
    for ring in 1..=board.width() + board.height() {
        for dx in -ring..=ring {
            let dy = ring - dx.abs();
            for pos in [GridPos::new(origin.x + dx, origin.y + dy), GridPos::new(origin.x + dx, origin.y - dy)] {
                if free(pos) {
                    return pos;
                }
            }
        }
    }
    origin
}

fn damage_robot(board: &Board, robots: &mut RobotMap<Robot>, id: RobotId, amount: u32, sink: &mut impl EventSink) {
    let health = robots[id].health.saturating_sub(amount);
    match robots[id].apply_damage(amount) {
        DamageOutcome::Ignored => {}
        DamageOutcome::Damaged => {
            sink.emit(MatchEvent::RobotDamaged { robot: id, amount, health });
        }
        DamageOutcome::Respawned(origin) => {
            sink.emit(MatchEvent::RobotDamaged { robot: id, amount, health });
            let pos = respawn_landing(board, robots, id, origin);
            if pos != origin {
                tracing::debug!(robot = %id, %origin, %pos, "respawn point taken");
            }
            let robot = &mut robots[id];
            robot.pos = pos;
            tracing::debug!(robot = %id, %pos, lives = robot.lives, "robot respawned");
            sink.emit(MatchEvent::RobotRespawned {
                robot: id,
                pos,
                lives: robot.lives,
            });
        }
        DamageOutcome::Destroyed => {
            sink.emit(MatchEvent::RobotDamaged { robot: id, amount, health });
            tracing::info!(robot = %id, "robot destroyed");
            sink.emit(MatchEvent::RobotDestroyed { robot: id });
        }
    }
}

/// Apply the effect of the tile under one robot.
pub fn apply_hazard(board: &Board, robots: &mut RobotMap<Robot>, id: RobotId, sink: &mut impl EventSink) {
    let Some(robot) = robots.get(id).filter(|r| r.alive) else {
        return;
    };
    let tile = board.tile_at(robot.pos);
    match tile.tile_type {
        TileType::Pit => {
            let amount = robot.max_health;
            damage_robot(board, robots, id, amount, sink);
        }
        TileType::Laser => damage_robot(board, robots, id, 1, sink),
        TileType::Checkpoint => match robots[id].reach_checkpoint(tile.checkpoint_number) {
            CheckpointOutcome::Advanced(number) => {
                tracing::debug!(robot = %id, number, "checkpoint reached");
                sink.emit(MatchEvent::CheckpointReached { robot: id, number });
            }
            CheckpointOutcome::OutOfOrder { expected, found } => {
                sink.emit(MatchEvent::notice(
                    id,
                    format!("checkpoint {found} ignored, checkpoint {expected} comes first"),
                ));
            }
            CheckpointOutcome::AlreadyVisited => {}
        },
        _ => {}
    }
}

/// Run the hazard sub-phase for every alive robot in registration order.
pub fn apply_hazards(board: &Board, robots: &mut RobotMap<Robot>, sink: &mut impl EventSink) {
    for id in robots.ids().collect::<Vec<_>>() {
        apply_hazard(board, robots, id, sink);
    }
}

// =============================================================================
// Conveyors
// =============================================================================

struct BeltMove {
    robot: RobotId,
    from: GridPos,
    to: GridPos,
    cancelled: Option<ConveyorBlock>,
}

fn plan_belt_moves(board: &Board, robots: &RobotMap<Robot>) -> Vec<BeltMove> {
    robots
        .iter()
        .filter(|(_, r)| r.alive)
        .filter_map(|(robot, r)| {
            let dir: Direction = board.tile_type(r.pos).conveyor_direction()?;
            let to = r.pos.step(dir);
            let cancelled = if !board.is_valid_tile(to) {
                Some(ConveyorBlock::BoardEdge)
            } else if board.is_movement_blocked(r.pos, to) {
                Some(ConveyorBlock::Wall)
            } else {
                None
            };
            Some(BeltMove {
                robot,
                from: r.pos,
                to,
                cancelled,
            })
        })
        .collect()
}

/// Cancel planned moves until every survivor has a free, unclaimed tile.
fn settle_belt_moves(robots: &RobotMap<Robot>, plans: &mut [BeltMove]) {
    loop {
        let mut changed = false;
        for i in 0..plans.len() {
            if plans[i].cancelled.is_some() {
                continue;
            }
            let to = plans[i].to;
            let from = plans[i].from;

            let blocker = robots
                .iter()
                .find(|(id, r)| r.alive && r.pos == to && *id != plans[i].robot)
                .map(|(id, _)| id);
            let reason = if let Some(blocker) = blocker {
                match plans.iter().find(|p| p.robot == blocker) {
                    Some(p) if p.cancelled.is_none() && p.to == from => Some(ConveyorBlock::Contested),
                    Some(p) if p.cancelled.is_none() => None,
                    _ => Some(ConveyorBlock::Occupied(blocker)),
                }
            } else {
                None
            };
            let reason = reason.or_else(|| {
                plans
                    .iter()
                    .enumerate()
                    .any(|(j, p)| j != i && p.cancelled.is_none() && p.to == to)
                    .then_some(ConveyorBlock::Contested)
            });

            if let Some(reason) = reason {
                plans[i].cancelled = Some(reason);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
}

/// Move every robot standing on a conveyor by one tile.
///
/// Moved robots get their new tile's hazard applied immediately after all
/// belts have moved.
pub fn run_conveyors(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    sink: &mut impl EventSink,
) -> Vec<ConveyorOutcome> {
    let mut plans = plan_belt_moves(board, robots);
    settle_belt_moves(robots, &mut plans);

    let mut outcomes = Vec::with_capacity(plans.len());
    for plan in &plans {
        match plan.cancelled {
            Some(reason) => {
                tracing::debug!(robot = %plan.robot, ?reason, "conveyor move cancelled");
                outcomes.push(ConveyorOutcome::Cancelled {
                    robot: plan.robot,
                    reason,
                });
            }
            None => {
                robots[plan.robot].pos = plan.to;
                sink.emit(MatchEvent::RobotMoved {
                    robot: plan.robot,
                    from: plan.from,
                    to: plan.to,
                    cause: MoveCause::Conveyor,
                });
                outcomes.push(ConveyorOutcome::Moved {
                    robot: plan.robot,
                    from: plan.from,
                    to: plan.to,
                });
            }
        }
    }

    for outcome in &outcomes {
        if let ConveyorOutcome::Moved { robot, .. } = outcome {
            apply_hazard(board, robots, *robot, sink);
        }
    }
    outcomes
}

/// Full tile-effect pass: hazards, then conveyors.
pub fn resolve_tile_effects(
    board: &Board,
    robots: &mut RobotMap<Robot>,
    sink: &mut impl EventSink,
) -> Vec<ConveyorOutcome> {
    apply_hazards(board, robots, sink);
    run_conveyors(board, robots, sink)
}

// =============================================================================
// Win / Loss
// =============================================================================

/// Terminal check, run after tile effects.
///
/// A robot wins once it holds the last checkpoint. The match is lost when
/// no robot is left, or when every human-controlled robot is gone.
#[must_use]
pub fn check_game_over(board: &Board, robots: &RobotMap<Robot>) -> Option<GameResult> {
    let total = board.total_checkpoints();
    if total > 0 {
        if let Some((id, _)) = robots
            .iter()
            .find(|(_, r)| r.alive && r.current_checkpoint >= total)
        {
            return Some(GameResult::Winner(id));
        }
    }

    if robots.iter().all(|(_, r)| !r.alive) {
        return Some(GameResult::Defeat);
    }

    let mut humans = robots.iter().filter(|(_, r)| !r.controller.is_ai()).peekable();
    if humans.peek().is_some() && humans.all(|(_, r)| !r.alive) {
        return Some(GameResult::Defeat);
    }
    None
}
