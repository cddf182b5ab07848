//! Per-register execution queue.
//!
//! Each register, every alive robot with a committed card contributes one
//! entry. Entries run in descending priority; entries sharing a priority
//! form a group that is logically simultaneous and runs in robot
//! registration order.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, RobotProgram};
use crate::core::{RobotId, RobotMap};
use crate::robots::Robot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionQueueEntry {
    pub robot: RobotId,
    pub card: Card,
    pub register: usize,
}

/// Build the sorted queue for `register`.
///
/// The sort is stable, so equal priorities keep registration order.
#[must_use]
pub fn build_queue(
    register: usize,
    robots: &RobotMap<Robot>,
    programs: &RobotMap<RobotProgram>,
) -> Vec<ExecutionQueueEntry> {
    let mut queue: Vec<ExecutionQueueEntry> = programs
        .iter()
        .filter(|(id, _)| robots.get(*id).is_some_and(|r| r.alive))
        .filter_map(|(robot, program)| {
            program.committed_card(register).map(|card| ExecutionQueueEntry {
                robot,
                card,
                register,
            })
        })
        .collect();
    queue.sort_by(|a, b| b.card.priority.cmp(&a.card.priority));
    queue
}

/// Split a sorted queue into runs of equal priority.
pub fn priority_groups(
    queue: &[ExecutionQueueEntry],
) -> impl Iterator<Item = &[ExecutionQueueEntry]> + '_ {
    let mut rest = queue;
    std::iter::from_fn(move || {
        let first = rest.first()?;
        let len = rest
            .iter()
            .take_while(|e| e.card.priority == first.card.priority)
            .count();
        let (group, tail) = rest.split_at(len);
        rest = tail;
        Some(group)
    })
}
