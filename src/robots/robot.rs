//! Robot state: position, facing, health, lives and checkpoint progress.

use serde::{Deserialize, Serialize};

use crate::core::{ControllerKind, Direction, GridPos, RobotSpawn};

/// What a hit did to a robot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health dropped but stayed above zero.
    Damaged,
    /// Health hit zero; a life was spent and the robot is back at its
    /// respawn point with full health.
    Respawned(GridPos),
    /// Health hit zero with no lives left.
    Destroyed,
    /// The robot was already out of play.
    Ignored,
}

/// What standing on a checkpoint did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointOutcome {
    Advanced(u32),
    /// The checkpoint is further ahead than the next expected one.
    OutOfOrder { expected: u32, found: u32 },
    AlreadyVisited,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    pub pos: GridPos,
    pub facing: Direction,
    pub health: u32,
    pub max_health: u32,
    pub lives: u32,
    pub max_lives: u32,
    pub alive: bool,
    /// Highest checkpoint touched in order; 0 before the first.
    pub current_checkpoint: u32,
    pub respawn_pos: GridPos,
    pub controller: ControllerKind,
}

impl Robot {
    /// A fresh robot at its spawn point.
    #[must_use]
    pub fn new(spawn: &RobotSpawn, max_health: u32, max_lives: u32) -> Self {
        Self {
            pos: spawn.start,
            facing: spawn.facing,
            health: max_health,
            max_health,
            lives: max_lives,
            max_lives,
            alive: true,
            current_checkpoint: 0,
            respawn_pos: spawn.start,
            controller: spawn.controller,
        }
    }

    /// Damage taken so far this life.
    #[must_use]
    pub fn damage_taken(&self) -> u32 {
        self.max_health.saturating_sub(self.health)
    }

    /// Subtract health; at zero, spend a life and respawn or die.
    pub fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        if !self.alive {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(amount);
        if self.health > 0 {
            return DamageOutcome::Damaged;
        }

        self.lives = self.lives.saturating_sub(1);
        if self.lives > 0 {
            self.respawn();
            DamageOutcome::Respawned(self.pos)
        } else {
            self.alive = false;
            DamageOutcome::Destroyed
        }
    }

    /// Return to the respawn point with full health. Facing is kept.
    pub fn respawn(&mut self) {
        self.pos = self.respawn_pos;
        self.health = self.max_health;
    }

    /// Record standing on checkpoint `number`.
    pub fn reach_checkpoint(&mut self, number: u32) -> CheckpointOutcome {
        let expected = self.current_checkpoint + 1;
        if number == expected {
            self.current_checkpoint = number;
            self.respawn_pos = self.pos;
            CheckpointOutcome::Advanced(number)
        } else if number > expected {
            CheckpointOutcome::OutOfOrder { expected, found: number }
        } else {
            CheckpointOutcome::AlreadyVisited
        }
    }
}
