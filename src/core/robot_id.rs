//! Robot identification and per-robot data storage.
//!
//! ## RobotId
//!
//! Type-safe robot identifier. Robots are numbered in registration order.
//!
//! ## RobotMap
//!
//! Per-robot storage backed by `Vec` for O(1) access by `RobotId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Robot identifier, 0-based in registration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RobotId(pub u8);

impl RobotId {
    /// Create a new robot ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw robot index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all robot IDs for a match with `robot_count` robots.
    ///
    /// ```
    /// use robot_rally::core::RobotId;
    ///
    /// let robots: Vec<_> = RobotId::all(3).collect();
    /// assert_eq!(robots, vec![RobotId::new(0), RobotId::new(1), RobotId::new(2)]);
    /// ```
    pub fn all(robot_count: usize) -> impl Iterator<Item = RobotId> {
        (0..robot_count as u8).map(RobotId)
    }
}

impl std::fmt::Display for RobotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Robot {}", self.0)
    }
}

/// Per-robot data storage with O(1) access.
///
/// ```
/// use robot_rally::core::{RobotId, RobotMap};
///
/// let mut checkpoints: RobotMap<u32> = RobotMap::new(2, |_| 0);
/// checkpoints[RobotId::new(1)] += 1;
/// assert_eq!(checkpoints[RobotId::new(1)], 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RobotMap<T> {
    data: Vec<T>,
}

impl<T> RobotMap<T> {
    /// Create a new map with values from a factory function.
    pub fn new(robot_count: usize, factory: impl Fn(RobotId) -> T) -> Self {
        assert!(robot_count <= 255, "At most 255 robots supported");

        let data = (0..robot_count as u8).map(|i| factory(RobotId(i))).collect();

        Self { data }
    }

    /// Wrap an existing vector; index `i` belongs to `RobotId(i)`.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(data.len() <= 255, "At most 255 robots supported");
        Self { data }
    }

    /// Number of robots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when no robots are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `robot` has an entry in this map.
    #[must_use]
    pub fn contains(&self, robot: RobotId) -> bool {
        robot.index() < self.data.len()
    }

    /// Get a robot's data, or `None` for an unknown id.
    #[must_use]
    pub fn get(&self, robot: RobotId) -> Option<&T> {
        self.data.get(robot.index())
    }

    /// Get a robot's data mutably, or `None` for an unknown id.
    pub fn get_mut(&mut self, robot: RobotId) -> Option<&mut T> {
        self.data.get_mut(robot.index())
    }

    /// Iterate over (RobotId, &T) pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (RobotId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (RobotId(i as u8), v))
    }

    /// Iterate over (RobotId, &mut T) pairs in registration order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RobotId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (RobotId(i as u8), v))
    }

    /// Iterate over all robot IDs.
    pub fn ids(&self) -> impl Iterator<Item = RobotId> {
        (0..self.data.len() as u8).map(RobotId)
    }
}

impl<T> Index<RobotId> for RobotMap<T> {
    type Output = T;

    fn index(&self, robot: RobotId) -> &Self::Output {
        &self.data[robot.index()]
    }
}

impl<T> IndexMut<RobotId> for RobotMap<T> {
    fn index_mut(&mut self, robot: RobotId) -> &mut Self::Output {
        &mut self.data[robot.index()]
    }
}
