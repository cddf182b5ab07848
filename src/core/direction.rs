//! Grid coordinates and compass directions.
//!
//! The board uses the host engine's axis convention: North is +X,
//! East is +Y, South is -X and West is -Y.

use serde::{Deserialize, Serialize};

/// One of the four facings a robot or conveyor can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in clockwise order starting at North.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit `(dx, dy)` step for this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (1, 0),
            Direction::East => (0, 1),
            Direction::South => (-1, 0),
            Direction::West => (0, -1),
        }
    }

    /// Rotate clockwise by `steps` quarter turns; negative is counter-clockwise.
    #[must_use]
    pub fn rotated(self, steps: i32) -> Self {
        let idx = (self as i32 + steps).rem_euclid(4);
        Self::ALL[idx as usize]
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        self.rotated(2)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        };
        f.write_str(name)
    }
}

/// Integer board coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The coordinate `distance` tiles away along `dir`.
    #[must_use]
    pub fn offset(self, dir: Direction, distance: i32) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx * distance, self.y + dy * distance)
    }

    /// The axis-adjacent neighbour in `dir`.
    #[must_use]
    pub fn step(self, dir: Direction) -> Self {
        self.offset(dir, 1)
    }

    #[must_use]
    pub fn manhattan(self, other: GridPos) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Direction from `self` to an axis-adjacent `other`, or `None` when
    /// the two are not exactly one tile apart along an axis.
    #[must_use]
    pub fn direction_to(self, other: GridPos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|&d| self.step(d) == other)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}
