//! Tile data: type, checkpoint number and wall flags.

use serde::{Deserialize, Serialize};

use crate::core::Direction;

/// What a tile does to a robot standing on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileType {
    #[default]
    Normal,
    Pit,
    ConveyorNorth,
    ConveyorSouth,
    ConveyorEast,
    ConveyorWest,
    Laser,
    Checkpoint,
}

impl TileType {
    /// Belt direction, or `None` for non-conveyor tiles.
    #[must_use]
    pub const fn conveyor_direction(self) -> Option<Direction> {
        match self {
            TileType::ConveyorNorth => Some(Direction::North),
            TileType::ConveyorSouth => Some(Direction::South),
            TileType::ConveyorEast => Some(Direction::East),
            TileType::ConveyorWest => Some(Direction::West),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_conveyor(self) -> bool {
        self.conveyor_direction().is_some()
    }

    /// Conveyor tile type moving robots toward `dir`.
    #[must_use]
    pub const fn conveyor(dir: Direction) -> Self {
        match dir {
            Direction::North => TileType::ConveyorNorth,
            Direction::South => TileType::ConveyorSouth,
            Direction::East => TileType::ConveyorEast,
            Direction::West => TileType::ConveyorWest,
        }
    }
}

/// Wall bit flags: bit 0 North, bit 1 East, bit 2 South, bit 3 West.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallFlags(pub u8);

impl WallFlags {
    pub const NONE: WallFlags = WallFlags(0);

    /// The bit for one tile edge.
    #[must_use]
    pub const fn bit(dir: Direction) -> u8 {
        match dir {
            Direction::North => 1 << 0,
            Direction::East => 1 << 1,
            Direction::South => 1 << 2,
            Direction::West => 1 << 3,
        }
    }

    #[must_use]
    pub const fn has(self, dir: Direction) -> bool {
        self.0 & Self::bit(dir) != 0
    }

    pub fn set(&mut self, dir: Direction, enabled: bool) {
        if enabled {
            self.0 |= Self::bit(dir);
        } else {
            self.0 &= !Self::bit(dir);
        }
    }

    /// Edges with a wall, clockwise from North.
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| self.has(d))
    }

    #[must_use]
    pub fn from_directions(dirs: &[Direction]) -> Self {
        let mut flags = WallFlags::NONE;
        for &d in dirs {
            flags.set(d, true);
        }
        flags
    }
}

/// One board square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub tile_type: TileType,

    /// Meaningful only on `Checkpoint` tiles; numbering starts at 1.
    pub checkpoint_number: u32,

    pub walls: WallFlags,
}

impl Tile {
    #[must_use]
    pub const fn new(tile_type: TileType) -> Self {
        Self {
            tile_type,
            checkpoint_number: 0,
            walls: WallFlags::NONE,
        }
    }

    #[must_use]
    pub const fn normal() -> Self {
        Self::new(TileType::Normal)
    }

    #[must_use]
    pub const fn pit() -> Self {
        Self::new(TileType::Pit)
    }

    #[must_use]
    pub const fn laser() -> Self {
        Self::new(TileType::Laser)
    }

    #[must_use]
    pub const fn conveyor(dir: Direction) -> Self {
        Self::new(TileType::conveyor(dir))
    }

    #[must_use]
    pub const fn checkpoint(number: u32) -> Self {
        Self {
            tile_type: TileType::Checkpoint,
            checkpoint_number: number,
            walls: WallFlags::NONE,
        }
    }

    /// Add walls on the given edges.
    #[must_use]
    pub fn with_walls(mut self, dirs: &[Direction]) -> Self {
        for &d in dirs {
            self.walls.set(d, true);
        }
        self
    }

    /// A plain floor tile with no walls.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Tile::normal()
    }
}
