//! Map description format.
//!
//! A map is a grid size plus a sparse list of tile overrides; every tile not
//! listed is a plain floor. Maps are stored as JSON:
//!
//! ```json
//! { "width": 10, "height": 10,
//!   "tiles": [ {"x": 3, "y": 4, "type": "pit"},
//!              {"x": 9, "y": 9, "type": "checkpoint", "checkpoint": 1},
//!              {"x": 2, "y": 2, "walls": ["north", "east"]} ] }
//! ```

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::grid::Board;
use super::tile::{Tile, TileType, WallFlags};
use crate::core::{Direction, GridPos};

/// One non-default tile in a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileOverride {
    pub x: i32,
    pub y: i32,

    #[serde(rename = "type", default)]
    pub tile_type: TileType,

    #[serde(default, skip_serializing_if = "is_zero")]
    pub checkpoint: u32,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<Direction>,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

impl TileOverride {
    #[must_use]
    pub fn pos(&self) -> GridPos {
        GridPos::new(self.x, self.y)
    }

    #[must_use]
    pub fn tile(&self) -> Tile {
        Tile {
            tile_type: self.tile_type,
            checkpoint_number: self.checkpoint,
            walls: WallFlags::from_directions(&self.walls),
        }
    }

    fn from_tile(pos: GridPos, tile: &Tile) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            tile_type: tile.tile_type,
            checkpoint: tile.checkpoint_number,
            walls: tile.walls.directions().collect(),
        }
    }
}

/// Serializable level layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapDescription {
    pub width: i32,
    pub height: i32,

    #[serde(default)]
    pub tiles: Vec<TileOverride>,
}

/// Problems found while loading or validating a map.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse map: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("tile {pos} lies outside the {width}x{height} board")]
    OutOfBounds { pos: GridPos, width: i32, height: i32 },

    #[error("tile {0} is listed more than once")]
    DuplicateTile(GridPos),

    #[error("checkpoint at {0} must be numbered from 1")]
    UnnumberedCheckpoint(GridPos),

    #[error("checkpoints must be numbered 1..={expected}, found {found:?}")]
    CheckpointSequence { expected: u32, found: Vec<u32> },
}

impl MapDescription {
    /// An empty map of plain floor.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            tiles: Vec::new(),
        }
    }

    /// Append an override (builder pattern).
    #[must_use]
    pub fn with_tile(mut self, pos: GridPos, tile: Tile) -> Self {
        self.tiles.push(TileOverride::from_tile(pos, &tile));
        self
    }

    /// Parse and validate a JSON map.
    pub fn from_json_str(text: &str) -> Result<Self, MapError> {
        let map: MapDescription = serde_json::from_str(text)?;
        map.validate()?;
        Ok(map)
    }

    /// Read, parse and validate a JSON map file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check dimensions, bounds, duplicates and checkpoint numbering.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        let mut seen = FxHashSet::default();
        let mut numbers = Vec::new();

        for entry in &self.tiles {
            let pos = entry.pos();
            if !(0..self.width).contains(&pos.x) || !(0..self.height).contains(&pos.y) {
                return Err(MapError::OutOfBounds {
                    pos,
                    width: self.width,
                    height: self.height,
                });
            }
            if !seen.insert(pos) {
                return Err(MapError::DuplicateTile(pos));
            }
            if entry.tile_type == TileType::Checkpoint {
                if entry.checkpoint == 0 {
                    return Err(MapError::UnnumberedCheckpoint(pos));
                }
                numbers.push(entry.checkpoint);
            }
        }

        numbers.sort_unstable();
        let expected = numbers.len() as u32;
        if numbers.iter().copied().ne(1..=expected) {
            return Err(MapError::CheckpointSequence {
                expected,
                found: numbers,
            });
        }

        Ok(())
    }

    /// Build a fully populated board with the overrides applied.
    #[must_use]
    pub fn to_board(&self) -> Board {
        let mut board = Board::new(self.width, self.height);
        for entry in &self.tiles {
            board.set_tile(entry.pos(), entry.tile());
        }
        board
    }

    /// Describe an existing board by its non-plain tiles.
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            width: board.width(),
            height: board.height(),
            tiles: board
                .overrides()
                .iter()
                .map(|(pos, tile)| TileOverride::from_tile(*pos, tile))
                .collect(),
        }
    }

    /// The built-in 10×10 demo factory floor.
    ///
    /// Three checkpoints in a loose triangle, a pit field in the middle,
    /// two laser tiles, an eastbound belt and a couple of walls. The corners
    /// (0,0) and (0,9) are clear for default robot spawns.
    #[must_use]
    pub fn demo() -> Self {
        let p = GridPos::new;
        MapDescription::new(10, 10)
            .with_tile(p(3, 3), Tile::pit())
            .with_tile(p(6, 2), Tile::pit())
            .with_tile(p(5, 7), Tile::pit())
            .with_tile(p(5, 5), Tile::laser())
            .with_tile(p(5, 6), Tile::laser())
            .with_tile(p(2, 4), Tile::conveyor(Direction::East))
            .with_tile(p(2, 5), Tile::conveyor(Direction::East))
            .with_tile(p(2, 6), Tile::conveyor(Direction::East))
            .with_tile(p(7, 6), Tile::conveyor(Direction::South))
            .with_tile(p(4, 8), Tile::checkpoint(1))
            .with_tile(p(8, 2), Tile::checkpoint(2))
            .with_tile(p(9, 9), Tile::checkpoint(3))
            .with_tile(p(4, 4), Tile::normal().with_walls(&[Direction::North, Direction::East]))
            .with_tile(p(7, 7), Tile::normal().with_walls(&[Direction::West]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sample() {
        let json = r#"{
            "width": 10, "height": 10,
            "tiles": [
                {"x": 3, "y": 4, "type": "pit"},
                {"x": 9, "y": 9, "type": "checkpoint", "checkpoint": 1},
                {"x": 2, "y": 2, "walls": ["north", "east"]},
                {"x": 0, "y": 5, "type": "conveyor_west"}
            ]
        }"#;
        let map = MapDescription::from_json_str(json).unwrap();
        let board = map.to_board();

        assert_eq!(board.tile_type(GridPos::new(3, 4)), TileType::Pit);
        assert_eq!(board.tile_at(GridPos::new(9, 9)).checkpoint_number, 1);
        assert!(board.has_wall(GridPos::new(2, 2), Direction::North));
        assert!(board.has_wall(GridPos::new(2, 2), Direction::East));
        assert_eq!(board.tile_type(GridPos::new(2, 2)), TileType::Normal);
        assert_eq!(board.tile_type(GridPos::new(0, 5)), TileType::ConveyorWest);
        assert_eq!(board.total_checkpoints(), 1);
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let err = MapDescription::from_json_str(r#"{"width": 0, "height": 5}"#).unwrap_err();
        assert!(matches!(err, MapError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_rejects_out_of_bounds_and_duplicates() {
        let oob = MapDescription::new(3, 3).with_tile(GridPos::new(3, 0), Tile::pit());
        assert!(matches!(oob.validate(), Err(MapError::OutOfBounds { .. })));

        let dup = MapDescription::new(3, 3)
            .with_tile(GridPos::new(1, 1), Tile::pit())
            .with_tile(GridPos::new(1, 1), Tile::laser());
        assert!(matches!(dup.validate(), Err(MapError::DuplicateTile(_))));
    }

    #[test]
    fn test_rejects_bad_checkpoint_numbers() {
        let zero = MapDescription::new(5, 5).with_tile(GridPos::new(1, 1), Tile::checkpoint(0));
        assert!(matches!(zero.validate(), Err(MapError::UnnumberedCheckpoint(_))));

        let gap = MapDescription::new(5, 5)
            .with_tile(GridPos::new(1, 1), Tile::checkpoint(1))
            .with_tile(GridPos::new(2, 2), Tile::checkpoint(3));
        match gap.validate() {
            Err(MapError::CheckpointSequence { expected, found }) => {
                assert_eq!(expected, 2);
                assert_eq!(found, vec![1, 3]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            MapDescription::from_json_str("{ not json"),
            Err(MapError::Parse(_))
        ));
    }

    #[test]
    fn test_board_description_round_trip() {
        let demo = MapDescription::demo();
        let board = demo.to_board();
        let described = MapDescription::from_board(&board);

        assert_eq!(described.to_board(), board);
        assert_eq!(described.tiles.len(), demo.tiles.len());
    }

    #[test]
    fn test_json_text_round_trip() {
        let demo = MapDescription::demo();
        let text = demo.to_json_string().unwrap();
        let parsed = MapDescription::from_json_str(&text).unwrap();
        assert_eq!(parsed, demo);
    }

    #[test]
    fn test_demo_is_valid() {
        let demo = MapDescription::demo();
        assert!(demo.validate().is_ok());
        let board = demo.to_board();
        assert_eq!(board.total_checkpoints(), 3);
        assert!(board.tile_at(GridPos::new(0, 0)).is_plain());
        assert!(board.tile_at(GridPos::new(0, 9)).is_plain());
    }
}
