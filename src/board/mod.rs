//! Board model: tiles, walls and the map format.
//!
//! ## Key Types
//!
//! - `Tile` / `TileType` / `WallFlags`: per-square data
//! - `Board`: grid storage with bounds, wall and checkpoint queries
//! - `MapDescription`: JSON level layout that builds a `Board`

pub mod grid;
pub mod map;
pub mod tile;

pub use grid::Board;
pub use map::{MapDescription, MapError, TileOverride};
pub use tile::{Tile, TileType, WallFlags};
