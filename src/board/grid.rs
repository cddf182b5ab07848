//! The board: a width × height grid of tiles.
//!
//! Tiles are stored sparsely by coordinate. A coordinate that was never
//! initialized reads back as a `Pit`, which also covers everything outside
//! the configured bounds. `is_in_bounds` is the stricter check used to stop
//! movement at the board edge.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::tile::{Tile, TileType};
use crate::core::{Direction, GridPos};

/// Grid of tiles with wall and bounds queries.
///
/// ```
/// use robot_rally::board::{Board, Tile};
/// use robot_rally::core::{Direction, GridPos};
///
/// let mut board = Board::new(10, 10);
/// board.set_tile(GridPos::new(3, 3), Tile::pit());
/// board.set_wall(GridPos::new(1, 1), Direction::North, true);
///
/// assert!(board.is_valid_tile(GridPos::new(3, 3)));
/// assert!(board.is_movement_blocked(GridPos::new(1, 1), GridPos::new(2, 1)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: i32,
    height: i32,
    tiles: FxHashMap<GridPos, Tile>,
}

impl Board {
    /// A fully populated board of `Normal` tiles.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let mut board = Self::sparse(width, height);
        for x in 0..width {
            for y in 0..height {
                board.tiles.insert(GridPos::new(x, y), Tile::normal());
            }
        }
        board
    }

    /// A board with no stored tiles; every lookup reads as `Pit` until set.
    #[must_use]
    pub fn sparse(width: i32, height: i32) -> Self {
        Self {
            width: width.max(0),
            height: height.max(0),
            tiles: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Stored tile, or a synthetic `Pit` for coordinates never initialized.
    #[must_use]
    pub fn tile_at(&self, pos: GridPos) -> Tile {
        self.tiles.get(&pos).copied().unwrap_or_else(Tile::pit)
    }

    #[must_use]
    pub fn tile_type(&self, pos: GridPos) -> TileType {
        self.tile_at(pos).tile_type
    }

    #[must_use]
    pub fn is_in_bounds(&self, pos: GridPos) -> bool {
        (0..self.width).contains(&pos.x) && (0..self.height).contains(&pos.y)
    }

    /// Whether a robot may occupy `pos`.
    ///
    /// Pits are enterable; standing in one is resolved as damage after the
    /// move, so only the board edge limits movement.
    #[must_use]
    pub fn is_valid_tile(&self, pos: GridPos) -> bool {
        self.is_in_bounds(pos)
    }

    /// Replace the tile at `pos`. Returns false (and changes nothing) when
    /// `pos` is outside the board.
    pub fn set_tile(&mut self, pos: GridPos, tile: Tile) -> bool {
        if !self.is_in_bounds(pos) {
            return false;
        }
        self.tiles.insert(pos, tile);
        true
    }

    #[must_use]
    pub fn has_wall(&self, pos: GridPos, dir: Direction) -> bool {
        self.tiles.get(&pos).is_some_and(|t| t.walls.has(dir))
    }

    /// Toggle a wall edge. An unstored coordinate is materialized as the
    /// pit it already reads as. Returns false when `pos` is off the board.
    pub fn set_wall(&mut self, pos: GridPos, dir: Direction, enabled: bool) -> bool {
        if !self.is_in_bounds(pos) {
            return false;
        }
        self.tiles.entry(pos).or_insert_with(Tile::pit).walls.set(dir, enabled);
        true
    }

    /// True if a wall sits between two axis-adjacent tiles, on either side.
    ///
    /// Non-adjacent pairs (including diagonals) are never blocked.
    #[must_use]
    pub fn is_movement_blocked(&self, from: GridPos, to: GridPos) -> bool {
        match from.direction_to(to) {
            Some(dir) => self.has_wall(from, dir) || self.has_wall(to, dir.opposite()),
            None => false,
        }
    }

    /// Number of checkpoint tiles on the board.
    #[must_use]
    pub fn total_checkpoints(&self) -> u32 {
        self.tiles
            .values()
            .filter(|t| t.tile_type == TileType::Checkpoint)
            .count() as u32
    }

    /// Coordinate of the checkpoint numbered `number`.
    ///
    /// If a malformed board repeats a number, the smallest coordinate wins.
    #[must_use]
    pub fn checkpoint_position(&self, number: u32) -> Option<GridPos> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.tile_type == TileType::Checkpoint && t.checkpoint_number == number)
            .map(|(&pos, _)| pos)
            .min()
    }

    #[must_use]
    pub fn center(&self) -> GridPos {
        GridPos::new(self.width / 2, self.height / 2)
    }

    /// Every stored tile that differs from a plain floor, sorted by coordinate.
    #[must_use]
    pub fn overrides(&self) -> Vec<(GridPos, Tile)> {
        let mut out: Vec<_> = self
            .tiles
            .iter()
            .filter(|(_, t)| !t.is_plain())
            .map(|(&p, &t)| (p, t))
            .collect();
        out.sort_by_key(|(p, _)| *p);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_normal() {
        let board = Board::new(4, 3);
        assert_eq!(board.tile_type(GridPos::new(0, 0)), TileType::Normal);
        assert_eq!(board.tile_type(GridPos::new(3, 2)), TileType::Normal);
        assert!(board.overrides().is_empty());
    }

    #[test]
    fn test_outside_reads_as_pit() {
        let board = Board::new(4, 4);
        assert_eq!(board.tile_type(GridPos::new(-1, 0)), TileType::Pit);
        assert_eq!(board.tile_type(GridPos::new(4, 0)), TileType::Pit);

        let sparse = Board::sparse(4, 4);
        assert_eq!(sparse.tile_type(GridPos::new(1, 1)), TileType::Pit);
        assert!(sparse.is_in_bounds(GridPos::new(1, 1)));
    }

    #[test]
    fn test_bounds() {
        let board = Board::new(10, 5);
        assert!(board.is_in_bounds(GridPos::new(9, 4)));
        assert!(!board.is_in_bounds(GridPos::new(10, 4)));
        assert!(!board.is_in_bounds(GridPos::new(9, 5)));
        assert!(!board.is_in_bounds(GridPos::new(0, -1)));
    }

    #[test]
    fn test_pit_is_valid_tile() {
        let mut board = Board::new(5, 5);
        board.set_tile(GridPos::new(2, 2), Tile::pit());
        assert!(board.is_valid_tile(GridPos::new(2, 2)));
        assert!(!board.is_valid_tile(GridPos::new(5, 2)));
    }

    #[test]
    fn test_set_tile_out_of_bounds_rejected() {
        let mut board = Board::new(3, 3);
        assert!(!board.set_tile(GridPos::new(3, 0), Tile::laser()));
        assert_eq!(board.tile_type(GridPos::new(3, 0)), TileType::Pit);
    }

    #[test]
    fn test_walls_block_both_sides() {
        let mut board = Board::new(5, 5);
        let a = GridPos::new(2, 2);
        let north = GridPos::new(3, 2);
        let east = GridPos::new(2, 3);

        board.set_wall(a, Direction::North, true);
        assert!(board.is_movement_blocked(a, north));
        assert!(board.is_movement_blocked(north, a));
        assert!(!board.is_movement_blocked(a, east));

        board.set_wall(east, Direction::West, true);
        assert!(board.is_movement_blocked(a, east));

        board.set_wall(a, Direction::North, false);
        assert!(!board.is_movement_blocked(a, north));
    }

    #[test]
    fn test_walls_ignore_non_adjacent() {
        let mut board = Board::new(5, 5);
        for d in Direction::ALL {
            board.set_wall(GridPos::new(2, 2), d, true);
        }
        assert!(!board.is_movement_blocked(GridPos::new(2, 2), GridPos::new(3, 3)));
        assert!(!board.is_movement_blocked(GridPos::new(2, 2), GridPos::new(4, 2)));
    }

    #[test]
    fn test_set_wall_on_missing_tile() {
        let mut board = Board::sparse(3, 3);
        assert!(board.set_wall(GridPos::new(1, 1), Direction::East, true));
        assert!(board.has_wall(GridPos::new(1, 1), Direction::East));
        assert_eq!(board.tile_type(GridPos::new(1, 1)), TileType::Pit);
        assert!(board.is_movement_blocked(GridPos::new(1, 2), GridPos::new(1, 1)));

        assert!(!board.set_wall(GridPos::new(3, 1), Direction::East, true));
        assert!(!board.has_wall(GridPos::new(3, 1), Direction::East));
    }

    #[test]
    fn test_checkpoints() {
        let mut board = Board::new(6, 6);
        board.set_tile(GridPos::new(5, 5), Tile::checkpoint(2));
        board.set_tile(GridPos::new(1, 4), Tile::checkpoint(1));

        assert_eq!(board.total_checkpoints(), 2);
        assert_eq!(board.checkpoint_position(1), Some(GridPos::new(1, 4)));
        assert_eq!(board.checkpoint_position(2), Some(GridPos::new(5, 5)));
        assert_eq!(board.checkpoint_position(3), None);
    }

    #[test]
    fn test_overrides_sorted() {
        let mut board = Board::new(6, 6);
        board.set_tile(GridPos::new(4, 0), Tile::laser());
        board.set_tile(GridPos::new(1, 3), Tile::pit());
        board.set_wall(GridPos::new(2, 2), Direction::South, true);

        let coords: Vec<_> = board.overrides().into_iter().map(|(p, _)| p).collect();
        assert_eq!(
            coords,
            vec![GridPos::new(1, 3), GridPos::new(2, 2), GridPos::new(4, 0)]
        );
    }
}
