//! Core data models for Maze Repair.
//! Directions and their rotation algebra, rotatable tiles, and the board grid.

use crate::error::{MazeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four sides of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Clockwise order, starting at north.
    pub const ALL: [Direction; 4] = [Direction::North, Direction::East, Direction::South, Direction::West];

    fn index(self) -> usize {
        match self { Direction::North => 0, Direction::East => 1, Direction::South => 2, Direction::West => 3 }
    }

    /// Rotate by `steps` quarter-turns clockwise.
    pub fn clockwise(self, steps: u32) -> Direction {
        Self::ALL[(self.index() + (steps % 4) as usize) % 4]
    }

    pub fn opposite(self) -> Direction {
        self.clockwise(2)
    }

    /// Grid offset `(dx, dy)` with y growing southwards.
    pub fn to_offset(self) -> (i32, i32) {
        match self { Direction::North => (0, -1), Direction::East => (1, 0), Direction::South => (0, 1), Direction::West => (-1, 0) }
    }

    pub fn from_offset(dx: i32, dy: i32) -> Result<Direction> {
        match (dx, dy) {
            (0, -1) => Ok(Direction::North),
            (1, 0) => Ok(Direction::East),
            (0, 1) => Ok(Direction::South),
            (-1, 0) => Ok(Direction::West),
            _ => Err(MazeError::InvalidOffset { dx, dy }),
        }
    }

    /// Parse a catalog direction name ("NORTH", "EAST", "SOUTH", "WEST").
    pub fn from_name(name: &str) -> Option<Direction> {
        match name {
            "NORTH" => Some(Direction::North),
            "EAST" => Some(Direction::East),
            "SOUTH" => Some(Direction::South),
            "WEST" => Some(Direction::West),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self { Direction::North => "NORTH", Direction::East => "EAST", Direction::South => "SOUTH", Direction::West => "WEST" }
    }

    fn bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A rotatable puzzle tile. Tiles are values: rotating yields a new tile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTile")]
pub struct Tile {
    id: String,
    name: String,
    /// Asset reference for the renderer; never interpreted here.
    image: String,
    /// Path segments, each listing the sides it touches.
    paths: Vec<Vec<Direction>>,
    /// Quarter-turns applied since the catalog definition, in 0..4.
    rotation: u8,
}

#[derive(Deserialize)]
struct RawTile {
    id: String,
    name: String,
    image: String,
    paths: Vec<Vec<Direction>>,
    rotation: u8,
}

impl TryFrom<RawTile> for Tile {
    type Error = MazeError;

    fn try_from(raw: RawTile) -> Result<Self> {
        if raw.rotation >= 4 {
            return Err(MazeError::InvalidRotation(raw.rotation));
        }
        Ok(Self { id: raw.id, name: raw.name, image: raw.image, paths: raw.paths, rotation: raw.rotation })
    }
}

impl Tile {
    pub fn new(id: impl Into<String>, name: impl Into<String>, image: impl Into<String>, paths: Vec<Vec<Direction>>) -> Self {
        Self { id: id.into(), name: name.into(), image: image.into(), paths, rotation: 0 }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn paths(&self) -> &[Vec<Direction>] {
        &self.paths
    }

    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Returns this tile turned `steps` quarter-turns clockwise.
    pub fn rotate(&self, steps: u32) -> Tile {
        let steps = steps % 4;
        let paths = if steps == 0 {
            self.paths.clone()
        } else {
            self.paths
                .iter()
                .map(|segment| segment.iter().map(|d| d.clockwise(steps)).collect())
                .collect()
        };
        Tile {
            id: self.id.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            paths,
            rotation: ((self.rotation as u32 + steps) % 4) as u8,
        }
    }

    pub fn has_path_to(&self, direction: Direction) -> bool {
        self.paths.iter().any(|segment| segment.contains(&direction))
    }

    /// True when both tiles carry a path across the edge they would share if
    /// `other` sat next to this tile in `direction`.
    pub fn connects_to(&self, other: &Tile, direction: Direction) -> bool {
        self.has_path_to(direction) && other.has_path_to(direction.opposite())
    }

    /// Bitmask of the sides touched by any path (bit order follows `Direction::ALL`).
    pub fn edge_mask(&self) -> u8 {
        Direction::ALL
            .iter()
            .filter(|d| self.has_path_to(**d))
            .fold(0, |mask, d| mask | d.bit())
    }

    fn glyph(&self) -> char {
        // Indexed by edge_mask(): N=1, E=2, S=4, W=8.
        const GLYPHS: [char; 16] = [
            ' ', '╵', '╶', '└', '╷', '│', '┌', '├', '╴', '┘', '─', '┴', '┐', '┤', '┬', '┼',
        ];
        GLYPHS[self.edge_mask() as usize]
    }
}

/// Rectangular grid of optional tiles, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoard")]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major cells; length = rows * cols.
    cells: Vec<Option<Tile>>,
}

/// Unchecked wire form of a saved board.
#[derive(Deserialize)]
struct RawBoard {
    rows: usize,
    cols: usize,
    cells: Vec<Option<Tile>>,
}

impl TryFrom<RawBoard> for Board {
    type Error = MazeError;

    fn try_from(raw: RawBoard) -> Result<Self> {
        let mut board = Board::new(raw.rows, raw.cols)?;
        if raw.cells.len() != board.cells.len() {
            return Err(MazeError::CellCountMismatch { expected: board.cells.len(), found: raw.cells.len() });
        }
        board.cells = raw.cells;
        Ok(board)
    }
}

impl Board {
    /// An empty board. Both dimensions must be non-zero.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self { rows, cols, cells: vec![None; rows * cols] })
    }

    /// Build a board from full rows of tiles. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(MazeError::InvalidDimensions { rows: height, cols: width });
        }
        let cells = rows.into_iter().flatten().map(Some).collect();
        Ok(Self { rows: height, cols: width, cells })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Tile> {
        if !self.contains(row, col) {
            return None;
        }
        self.cells[self.idx(row, col)].as_ref()
    }

    /// Put `tile` into the cell (or clear it with `None`). Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<Tile>) {
        if self.contains(row, col) {
            let i = self.idx(row, col);
            self.cells[i] = tile;
        }
    }

    /// Coordinates of the cell adjacent to `(row, col)` in `direction`, if on the board.
    pub fn neighbor(&self, row: usize, col: usize, direction: Direction) -> Option<(usize, usize)> {
        let (dx, dy) = direction.to_offset();
        let nr = row.checked_add_signed(dy as isize)?;
        let nc = col.checked_add_signed(dx as isize)?;
        self.contains(nr, nc).then_some((nr, nc))
    }

    /// Every cell in row-major order with its coordinates.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Option<&Tile>)> {
        let cols = self.cols;
        self.cells.iter().enumerate().map(move |(i, t)| ((i / cols, i % cols), t.as_ref()))
    }

    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Replace every tile with `f(row, col, tile)`, in row-major order.
    pub fn map_tiles(&mut self, mut f: impl FnMut(usize, usize, &Tile) -> Tile) {
        let cols = self.cols;
        for (i, cell) in self.cells.iter_mut().enumerate() {
            if let Some(tile) = cell {
                *tile = f(i / cols, i % cols, tile);
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let c = self.get(row, col).map_or('·', Tile::glyph);
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> Tile {
        Tile::new("corner", "Corner", "corner.png", vec![vec![Direction::North, Direction::East]])
    }

    #[test]
    fn direction_algebra_is_closed() {
        for d in Direction::ALL {
            assert_eq!(d.clockwise(4), d);
            assert_eq!(d.clockwise(0), d);
            assert_eq!(d.opposite().opposite(), d);
            assert_eq!(d.opposite(), d.clockwise(2));
            assert_eq!(d.clockwise(1).clockwise(3), d);
        }
        assert_eq!(Direction::North.clockwise(1), Direction::East);
        assert_eq!(Direction::West.clockwise(1), Direction::North);
        assert_eq!(Direction::East.clockwise(7), Direction::North);
    }

    #[test]
    fn offsets_round_trip_for_unit_vectors() {
        assert_eq!(Direction::North.to_offset(), (0, -1));
        assert_eq!(Direction::West.to_offset(), (-1, 0));
        for d in Direction::ALL {
            let (dx, dy) = d.to_offset();
            assert_eq!(Direction::from_offset(dx, dy).unwrap(), d);
        }
    }

    #[test]
    fn non_unit_offsets_are_rejected() {
        for (dx, dy) in [(0, 0), (1, 1), (2, 0), (-1, -1)] {
            assert!(matches!(Direction::from_offset(dx, dy), Err(MazeError::InvalidOffset { .. })));
        }
    }

    #[test]
    fn direction_names_parse() {
        for d in Direction::ALL {
            assert_eq!(Direction::from_name(d.name()), Some(d));
        }
        assert_eq!(Direction::from_name("north"), None);
        assert_eq!(Direction::from_name("UP"), None);
    }

    #[test]
    fn rotate_moves_paths_and_rotation_state() {
        let t = corner().rotate(1);
        assert_eq!(t.paths(), &[vec![Direction::East, Direction::South]]);
        assert_eq!(t.rotation(), 1);
        assert!(t.has_path_to(Direction::South));
        assert!(!t.has_path_to(Direction::North));
    }

    #[test]
    fn rotation_composes_modulo_four() {
        let t = corner();
        assert_eq!(t.rotate(4), t);
        for n in 0..8 {
            for m in 0..8 {
                assert_eq!(t.rotate(n).rotate(m), t.rotate((n + m) % 4));
            }
        }
    }

    #[test]
    fn rotate_leaves_original_untouched() {
        let t = corner();
        let _ = t.rotate(3);
        assert_eq!(t.rotation(), 0);
        assert_eq!(t.paths(), &[vec![Direction::North, Direction::East]]);
    }

    #[test]
    fn connects_to_needs_both_sides() {
        let a = corner();
        let b = corner().rotate(2); // south + west
        assert!(a.connects_to(&b, Direction::East));
        assert!(!a.connects_to(&b, Direction::North));
    }

    #[test]
    fn board_neighbors_stay_in_bounds() {
        let b = Board::new(2, 3).unwrap();
        assert_eq!(b.neighbor(0, 0, Direction::North), None);
        assert_eq!(b.neighbor(0, 0, Direction::West), None);
        assert_eq!(b.neighbor(0, 0, Direction::East), Some((0, 1)));
        assert_eq!(b.neighbor(1, 2, Direction::South), None);
        assert_eq!(b.neighbor(1, 2, Direction::North), Some((0, 2)));
    }

    #[test]
    fn saved_boards_round_trip_through_json() {
        let mut board = Board::new(1, 2).unwrap();
        board.set(0, 0, Some(corner().rotate(3)));
        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
        assert_eq!(restored.get(0, 0).map(Tile::rotation), Some(3));
        assert_eq!(restored.get(0, 1), None);
    }

    #[test]
    fn malformed_saved_boards_are_rejected() {
        let tile = serde_json::to_string(&corner()).unwrap();
        let short = format!(r#"{{"rows":2,"cols":2,"cells":[{tile}]}}"#);
        let err = serde_json::from_str::<Board>(&short).unwrap_err();
        assert!(err.to_string().contains("expected 4 cells, found 1"), "{err}");

        let flat = format!(r#"{{"rows":1,"cols":0,"cells":[{tile}]}}"#);
        assert!(serde_json::from_str::<Board>(&flat).is_err());

        let overturned = tile.replace(r#""rotation":0"#, r#""rotation":4"#);
        assert_ne!(overturned, tile);
        let err = serde_json::from_str::<Tile>(&overturned).unwrap_err();
        assert!(err.to_string().contains("rotation 4"), "{err}");
    }

    #[test]
    fn zero_sized_boards_are_rejected() {
        assert!(matches!(Board::new(0, 3), Err(MazeError::InvalidDimensions { .. })));
        assert!(matches!(Board::from_rows(vec![vec![corner()], vec![]]), Err(MazeError::InvalidDimensions { .. })));
    }

    #[test]
    fn display_draws_edge_glyphs() {
        let mut b = Board::new(1, 2).unwrap();
        b.set(0, 0, Some(corner()));
        assert_eq!(b.to_string(), "└·\n");
    }
}
