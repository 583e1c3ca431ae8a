//! Board snapshot and tile table.

use serde::Serialize;

use crate::game::{Square, Unit};

/// Largest supported board edge. Column labels run `A..=Z`.
pub const MAX_DIMENSION: u8 = 26;

/// Checkerboard color of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TileColor {
    /// `(row + col)` is even.
    Light,
    /// `(row + col)` is odd.
    Dark,
}

/// Static per-square metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tile {
    /// Algebraic label such as `A8`.
    pub label: String,
    /// Checkerboard color.
    pub color: TileColor,
    /// Whether a unit stands on the tile. Kept equal to grid occupancy.
    pub occupied: bool,
}

impl Tile {
    fn at(row: u8, col: u8, rows: u8) -> Self {
        let letter = char::from(b'A' + col);
        let color = if (u16::from(row) + u16::from(col)) % 2 == 0 {
            TileColor::Light
        } else {
            TileColor::Dark
        };
        Self {
            label: format!("{letter}{}", rows - row),
            color,
            occupied: false,
        }
    }
}

/// Grid occupancy derived from a unit collection.
///
/// The board is never authoritative: it is rebuilt from the unit list every
/// time that list changes.
#[derive(Debug, Clone)]
pub struct Board {
    rows: u8,
    cols: u8,
    /// Occupant per square, row-major.
    grid: Vec<Option<Unit>>,
    /// Tile metadata per square, row-major.
    tiles: Vec<Tile>,
}

impl Board {
    /// Create an empty board.
    ///
    /// Returns `None` if either dimension is zero or above [`MAX_DIMENSION`].
    #[must_use]
    pub fn new(rows: u8, cols: u8) -> Option<Self> {
        if rows == 0 || cols == 0 || rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return None;
        }

        let size = usize::from(rows) * usize::from(cols);
        let tiles = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Tile::at(row, col, rows)))
            .collect();

        Some(Self {
            rows,
            cols,
            grid: vec![None; size],
            tiles,
        })
    }

    /// Create a board and populate it from `units`.
    #[must_use]
    pub fn from_units(rows: u8, cols: u8, units: &[Unit]) -> Option<Self> {
        let mut board = Self::new(rows, cols)?;
        board.rebuild(units);
        Some(board)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn cols(&self) -> u8 {
        self.cols
    }

    /// Check if a signed coordinate lies on the board.
    #[must_use]
    pub fn contains(&self, row: i32, col: i32) -> bool {
        (0..i32::from(self.rows)).contains(&row) && (0..i32::from(self.cols)).contains(&col)
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if !self.contains(row, col) {
            return None;
        }
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        Some(row * usize::from(self.cols) + col)
    }

    fn square_index(&self, square: Square) -> Option<usize> {
        self.index(i32::from(square.row), i32::from(square.col))
    }

    /// Clear the grid and tile occupancy, then place every unit in list order.
    ///
    /// Units off the board are skipped. In debug builds, overlapping or
    /// off-board units panic.
    pub fn rebuild(&mut self, units: &[Unit]) {
        self.grid.fill(None);
        for tile in &mut self.tiles {
            tile.occupied = false;
        }

        for unit in units {
            let idx = self.square_index(unit.square);
            debug_assert!(
                idx.is_some(),
                "{unit} at {} is off a {}x{} board",
                unit.square,
                self.rows,
                self.cols
            );
            let Some(idx) = idx else {
                continue;
            };
            debug_assert!(
                self.grid[idx].is_none(),
                "{unit} overlaps another unit at {}",
                unit.square
            );
            self.grid[idx] = Some(*unit);
            self.tiles[idx].occupied = true;
        }
    }

    /// Unit standing at `(row, col)`. Out-of-range coordinates yield `None`.
    #[must_use]
    pub fn get_unit(&self, row: i32, col: i32) -> Option<&Unit> {
        self.index(row, col).and_then(|idx| self.grid[idx].as_ref())
    }

    /// Unit standing on `square`.
    #[must_use]
    pub fn unit_at(&self, square: Square) -> Option<&Unit> {
        self.get_unit(i32::from(square.row), i32::from(square.col))
    }

    /// Whether `(row, col)` holds no unit. Out-of-range squares are empty.
    #[must_use]
    pub fn is_empty(&self, row: i32, col: i32) -> bool {
        self.get_unit(row, col).is_none()
    }

    /// Tile metadata at `(row, col)`.
    #[must_use]
    pub fn tile(&self, row: i32, col: i32) -> Option<&Tile> {
        self.index(row, col).map(|idx| &self.tiles[idx])
    }

    /// Tiles in row-major order.
    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Iterate over every square with its occupant.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Option<&Unit>)> {
        let cols = usize::from(self.cols);
        self.grid.iter().enumerate().map(move |(idx, slot)| {
            // Both fit in u8 since rows, cols <= MAX_DIMENSION
            #[allow(clippy::cast_possible_truncation)]
            let square = Square::new((idx / cols) as u8, (idx % cols) as u8);
            (square, slot.as_ref())
        })
    }

    /// Number of occupied squares.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().filter(|slot| slot.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Side, UnitId, UnitKind};

    fn unit(id: u16, side: Side, row: u8, col: u8) -> Unit {
        Unit::new(UnitId(id), UnitKind::Pawn, side, Square::new(row, col))
    }

    fn sample_board() -> Board {
        let units = [
            unit(0, Side::White, 1, 1),
            unit(1, Side::White, 2, 1),
            unit(2, Side::Black, 3, 4),
        ];
        Board::from_units(8, 8, &units).unwrap()
    }

    #[test]
    fn test_board_zero_size() {
        assert!(Board::new(0, 8).is_none());
        assert!(Board::new(8, 0).is_none());
        assert!(Board::new(27, 8).is_none());
    }

    #[test]
    fn test_piece_placement() {
        let board = sample_board();
        assert_eq!(board.get_unit(1, 1).unwrap().id, UnitId(0));
        assert_eq!(board.get_unit(2, 1).unwrap().id, UnitId(1));
        assert_eq!(board.get_unit(3, 4).unwrap().id, UnitId(2));
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_is_empty() {
        let board = sample_board();
        assert!(!board.is_empty(1, 1));
        assert!(!board.is_empty(3, 4));
        assert!(board.is_empty(0, 0));
        assert!(board.is_empty(5, 0));
        assert!(board.is_empty(6, 4));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let board = sample_board();
        assert!(board.get_unit(-1, 0).is_none());
        assert!(board.get_unit(0, -1).is_none());
        assert!(board.get_unit(8, 0).is_none());
        assert!(board.get_unit(i32::MIN, i32::MAX).is_none());
        assert!(board.tile(8, 8).is_none());
    }

    #[test]
    fn test_tile_labels_and_colors() {
        let board = Board::new(8, 8).unwrap();
        let corner = board.tile(0, 0).unwrap();
        assert_eq!(corner.label, "A8");
        assert_eq!(corner.color, TileColor::Light);

        let other = board.tile(7, 7).unwrap();
        assert_eq!(other.label, "H1");
        assert_eq!(other.color, TileColor::Light);

        assert_eq!(board.tile(0, 1).unwrap().color, TileColor::Dark);
    }

    #[test]
    fn test_rebuild_clears_stale_occupancy() {
        let mut board = sample_board();
        assert!(board.tile(1, 1).unwrap().occupied);

        board.rebuild(&[unit(9, Side::Black, 5, 5)]);

        assert!(board.is_empty(1, 1));
        assert!(!board.tile(1, 1).unwrap().occupied);
        assert!(board.tile(5, 5).unwrap().occupied);
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_tiles_track_grid() {
        let board = sample_board();
        for (square, occupant) in board.iter() {
            let tile = board
                .tile(i32::from(square.row), i32::from(square.col))
                .unwrap();
            assert_eq!(tile.occupied, occupant.is_some(), "mismatch at {square}");
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overlaps")]
    fn test_rebuild_rejects_overlap_in_debug() {
        let _ = Board::from_units(8, 8, &[unit(0, Side::White, 2, 2), unit(1, Side::Black, 2, 2)]);
    }
}
