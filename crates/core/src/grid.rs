//! Grid module - manages the playfield
//!
//! The grid is a 10x20 matrix where each cell is either empty or holds one palette color.
//! Uses a flat array for cache locality and zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//!
//! The grid is only ever mutated in place: pieces are merged into it, full rows are
//! collapsed out of it, and a restart clears it.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{Cell, Color, BOARD_HEIGHT, BOARD_WIDTH};

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = WIDTH * HEIGHT;

/// Row indices removed by one [`Grid::clear_full_rows`] pass.
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Cells of row `y`, left to right
    ///
    /// Panics if `y` is out of range; use [`Grid::rows`] to iterate safely.
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks_exact(WIDTH)
    }

    /// Fill every cell of row `y` with `color`, except the listed columns.
    ///
    /// Used to set up puzzles and test scenarios.
    pub fn fill_row_except(&mut self, y: usize, color: Color, gaps: &[usize]) {
        if y >= HEIGHT {
            return;
        }
        let start = y * WIDTH;
        for (x, cell) in self.cells[start..start + WIDTH].iter_mut().enumerate() {
            *cell = if gaps.contains(&x) { None } else { Some(color) };
        }
    }

    /// Write a piece's color into every occupied cell it covers.
    ///
    /// Cells outside the grid (in particular rows above the top) are skipped, so a piece
    /// locked partly off-screen leaves only its visible part behind.
    pub fn merge(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            self.set(x, y, Some(color));
        }
    }

    /// Clear all full rows and return the row indices that were cleared, bottom to top.
    ///
    /// Single two-pointer pass: surviving rows are copied down to a write cursor, then
    /// the rows left above the cursor are blanked. Indices refer to the grid as it was
    /// before the call.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared_rows = ClearedRows::new();
        let mut write_y = HEIGHT;

        for read_y in (0..HEIGHT).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * WIDTH;
                    self.cells
                        .copy_within(src_start..src_start + WIDTH, write_y * WIDTH);
                }
            }
        }

        self.cells[..write_y * WIDTH].fill(None);

        cleared_rows
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Check whether every cell is empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_none())
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire grid
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write the grid as color codes (0 = empty, 1..=7 = palette) into `out`.
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (row_out, row) in out.iter_mut().zip(self.rows()) {
            for (dst, cell) in row_out.iter_mut().zip(row) {
                *dst = cell.map_or(0, |color| color.code());
            }
        }
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), HEIGHT);
        assert!(cells_2d.iter().all(|row| row.len() == WIDTH));

        let mut flat = [None; GRID_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * WIDTH + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::{Piece, Shape};
    use crate::types::PieceKind;

    #[test]
    fn test_grid_index_calculation() {
        assert_eq!(Grid::index(0, 0), Some(0));
        assert_eq!(Grid::index(9, 0), Some(9));
        assert_eq!(Grid::index(0, 1), Some(10));
        assert_eq!(Grid::index(9, 19), Some(199));
        assert_eq!(Grid::index(-1, 0), None);
        assert_eq!(Grid::index(10, 0), None);
        assert_eq!(Grid::index(0, 20), None);
        assert_eq!(Grid::index(0, -1), None);
    }

    #[test]
    fn test_grid_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![None; 10]; 20];
        cells_2d[5][3] = Some(Color::Yellow);
        cells_2d[10][7] = Some(Color::Orange);

        let grid = Grid::from_cells(cells_2d.clone());
        assert_eq!(cells_2d, grid.to_cells());
    }

    #[test]
    fn test_merge_skips_cells_above_top() {
        let mut grid = Grid::new();
        // Vertical I hanging two rows above the visible board.
        let piece = Piece::new(PieceKind::I, Shape::spawn(PieceKind::I).rotated_cw(), 4, -2);
        grid.merge(&piece);

        assert_eq!(grid.occupied_count(), 2);
        assert_eq!(grid.get(4, 0), Some(Some(Color::Cyan)));
        assert_eq!(grid.get(4, 1), Some(Some(Color::Cyan)));
        assert_eq!(grid.get(4, 2), Some(None));
    }

    #[test]
    fn test_clear_full_rows_collapses_gaps_in_one_pass() {
        let mut grid = Grid::new();
        grid.fill_row_except(19, Color::Red, &[]);
        grid.fill_row_except(18, Color::Blue, &[0]);
        grid.fill_row_except(17, Color::Green, &[]);
        grid.set(5, 16, Some(Color::Cyan));

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);

        // Partial rows keep their relative order and sink by the number of rows removed
        // below them.
        assert_eq!(grid.get(0, 19), Some(None));
        assert_eq!(grid.get(1, 19), Some(Some(Color::Blue)));
        assert_eq!(grid.get(5, 18), Some(Some(Color::Cyan)));
        assert_eq!(grid.occupied_count(), 10);
        assert!(grid.rows().take(18).flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_full_rows_handles_whole_board() {
        let mut grid = Grid::new();
        for y in 0..HEIGHT {
            grid.fill_row_except(y, Color::Magenta, &[]);
        }
        let cleared = grid.clear_full_rows();
        assert_eq!(cleared.len(), HEIGHT);
        assert!(grid.is_empty());
    }

    #[test]
    fn test_write_u8_grid_uses_color_codes() {
        let mut grid = Grid::new();
        grid.set(0, 0, Some(Color::Cyan));
        grid.set(9, 19, Some(Color::Orange));

        let mut out = [[0u8; WIDTH]; HEIGHT];
        grid.write_u8_grid(&mut out);
        assert_eq!(out[0][0], 1);
        assert_eq!(out[19][9], 7);
        assert_eq!(out[10][5], 0);
    }
}
