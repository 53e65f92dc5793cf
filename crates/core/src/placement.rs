//! Placement validation - pure collision and bounds checks
//!
//! A placement is rejected when any occupied cell of the shape falls left of column 0,
//! right of the last column, below the last row, or onto an occupied grid cell.
//! Cells above row 0 are allowed: pieces spawn and rotate partly above the visible board.

use crate::grid::Grid;
use crate::pieces::{Piece, Shape};

/// Check whether `shape` anchored at `(x, y)` fits on `grid`.
pub fn is_valid(shape: &Shape, x: i8, y: i8, grid: &Grid) -> bool {
    shape.cells().all(|(r, c)| {
        let px = x + c as i8;
        let py = y + r as i8;
        if px < 0 || px >= grid.width() as i8 || py >= grid.height() as i8 {
            return false;
        }
        py < 0 || !grid.is_occupied(px, py)
    })
}

/// Check a piece at its own anchor.
pub fn fits(piece: &Piece, grid: &Grid) -> bool {
    is_valid(&piece.shape, piece.x, piece.y, grid)
}
