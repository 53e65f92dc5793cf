//! Pieces module - tetromino shape matrices and naive clockwise rotation
//!
//! A shape is a small rectangular boolean matrix (at most 4x4) stored inline so pieces
//! stay `Copy` and rotation never allocates. Rotation is a plain 90° clockwise matrix
//! transform: no kick table, no re-centering. Whether the rotated shape is accepted is
//! decided by [`crate::placement::is_valid`].

use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest bounding-box side of any tetromino
pub const MAX_DIM: usize = 4;

/// Rectangular occupancy matrix of a piece, relative to its anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

/// Build a shape from a 0/1 literal; only the top-left `rows x cols` window is read.
const fn shape(rows: u8, cols: u8, bits: [[u8; MAX_DIM]; MAX_DIM]) -> Shape {
    let mut cells = [[false; MAX_DIM]; MAX_DIM];
    let mut r = 0;
    while r < rows as usize {
        let mut c = 0;
        while c < cols as usize {
            cells[r][c] = bits[r][c] != 0;
            c += 1;
        }
        r += 1;
    }
    Shape { rows, cols, cells }
}

/// Spawn shapes in canonical order (I, O, T, S, Z, J, L)
const SPAWN_SHAPES: [Shape; 7] = [
    // I
    shape(1, 4, [[1, 1, 1, 1], [0; 4], [0; 4], [0; 4]]),
    // O
    shape(2, 2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    // T
    shape(2, 3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    // S
    shape(2, 3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
    // Z
    shape(2, 3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
    // J
    shape(2, 3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
    // L
    shape(2, 3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
];

impl Shape {
    /// Canonical rotation-0 shape for a kind
    pub fn spawn(kind: PieceKind) -> Self {
        SPAWN_SHAPES[kind.index()]
    }

    /// Build a shape from rows of 0/1 values.
    ///
    /// Returns `None` unless the input is rectangular with both sides in `1..=4`.
    pub fn from_rows(rows: &[&[u8]]) -> Option<Self> {
        let height = rows.len();
        let width = rows.first()?.len();
        if !(1..=MAX_DIM).contains(&height) || !(1..=MAX_DIM).contains(&width) {
            return None;
        }
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }

        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for (r, row) in rows.iter().enumerate() {
            for (c, &bit) in row.iter().enumerate() {
                cells[r][c] = bit != 0;
            }
        }
        Some(Self {
            rows: height as u8,
            cols: width as u8,
            cells,
        })
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether `(r, c)` is occupied; false outside the bounding box
    pub fn get(&self, r: usize, c: usize) -> bool {
        r < self.rows as usize && c < self.cols as usize && self.cells[r][c]
    }

    /// Occupied cells as `(row, col)` offsets, row-major
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).filter_map(move |c| self.cells[r as usize][c as usize].then_some((r, c)))
        })
    }

    /// Number of occupied cells
    pub fn count(&self) -> usize {
        self.cells().count()
    }

    /// 90° clockwise rotation.
    ///
    /// An `R x C` shape becomes `C x R`; source cell `(r, c)` lands on `(c, R-1-r)`.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for r in 0..rows {
            for c in 0..cols {
                cells[c][rows - 1 - r] = self.cells[r][c];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Every edge row and edge column holds at least one occupied cell.
    pub fn is_tight(&self) -> bool {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let row_used = |r: usize| (0..cols).any(|c| self.cells[r][c]);
        let col_used = |c: usize| (0..rows).any(|r| self.cells[r][c]);
        row_used(0) && row_used(rows - 1) && col_used(0) && col_used(cols - 1)
    }
}

/// A tetromino instance: kind, current shape and anchor (top-left of the bounding box)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    pub fn new(kind: PieceKind, shape: Shape, x: i8, y: i8) -> Self {
        Self { kind, shape, x, y }
    }

    /// Canonical shape, bounding box centered horizontally, top row on grid row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::spawn(kind);
        let x = (BOARD_WIDTH - shape.cols()) / 2;
        Self::new(kind, shape, x as i8, 0)
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Candidate shape after a clockwise turn; the piece itself is untouched.
    pub fn rotated_shape(&self) -> Shape {
        self.shape.rotated_cw()
    }

    /// Absolute grid coordinates `(x, y)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }

    /// Same piece moved by `(dx, dy)`
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_spawn_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            let shape = Shape::spawn(kind);
            assert_eq!(shape.count(), 4, "{:?} should have 4 cells", kind);
            assert!(shape.is_tight(), "{:?} spawn shape has an empty border", kind);
        }
    }

    #[test]
    fn test_spawn_dimensions() {
        let dims = |k| {
            let s = Shape::spawn(k);
            (s.rows(), s.cols())
        };
        assert_eq!(dims(PieceKind::I), (1, 4));
        assert_eq!(dims(PieceKind::O), (2, 2));
        for k in [PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
            assert_eq!(dims(k), (2, 3));
        }
    }

    #[test]
    fn test_t_rotation_matches_matrix_rule() {
        // T:      rotated:
        // .#.     #.
        // ###     ##
        //         #.
        let rotated = Shape::spawn(PieceKind::T).rotated_cw();
        let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]).unwrap();
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_i_alternates_orientation() {
        let i = Shape::spawn(PieceKind::I);
        let vertical = i.rotated_cw();
        assert_eq!((vertical.rows(), vertical.cols()), (4, 1));
        assert_eq!(vertical.rotated_cw(), i);
    }

    #[test]
    fn test_o_is_rotation_invariant() {
        let o = Shape::spawn(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::spawn(kind);
            let back = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, s, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_keeps_tight_bounds() {
        for kind in PieceKind::ALL {
            let mut s = Shape::spawn(kind);
            for _ in 0..4 {
                s = s.rotated_cw();
                assert!(s.is_tight(), "{:?}", kind);
            }
        }
    }

    #[test]
    fn test_spawn_anchor_is_centered() {
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T).x, 3);
        for kind in PieceKind::ALL {
            assert_eq!(Piece::spawn(kind).y, 0);
        }
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        assert!(Shape::from_rows(&[&[1, 1], &[1]]).is_none());
        assert!(Shape::from_rows(&[]).is_none());
        assert!(Shape::from_rows(&[&[1, 1, 1, 1, 1]]).is_none());
    }

    #[test]
    fn test_piece_cells_are_absolute() {
        let piece = Piece::spawn(PieceKind::J).shifted(0, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 5), (3, 6), (4, 6), (5, 6)]);
    }
}
