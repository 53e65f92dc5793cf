//! Grid tests - bounds, merging and atomic line clearing

use blockfall::core::{Grid, Piece, Shape};
use blockfall::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_grid_new_empty() {
    let grid = Grid::new();
    assert_eq!(grid.width(), BOARD_WIDTH);
    assert_eq!(grid.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert_eq!(grid.get(x, y), Some(None), "cell ({}, {}) should be empty", x, y);
        }
    }
    assert!(grid.is_empty());
}

#[test]
fn test_grid_get_out_of_bounds() {
    let grid = Grid::new();
    assert_eq!(grid.get(-1, 0), None);
    assert_eq!(grid.get(0, -1), None);
    assert_eq!(grid.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(grid.get(0, BOARD_HEIGHT as i8), None);
    assert!(!grid.is_occupied(-1, 5));
}

#[test]
fn test_grid_set_and_get() {
    let mut grid = Grid::new();
    assert!(grid.set(5, 10, Some(Color::Magenta)));
    assert_eq!(grid.get(5, 10), Some(Some(Color::Magenta)));
    assert!(grid.is_occupied(5, 10));

    assert!(grid.set(5, 10, None));
    assert_eq!(grid.get(5, 10), Some(None));

    assert!(!grid.set(0, BOARD_HEIGHT as i8, Some(Color::Red)));
}

#[test]
fn test_merge_writes_piece_color() {
    let mut grid = Grid::new();
    let piece = Piece::new(PieceKind::T, Shape::spawn(PieceKind::T), 3, 18);
    grid.merge(&piece);

    assert_eq!(grid.occupied_count(), 4);
    assert_eq!(grid.get(4, 18), Some(Some(Color::Magenta)));
    for x in 3..6 {
        assert_eq!(grid.get(x, 19), Some(Some(Color::Magenta)));
    }
    assert_eq!(grid.get(3, 18), Some(None));
}

#[test]
fn test_merge_skips_cells_above_top() {
    let mut grid = Grid::new();
    // Vertical I with its top two cells above row 0.
    let vertical = Shape::spawn(PieceKind::I).rotated_cw();
    let piece = Piece::new(PieceKind::I, vertical, 0, -2);
    grid.merge(&piece);

    assert_eq!(grid.occupied_count(), 2);
    assert!(grid.is_occupied(0, 0));
    assert!(grid.is_occupied(0, 1));
}

#[test]
fn test_clear_single_bottom_row() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, Color::Blue, &[]);
    grid.set(2, 18, Some(Color::Red));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19]);
    assert_eq!(grid.get(2, 19), Some(Some(Color::Red)));
    assert_eq!(grid.occupied_count(), 1);
}

#[test]
fn test_clear_non_adjacent_rows_preserves_order() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, Color::Cyan, &[]);
    grid.fill_row_except(18, Color::Green, &[0]);
    grid.fill_row_except(17, Color::Cyan, &[]);
    grid.fill_row_except(16, Color::Orange, &[9]);

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);

    // Survivors keep their order and sink by the number of cleared rows below them.
    assert_eq!(grid.row(19)[1], Some(Color::Green));
    assert_eq!(grid.row(19)[0], None);
    assert_eq!(grid.row(18)[0], Some(Color::Orange));
    assert_eq!(grid.row(18)[9], None);
    assert!(grid.rows().take(18).flatten().all(|c| c.is_none()));
}

#[test]
fn test_clear_four_rows_at_once() {
    let mut grid = Grid::new();
    for y in 16..20 {
        grid.fill_row_except(y, Color::Yellow, &[]);
    }
    grid.set(4, 15, Some(Color::Red));

    let cleared = grid.clear_full_rows();
    assert_eq!(cleared.len(), 4);
    assert_eq!(grid.occupied_count(), 1);
    assert_eq!(grid.get(4, 19), Some(Some(Color::Red)));
}

#[test]
fn test_clear_without_full_rows_is_noop() {
    let mut grid = Grid::new();
    grid.fill_row_except(19, Color::Red, &[5]);
    let before = grid.clone();

    assert!(grid.clear_full_rows().is_empty());
    assert_eq!(grid, before);
}

#[test]
fn test_clear_resets_grid() {
    let mut grid = Grid::new();
    grid.fill_row_except(10, Color::Red, &[1, 2]);
    grid.clear();
    assert!(grid.is_empty());
}
