//! Plain-data copy of everything a presentation layer reads from the engine.

use crate::pieces::{Piece, Shape};
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

impl PieceSnapshot {
    /// Absolute grid coordinates of the occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .cells()
            .map(move |(r, c)| (self.x + c as i8, self.y + r as i8))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Color codes, row-major: 0 = empty, 1..=7 = palette
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub current: PieceSnapshot,
    pub next: PieceSnapshot,
    pub score: u32,
    pub lines: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn occupied_count(&self) -> usize {
        self.board.iter().flatten().filter(|&&v| v != 0).count()
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let idle = PieceSnapshot::from(Piece::spawn(PieceKind::I));
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            current: idle,
            next: idle,
            score: 0,
            lines: 0,
            phase: Phase::Running,
        }
    }
}
