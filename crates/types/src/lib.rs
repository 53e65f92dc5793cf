//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used by
//! the engine, the terminal front-end and the headless JSON adapter alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity
//!
//! The active piece is forced down one row every [`FALL_INTERVAL_SECS`] seconds.
//! The interval is constant for the whole game; there is no level progression.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Color, GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let kind = PieceKind::from_str("t").unwrap();
//! assert_eq!(kind, PieceKind::T);
//! assert_eq!(kind.color(), Color::Magenta);
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Gravity interval in seconds (one forced row per half second)
pub const FALL_INTERVAL_SECS: f64 = 0.5;

/// Flat award per cleared row (no multi-line bonus tiers)
pub const POINTS_PER_LINE: u32 = 100;

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and palette color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Magenta, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in canonical order (I, O, T, S, Z, J, L).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`] (0..7)
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Kind at a canonical index, or `None` when `index >= 7`
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Palette color locked cells of this kind are painted with
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::Cyan,
            PieceKind::O => Color::Yellow,
            PieceKind::T => Color::Magenta,
            PieceKind::S => Color::Green,
            PieceKind::Z => Color::Red,
            PieceKind::J => Color::Blue,
            PieceKind::L => Color::Orange,
        }
    }
}

/// The fixed 7-entry color palette
///
/// The engine treats colors as opaque tags; mapping them to terminal or pixel
/// colors is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Magenta,
    Green,
    Red,
    Blue,
    Orange,
}

impl Color {
    /// Wire code used by snapshots and the JSON adapter (1..=7, 0 is reserved for empty)
    pub fn code(&self) -> u8 {
        match self {
            Color::Cyan => 1,
            Color::Yellow => 2,
            Color::Magenta => 3,
            Color::Green => 4,
            Color::Red => 5,
            Color::Blue => 6,
            Color::Orange => 7,
        }
    }

    /// Inverse of [`Color::code`]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Color::Cyan),
            2 => Some(Color::Yellow),
            3 => Some(Color::Magenta),
            4 => Some(Color::Green),
            5 => Some(Color::Red),
            6 => Some(Color::Blue),
            7 => Some(Color::Orange),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Cyan => "cyan",
            Color::Yellow => "yellow",
            Color::Magenta => "magenta",
            Color::Green => "green",
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Orange => "orange",
        }
    }
}

/// Game actions that can be applied to the engine
///
/// These actions are produced by both keyboard input and the headless adapter.
/// Each maps 1:1 onto an engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise (no wall kicks)
    Rotate,
    /// Drop piece to the lowest valid row and lock it
    HardDrop,
    /// Start a fresh game (valid at any time)
    Restart,
}

impl GameAction {
    /// Parse action from string (for the JSON protocol)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" | "rotatecw" => Some(GameAction::Rotate),
            "harddrop" => Some(GameAction::HardDrop),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string for the JSON protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }
}

/// Engine lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Running,
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Running => "running",
            Phase::GameOver => "game_over",
        }
    }
}

/// A cell on the game grid
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell filled with a palette color
pub type Cell = Option<Color>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_index_roundtrip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(PieceKind::from_index(i), Some(*kind));
        }
        assert_eq!(PieceKind::from_index(7), None);
    }

    #[test]
    fn every_kind_has_a_distinct_color() {
        let mut codes: Vec<u8> = PieceKind::ALL.iter().map(|k| k.color().code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn color_code_zero_is_not_a_color() {
        assert_eq!(Color::from_code(0), None);
        assert_eq!(Color::from_code(8), None);
        assert_eq!(Color::from_code(Color::Orange.code()), Some(Color::Orange));
    }

    #[test]
    fn palette_names_match_kinds() {
        let names: Vec<&str> = PieceKind::ALL.iter().map(|k| k.color().as_str()).collect();
        assert_eq!(
            names,
            vec!["cyan", "yellow", "magenta", "green", "red", "blue", "orange"]
        );
    }

    #[test]
    fn action_names_parse_back() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::Rotate,
            GameAction::HardDrop,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn gravity_interval_is_half_a_second() {
        assert_eq!(FALL_INTERVAL_SECS, 0.5);
        assert_eq!(POINTS_PER_LINE, 100);
    }
}
