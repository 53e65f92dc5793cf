//! Terminal input module (engine-facing).
//!
//! Independent of any UI framework: maps `crossterm` key events onto
//! [`crate::types::GameAction`]. Every key press yields at most one action; there is no
//! auto-repeat handling here, the terminal's own key repeat is passed through.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
