//! Terminal rendering for the falling-block game.
//!
//! Rendering goes through a plain framebuffer rather than a widget toolkit:
//! [`GameView`] paints a [`core::GameSnapshot`](blockfall_core::GameSnapshot)
//! into a [`FrameBuffer`], and [`TerminalRenderer`] flushes only the cells that
//! changed since the previous frame. Board cells are two columns wide to keep
//! them roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{palette, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
