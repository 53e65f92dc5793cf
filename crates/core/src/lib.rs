//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules of the falling-block puzzle and nothing else. It has
//! **no dependencies** on UI, input devices, or I/O, making it:
//!
//! - **Deterministic**: a seeded or scripted [`PieceSource`] reproduces a game exactly
//! - **Testable**: every rule is reachable through the public command API
//! - **Portable**: the same engine drives the terminal front-end and the headless adapter
//!
//! # Module Structure
//!
//! - [`grid`]: 10x20 playfield with merging and atomic line clearing
//! - [`pieces`]: tetromino shape matrices and the clockwise rotation transform
//! - [`placement`]: bounds and collision checks for candidate placements
//! - [`rng`]: piece sources (uniform random, scripted sequence)
//! - [`engine`]: the [`GameEngine`] command and gravity state machine
//! - [`snapshot`]: plain-data view of the engine for renderers
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: each kind is drawn independently; no bag
//! - **Naive rotation**: 90° clockwise around a fixed anchor, no wall kicks
//! - **Flat scoring**: 100 points per cleared row
//! - **Constant gravity**: one row every 0.5 seconds
//! - **Game over**: when a freshly promoted piece does not fit at its spawn position
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameEngine;
//! use blockfall_types::{GameAction, Phase};
//!
//! let mut game = GameEngine::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // One piece locked, nothing cleared yet.
//! assert_eq!(game.grid().occupied_count(), 4);
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.phase(), Phase::Running);
//! ```
//!
//! # Timing
//!
//! Call [`GameEngine::advance`] once per frame with the elapsed seconds. Gravity
//! accumulates elapsed time and moves the piece one row per 0.5 seconds.

pub mod engine;
pub mod grid;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use engine::GameEngine;
pub use grid::{ClearedRows, Grid};
pub use pieces::{Piece, Shape};
pub use placement::{fits, is_valid};
pub use rng::{PieceSource, RandomSource, SequenceSource, SimpleRng};
pub use snapshot::{GameSnapshot, PieceSnapshot};
