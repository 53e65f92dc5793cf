//! RNG module - piece sources
//!
//! The engine draws pieces through the [`PieceSource`] trait so callers decide where
//! randomness comes from:
//!
//! - [`RandomSource`]: independent uniform draws over the 7 kinds. There is no bag, so
//!   short runs of the same kind are expected.
//! - [`SequenceSource`]: replays a fixed list of kinds, for tests and scripted games.
//!
//! [`SimpleRng`] is a small LCG so a seed reproduces the same game on every platform.

use std::fmt;

use crate::pieces::Piece;
use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits: the low bits of a power-of-two LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Supplier of the next piece kind
pub trait PieceSource: fmt::Debug {
    /// Draw the kind of the next piece
    fn next_kind(&mut self) -> PieceKind;

    /// Draw the next piece, at its spawn position
    fn next_piece(&mut self) -> Piece {
        Piece::spawn(self.next_kind())
    }
}

/// Uniform, independent draws (no 7-bag)
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: SimpleRng,
    seed: u32,
}

impl RandomSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for RandomSource {
    fn next_kind(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Cycles through a fixed list of kinds
#[derive(Debug, Clone)]
pub struct SequenceSource {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl SequenceSource {
    /// Create a source that repeats `kinds` forever.
    ///
    /// An empty list falls back to a stream of I pieces.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let mut kinds = kinds.into();
        if kinds.is_empty() {
            kinds.push(PieceKind::I);
        }
        Self { kinds, pos: 0 }
    }

    /// Source that only ever yields `kind`
    pub fn repeat(kind: PieceKind) -> Self {
        Self::new(vec![kind])
    }
}

impl PieceSource for SequenceSource {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos];
        self.pos = (self.pos + 1) % self.kinds.len();
        kind
    }
}
