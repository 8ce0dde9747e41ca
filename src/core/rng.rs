//! RNG module - seedable piece generation
//!
//! Shape and color are drawn uniformly at random from their fixed sets.
//! The random source is injected into the engine through the `PieceSource`
//! trait so tests and replays can script the exact sequence of pieces.

use crate::core::pieces::{ShapeKind, SHAPES};
use crate::types::{BlockColor, PALETTE};

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
        // Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Source of spawned pieces: shape and color for each spawn
pub trait PieceSource {
    fn next_piece(&mut self) -> (ShapeKind, BlockColor);
}

/// Uniform random source over the shape set and the color palette
#[derive(Debug, Clone)]
pub struct UniformSource {
    rng: SimpleRng,
}

impl UniformSource {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl PieceSource for UniformSource {
    fn next_piece(&mut self) -> (ShapeKind, BlockColor) {
        let shape = SHAPES[self.rng.next_range(SHAPES.len() as u32) as usize];
        let color = PALETTE[self.rng.next_range(PALETTE.len() as u32) as usize];
        (shape, color)
    }
}

/// Scripted source that replays a fixed piece sequence, cycling when
/// exhausted. Used by deterministic tests and replay tooling.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    pieces: Vec<(ShapeKind, BlockColor)>,
    next: usize,
}

impl SequenceSource {
    /// Panics if `pieces` is empty.
    pub fn new(pieces: &[(ShapeKind, BlockColor)]) -> Self {
        assert!(!pieces.is_empty(), "SequenceSource needs at least one piece");
        Self {
            pieces: pieces.to_vec(),
            next: 0,
        }
    }
}

impl PieceSource for SequenceSource {
    fn next_piece(&mut self) -> (ShapeKind, BlockColor) {
        let piece = self.pieces[self.next];
        self.next = (self.next + 1) % self.pieces.len();
        piece
    }
}
