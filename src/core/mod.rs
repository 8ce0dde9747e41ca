//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, audio, or I/O.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod snapshot;

// Re-export commonly used types
pub use board::Board;
pub use game_state::{FallingPiece, GameState};
pub use pieces::ShapeKind;
pub use rng::{PieceSource, SequenceSource, SimpleRng, UniformSource};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
