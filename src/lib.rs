//! Block-drop puzzle engine.
//!
//! A deterministic falling-block engine for an 8x12 playfield with a
//! two-shape, no-rotation piece set. The engine owns grid, piece, score, and
//! game-over state; it accepts move/tick commands, answers state queries,
//! and emits feedback events for the host's rendering and audio layers.

pub mod core;
pub mod types;
