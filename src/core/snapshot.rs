//! Pull-based render view of the engine state.
//!
//! Hosts keep one `GameSnapshot` and refresh it with
//! `GameState::snapshot_into` every frame; no allocation per refresh.

use crate::core::game_state::FallingPiece;
use crate::core::pieces::ShapeKind;
use crate::types::{BlockColor, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub shape: ShapeKind,
    pub color: BlockColor,
    pub x: i8,
    pub y: i8,
}

impl From<FallingPiece> for ActiveSnapshot {
    fn from(value: FallingPiece) -> Self {
        Self {
            shape: value.shape,
            color: value.color,
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Grid as 1-based color indices, 0 = empty
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub game_over: bool,
    pub drop_timer_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.score = 0;
        self.game_over = false;
        self.drop_timer_ms = 0;
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            score: 0,
            game_over: false,
            drop_timer_ms: 0,
        }
    }
}
