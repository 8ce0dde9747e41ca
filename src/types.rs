//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

/// Board dimensions
pub const BOARD_WIDTH: u8 = 8;
pub const BOARD_HEIGHT: u8 = 12;

/// Host frame tick (milliseconds)
pub const TICK_MS: u32 = 16;

/// Gravity interval: one down step per second
pub const DROP_INTERVAL_MS: u32 = 1000;

/// Points awarded per cleared line
pub const LINE_CLEAR_SCORE: u32 = 100;

/// Colors a settled or falling block can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
}

/// Full palette, in the order used for uniform random selection
pub const PALETTE: [BlockColor; 6] = [
    BlockColor::Red,
    BlockColor::Blue,
    BlockColor::Green,
    BlockColor::Yellow,
    BlockColor::Purple,
    BlockColor::Orange,
];

impl BlockColor {
    /// Stable 1-based index for the u8 snapshot grid (0 means empty)
    pub fn index(&self) -> u8 {
        match self {
            BlockColor::Red => 1,
            BlockColor::Blue => 2,
            BlockColor::Green => 3,
            BlockColor::Yellow => 4,
            BlockColor::Purple => 5,
            BlockColor::Orange => 6,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlockColor::Red => "red",
            BlockColor::Blue => "blue",
            BlockColor::Green => "green",
            BlockColor::Yellow => "yellow",
            BlockColor::Purple => "purple",
            BlockColor::Orange => "orange",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with a block color)
pub type Cell = Option<BlockColor>;

/// Commands the host can issue to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    /// Manual soft drop: one down step
    MoveDown,
    /// Timer-driven gravity: one down step
    Tick,
    Restart,
}

/// Notifications for the host's audio/visual feedback layer.
///
/// Fire-and-forget: the engine buffers these and the host drains them
/// with `GameState::take_events` after each command or tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece moved one cell (left, right, or down)
    PieceMoved,
    /// The active piece merged into the grid
    PieceLanded,
    /// One or more rows were removed in a single step
    LinesCleared(u32),
    /// Terminal state reached; carries the final score
    GameOver(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_indices_unique() {
        let mut seen = [false; 7];
        for color in PALETTE {
            let idx = color.index() as usize;
            assert!((1..=6).contains(&idx));
            assert!(!seen[idx], "duplicate index for {:?}", color);
            seen[idx] = true;
        }
    }

    #[test]
    fn test_color_names() {
        assert_eq!(BlockColor::Red.as_str(), "red");
        assert_eq!(BlockColor::Orange.as_str(), "orange");
    }
}
