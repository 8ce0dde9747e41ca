//! Pieces module - the two-shape, no-rotation piece set
//!
//! Shapes are fixed cell-offset tables relative to the piece anchor (top-left
//! of the bounding box). This variant has no rotation system: shapes are used
//! exactly as generated.

use crate::types::BOARD_WIDTH;

/// Offset of a single cell relative to the piece anchor
pub type CellOffset = (i8, i8);

/// Shape of a piece - 4 cell offsets from the piece anchor
pub type PieceShape = [CellOffset; 4];

/// The available piece shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Vertical 4x1 bar
    Bar,
    /// 2x2 square
    Square,
}

/// All shapes, in the order used for uniform random selection
pub const SHAPES: [ShapeKind; 2] = [ShapeKind::Bar, ShapeKind::Square];

impl ShapeKind {
    /// Get the cell offsets for this shape
    pub fn offsets(&self) -> PieceShape {
        match self {
            ShapeKind::Bar => [(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::Square => [(0, 0), (1, 0), (0, 1), (1, 1)],
        }
    }

    /// Width of the bounding box, in columns
    pub fn width(&self) -> i8 {
        match self {
            ShapeKind::Bar => 1,
            ShapeKind::Square => 2,
        }
    }

    /// Height of the bounding box, in rows
    pub fn height(&self) -> i8 {
        match self {
            ShapeKind::Bar => 4,
            ShapeKind::Square => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Bar => "bar",
            ShapeKind::Square => "square",
        }
    }
}

/// Horizontally centered spawn column for a shape
pub fn spawn_x(shape: ShapeKind) -> i8 {
    (BOARD_WIDTH as i8 - shape.width()) / 2
}

/// Spawn row: the whole shape starts above the visible board, so that it
/// descends into view one row per gravity step
pub fn spawn_y(shape: ShapeKind) -> i8 {
    -shape.height()
}
