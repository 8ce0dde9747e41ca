//! Game state module - the block-drop engine
//!
//! Ties together board, pieces, and the piece source. It owns the playfield,
//! the falling piece, the score, and the game-over flag, and advances on
//! gravity ticks plus host move commands. Rendering, audio, and input
//! translation live with the host; the engine answers state queries and
//! buffers feedback events.

use crate::core::pieces::{spawn_x, spawn_y, ShapeKind};
use crate::core::rng::{PieceSource, UniformSource};
use crate::core::Board;
use crate::types::{
    BlockColor, GameAction, GameEvent, BOARD_HEIGHT, BOARD_WIDTH, DROP_INTERVAL_MS,
    LINE_CLEAR_SCORE,
};

/// The currently falling, player-controllable piece.
///
/// The anchor (x, y) is the top-left of the shape's bounding box. The anchor
/// row may be negative while the piece is still above the visible board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FallingPiece {
    pub shape: ShapeKind,
    pub color: BlockColor,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    /// Create a piece at its spawn position: horizontally centered, fully
    /// above the visible board
    pub fn spawn(shape: ShapeKind, color: BlockColor) -> Self {
        Self {
            shape,
            color,
            x: spawn_x(shape),
            y: spawn_y(shape),
        }
    }

    /// Candidate piece shifted by (dx, dy); validated before it replaces the
    /// current piece
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Absolute occupied cells
    pub fn cells(&self) -> [(i8, i8); 4] {
        let mut cells = self.shape.offsets();
        for (dx, dy) in &mut cells {
            *dx += self.x;
            *dy += self.y;
        }
        cells
    }

    /// Placement rule: rejects cells outside the side walls, below the
    /// floor, or colliding with a settled block. Cells above the visible
    /// board (y < 0) are never bounds- or collision-checked, which lets
    /// pieces exist partially off-top.
    pub fn fits(&self, board: &Board) -> bool {
        self.cells().iter().all(|&(x, y)| {
            if x < 0 || x >= BOARD_WIDTH as i8 {
                return false;
            }
            if y >= BOARD_HEIGHT as i8 {
                return false;
            }
            y < 0 || !board.is_occupied(x, y)
        })
    }
}

/// Complete engine state.
///
/// Running -> GameOver on spawn failure or top-row overflow; GameOver ->
/// Running only through `reset`. While game-over, every mutating command is
/// a documented no-op except `GameAction::Restart`, and state queries keep
/// answering so the host can display the final board.
pub struct GameState {
    board: Board,
    active: Option<FallingPiece>,
    source: Box<dyn PieceSource>,
    score: u32,
    game_over: bool,
    drop_timer_ms: u32,
    drop_interval_ms: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a running game with the default uniform random piece source
    pub fn new(seed: u32) -> Self {
        Self::with_source(Box::new(UniformSource::new(seed)))
    }

    /// Create a running game with an injected piece source (scripted tests,
    /// replays)
    pub fn with_source(source: Box<dyn PieceSource>) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            source,
            score: 0,
            game_over: false,
            drop_timer_ms: 0,
            drop_interval_ms: DROP_INTERVAL_MS,
            events: Vec::new(),
        };
        state.spawn_piece();
        state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<FallingPiece> {
        self.active
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Drain the buffered feedback events.
    ///
    /// Hosts call this after each command or tick and forward the events to
    /// their audio/visual layer.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear the grid, zero the score, leave game-over, and spawn the first
    /// piece of the next round. Pending events from the previous round are
    /// discarded.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.game_over = false;
        self.drop_timer_ms = 0;
        self.events.clear();
        self.spawn_piece();
    }

    /// Draw a piece from the source and place it at its spawn position.
    /// An immediately invalid spawn is the primary loss condition.
    fn spawn_piece(&mut self) -> bool {
        let (shape, color) = self.source.next_piece();
        let piece = FallingPiece::spawn(shape, color);

        if !piece.fits(&self.board) {
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        true
    }

    fn enter_game_over(&mut self) {
        if self.game_over {
            return;
        }
        self.game_over = true;
        self.active = None;
        self.events.push(GameEvent::GameOver(self.score));
    }

    /// Try a horizontal move. Failure (wall or settled block) is a silent
    /// no-op.
    fn try_shift(&mut self, dx: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(dx, 0);
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            self.events.push(GameEvent::PieceMoved);
            return true;
        }

        false
    }

    /// One gravity step: move the piece down one row, or land it when the
    /// move is blocked. A blocked down move is the expected landing signal,
    /// not an error.
    fn step_down(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let candidate = active.shifted(0, 1);
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            self.events.push(GameEvent::PieceMoved);
            return true;
        }

        self.land();
        true
    }

    /// Merge the piece into the grid, run line clears, and spawn the next
    /// piece. A piece whose anchor never entered the visible board is
    /// discarded without merging.
    fn land(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        if piece.y >= 0 {
            self.board
                .merge_cells(&piece.shape.offsets(), piece.x, piece.y, piece.color);
            self.events.push(GameEvent::PieceLanded);
            self.check_lines();
        }

        if !self.game_over {
            self.spawn_piece();
        }
    }

    /// Remove full rows, award the line-clear bonus, and check overflow.
    /// The overflow check runs whether or not rows were cleared this step.
    fn check_lines(&mut self) {
        let cleared = self.board.clear_full_rows();
        let lines = cleared.len() as u32;

        if lines > 0 {
            self.score += LINE_CLEAR_SCORE * lines;
            self.events.push(GameEvent::LinesCleared(lines));
        }

        if self.board.top_row_occupied() {
            self.enter_game_over();
        }
    }

    /// Advance game time. Accumulates elapsed time and issues one gravity
    /// step per drop interval. Returns true when the state changed.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }

        self.drop_timer_ms += elapsed_ms;
        let mut changed = false;
        while self.drop_timer_ms >= self.drop_interval_ms {
            self.drop_timer_ms -= self.drop_interval_ms;
            changed |= self.step_down();
            if self.game_over {
                break;
            }
        }
        changed
    }

    /// Apply a host command. Returns true when the state changed.
    ///
    /// While game-over, every action except `Restart` is a no-op.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        if self.game_over && action != GameAction::Restart {
            return false;
        }

        match action {
            GameAction::MoveLeft => self.try_shift(-1),
            GameAction::MoveRight => self.try_shift(1),
            GameAction::MoveDown | GameAction::Tick => self.step_down(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    pub fn snapshot_into(&self, out: &mut crate::core::snapshot::GameSnapshot) {
        use crate::core::snapshot::ActiveSnapshot;

        self.board.write_u8_grid(&mut out.board);
        out.active = self.active.map(ActiveSnapshot::from);
        out.score = self.score;
        out.game_over = self.game_over;
        out.drop_timer_ms = self.drop_timer_ms;
    }

    pub fn snapshot(&self) -> crate::core::snapshot::GameSnapshot {
        let mut s = crate::core::snapshot::GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
