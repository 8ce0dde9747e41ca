//! Terminal block-drop runner (default binary).
//!
//! Demo host for the engine: crossterm key input, a fixed gravity timer, and
//! a simple full-redraw renderer working from `GameSnapshot`. Engine events
//! are surfaced on a status line where a real host would trigger sounds or
//! flash effects.

use std::io::{self, Write};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use block_drop::core::{GameSnapshot, GameState};
use block_drop::types::{GameAction, GameEvent, BOARD_HEIGHT, BOARD_WIDTH, TICK_MS};

fn main() -> Result<()> {
    let mut stdout = io::stdout();
    enter(&mut stdout)?;

    let result = run(&mut stdout);

    // Always try to restore terminal state.
    let _ = exit(&mut stdout);
    result
}

fn enter(stdout: &mut io::Stdout) -> Result<()> {
    terminal::enable_raw_mode()?;
    stdout.queue(terminal::EnterAlternateScreen)?;
    stdout.queue(cursor::Hide)?;
    stdout.flush()?;
    Ok(())
}

fn exit(stdout: &mut io::Stdout) -> Result<()> {
    stdout.queue(ResetColor)?;
    stdout.queue(cursor::Show)?;
    stdout.queue(terminal::LeaveAlternateScreen)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

fn run(stdout: &mut io::Stdout) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(1);

    let mut state = GameState::new(seed);
    let mut snapshot = GameSnapshot::default();
    let mut status = String::from("arrows/a-s-d move, r restart, q quit");

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        state.snapshot_into(&mut snapshot);
        draw(stdout, &snapshot, &status)?;

        // Input with timeout until next frame tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match map_key(key.code) {
                        KeyCommand::Action(action) => {
                            state.apply_action(action);
                        }
                        KeyCommand::Quit => return Ok(()),
                        KeyCommand::None => {}
                    }
                }
            }
        }

        // Frame tick: advance the gravity timer.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            state.tick(TICK_MS);
        }

        for ev in state.take_events() {
            if let Some(line) = feedback_line(ev) {
                status = line;
            }
        }
    }
}

enum KeyCommand {
    Action(GameAction),
    Quit,
    None,
}

fn map_key(code: KeyCode) -> KeyCommand {
    match code {
        KeyCode::Left | KeyCode::Char('a') => KeyCommand::Action(GameAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') => KeyCommand::Action(GameAction::MoveRight),
        KeyCode::Down | KeyCode::Char('s') => KeyCommand::Action(GameAction::MoveDown),
        KeyCode::Char('r') => KeyCommand::Action(GameAction::Restart),
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        _ => KeyCommand::None,
    }
}

/// Where a real host would play a sound or flash the board.
fn feedback_line(ev: GameEvent) -> Option<String> {
    match ev {
        GameEvent::PieceMoved => None,
        GameEvent::PieceLanded => Some(String::from("piece landed")),
        GameEvent::LinesCleared(n) => Some(format!("cleared {} line(s)!", n)),
        GameEvent::GameOver(score) => Some(format!("GAME OVER - score {} (r to restart)", score)),
    }
}

fn cell_color(index: u8) -> Color {
    match index {
        1 => Color::Red,
        2 => Color::Blue,
        3 => Color::Green,
        4 => Color::Yellow,
        5 => Color::Magenta,
        6 => Color::DarkYellow,
        _ => Color::DarkGrey,
    }
}

fn draw(stdout: &mut io::Stdout, snapshot: &GameSnapshot, status: &str) -> Result<()> {
    let width = BOARD_WIDTH as usize;
    let height = BOARD_HEIGHT as usize;

    // Overlay the falling piece onto a copy of the settled grid.
    let mut grid = snapshot.board;
    if let Some(active) = snapshot.active {
        for (dx, dy) in active.shape.offsets() {
            let x = (active.x + dx) as isize;
            let y = (active.y + dy) as isize;
            if y >= 0 && (y as usize) < height && x >= 0 && (x as usize) < width {
                grid[y as usize][x as usize] = active.color.index();
            }
        }
    }

    stdout.queue(terminal::Clear(terminal::ClearType::All))?;
    stdout.queue(cursor::MoveTo(0, 0))?;
    stdout.queue(ResetColor)?;
    stdout.queue(Print(format!("score: {}", snapshot.score)))?;

    for (y, row) in grid.iter().enumerate() {
        stdout.queue(cursor::MoveTo(0, (y + 1) as u16))?;
        stdout.queue(ResetColor)?;
        stdout.queue(Print("|"))?;
        for &idx in row {
            stdout.queue(SetForegroundColor(cell_color(idx)))?;
            stdout.queue(Print(if idx == 0 { " ." } else { "[]" }))?;
        }
        stdout.queue(ResetColor)?;
        stdout.queue(Print("|"))?;
    }

    stdout.queue(cursor::MoveTo(0, (height + 1) as u16))?;
    stdout.queue(Print(format!("+{}+", "-".repeat(width * 2))))?;
    stdout.queue(cursor::MoveTo(0, (height + 2) as u16))?;
    stdout.queue(Print(status))?;
    stdout.flush()?;
    Ok(())
}
