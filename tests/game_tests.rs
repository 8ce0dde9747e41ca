//! Engine integration tests - full gameplay flows driven through the
//! command interface with a scripted piece source

use block_drop::core::{GameState, SequenceSource, ShapeKind};
use block_drop::types::{BlockColor, GameAction, GameEvent, DROP_INTERVAL_MS};

fn squares_only() -> GameState {
    GameState::with_source(Box::new(SequenceSource::new(&[(
        ShapeKind::Square,
        BlockColor::Red,
    )])))
}

fn bars_only() -> GameState {
    GameState::with_source(Box::new(SequenceSource::new(&[(
        ShapeKind::Bar,
        BlockColor::Blue,
    )])))
}

/// Soft-drop the active piece until it lands (or the game ends), returning
/// every event emitted along the way.
fn drop_current(state: &mut GameState) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    for _ in 0..32 {
        state.apply_action(GameAction::MoveDown);
        let events = state.take_events();
        let done = events
            .iter()
            .any(|e| matches!(e, GameEvent::PieceLanded | GameEvent::GameOver(_)));
        seen.extend(events);
        if done {
            return seen;
        }
    }
    panic!("piece never landed");
}

#[test]
fn test_square_lands_centered() {
    let mut state = squares_only();

    let events = drop_current(&mut state);
    assert!(events.contains(&GameEvent::PieceLanded));

    // Left edge at column 3 (centered on the 8-wide board), resting on the
    // floor rows 10..=11
    assert!(state.board().is_occupied(3, 10));
    assert!(state.board().is_occupied(4, 10));
    assert!(state.board().is_occupied(3, 11));
    assert!(state.board().is_occupied(4, 11));
    assert!(!state.board().is_occupied(2, 11));
    assert!(!state.board().is_occupied(5, 11));
}

#[test]
fn test_unmoved_squares_stack_to_overflow() {
    let mut state = squares_only();

    // 12 rows / 2 rows per square: five land without ending the game
    for i in 0..5 {
        let events = drop_current(&mut state);
        assert!(
            events.contains(&GameEvent::PieceLanded),
            "drop {} did not land",
            i
        );
        assert!(!state.game_over());
    }

    // The sixth square fills rows 0..=1: overflow
    let events = drop_current(&mut state);
    assert!(events.contains(&GameEvent::PieceLanded));
    assert!(events.contains(&GameEvent::GameOver(0)));
    assert!(state.game_over());
    assert!(state.active().is_none());

    // Every merged cell is accounted for: 6 squares in columns 3..=4, no
    // duplicates, no losses
    let settled = state.board().cells().iter().filter(|c| c.is_some()).count();
    assert_eq!(settled, 24);
    for y in 0..12 {
        assert!(state.board().is_occupied(3, y));
        assert!(state.board().is_occupied(4, y));
    }
}

#[test]
fn test_four_squares_clear_two_lines() {
    let mut state = squares_only();

    // Four squares side by side cover all 8 columns of rows 10..=11
    let shifts: [(GameAction, usize); 4] = [
        (GameAction::MoveLeft, 3),
        (GameAction::MoveLeft, 1),
        (GameAction::MoveRight, 1),
        (GameAction::MoveRight, 3),
    ];

    for (i, (action, count)) in shifts.iter().enumerate() {
        for _ in 0..*count {
            assert!(state.apply_action(*action));
        }
        let events = drop_current(&mut state);
        if i < 3 {
            assert!(!events.iter().any(|e| matches!(e, GameEvent::LinesCleared(_))));
        } else {
            assert!(events.contains(&GameEvent::LinesCleared(2)));
        }
    }

    // Double clear: linear bonus, board swept clean
    assert_eq!(state.score(), 200);
    assert!(!state.game_over());
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_eight_bars_clear_four_lines() {
    let mut state = bars_only();

    // One bar per column
    for column in 0..8i32 {
        let delta = column - 3;
        let (action, count) = if delta < 0 {
            (GameAction::MoveLeft, (-delta) as usize)
        } else {
            (GameAction::MoveRight, delta as usize)
        };
        for _ in 0..count {
            assert!(state.apply_action(action));
        }
        drop_current(&mut state);
    }

    assert_eq!(state.score(), 400);
    assert!(!state.game_over());
    assert!(state.board().cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_wall_blocks_horizontal_moves() {
    let mut state = squares_only();

    // Square is 2 wide: rightmost legal anchor is column 6
    let mut moved = 0;
    for _ in 0..10 {
        if state.apply_action(GameAction::MoveRight) {
            moved += 1;
        }
    }
    assert_eq!(moved, 3);
    assert_eq!(state.active().unwrap().x, 6);

    // Blocked moves changed nothing and raised no error
    assert!(!state.apply_action(GameAction::MoveRight));
    assert_eq!(state.active().unwrap().x, 6);
}

#[test]
fn test_tick_drives_gravity() {
    let mut state = squares_only();
    let y0 = state.active().unwrap().y;

    assert!(!state.tick(DROP_INTERVAL_MS / 2));
    assert_eq!(state.active().unwrap().y, y0);

    assert!(state.tick(DROP_INTERVAL_MS / 2));
    assert_eq!(state.active().unwrap().y, y0 + 1);
}

#[test]
fn test_tick_lands_and_respawns() {
    let mut state = squares_only();

    // Enough gravity steps to land the first square and bring in the second
    state.tick(DROP_INTERVAL_MS * 13);

    let events = state.take_events();
    assert!(events.contains(&GameEvent::PieceLanded));
    assert!(state.active().is_some());
    assert_eq!(state.active().unwrap().y, -2);
}

#[test]
fn test_restart_after_game_over() {
    let mut state = squares_only();

    for _ in 0..6 {
        drop_current(&mut state);
    }
    assert!(state.game_over());

    assert!(state.apply_action(GameAction::Restart));

    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert!(state.board().cells().iter().all(|c| c.is_none()));
    let piece = state.active().unwrap();
    assert!(piece.fits(state.board()));
}

#[test]
fn test_commands_ignored_while_game_over() {
    let mut state = squares_only();

    for _ in 0..6 {
        drop_current(&mut state);
    }
    assert!(state.game_over());
    state.take_events();

    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::MoveDown));
    assert!(!state.apply_action(GameAction::Tick));
    assert!(!state.tick(DROP_INTERVAL_MS * 4));
    assert!(state.take_events().is_empty());

    // State queries still answer so the host can show the final board
    assert_eq!(
        state.board().cells().iter().filter(|c| c.is_some()).count(),
        24
    );
}

#[test]
fn test_snapshot_round_trip() {
    let mut state = squares_only();
    drop_current(&mut state);

    let snap = state.snapshot();
    assert_eq!(snap.board[11][3], BlockColor::Red.index());
    assert_eq!(snap.board[0][0], 0);
    assert_eq!(snap.score, state.score());
    assert_eq!(snap.game_over, state.game_over());
    assert_eq!(snap.active.unwrap().shape, ShapeKind::Square);
}
