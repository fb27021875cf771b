//! End-to-end assembly flows: input controller feeding the session the way
//! the browser layer does, with a geometric slot resolver standing in for
//! the canvas.

use jigsaw_core::{
    GameRules, InputController, Piece, PieceVariant, Session, SessionStatus, SlotResolver,
    TouchRelease,
};

/// A 2x2 board of 100px cells at the canvas origin.
struct TwoByTwo;

impl SlotResolver for TwoByTwo {
    fn resolve_slot_at(&self, x: f64, y: f64) -> Option<usize> {
        if !(0.0..200.0).contains(&x) || !(0.0..200.0).contains(&y) {
            return None;
        }
        let col = (x / 100.0) as usize;
        let row = (y / 100.0) as usize;
        Some(row * 2 + col)
    }
}

const RESOLVER: TwoByTwo = TwoByTwo;

fn center_of(slot: usize) -> (f64, f64) {
    let row = slot / 2;
    let col = slot % 2;
    (col as f64 * 100.0 + 50.0, row as f64 * 100.0 + 50.0)
}

#[test]
fn touch_driven_solve_of_a_two_by_two() {
    let mut session = Session::new(GameRules::default());
    session.start(Piece::grid(4, PieceVariant::Simple));
    let mut input = InputController::new();
    let radius = session.rules().probe_radius;

    for piece in 0..4 {
        input.touch_start(piece, (5.0, 5.0), (300.0, 300.0));
        let (x, y) = center_of(piece);
        input.touch_move((x, y), &RESOLVER);
        assert_eq!(input.hover_slot(), Some(piece));
        match input.touch_end(&RESOLVER, radius) {
            TouchRelease::Hit { piece: p, slot } => {
                assert_eq!((p, slot), (piece, piece));
                let outcome = session.drop_piece(p, slot);
                assert!(outcome.correct);
            }
            other => panic!("expected a hit, got {other:?}"),
        }
    }
    assert_eq!(session.status(), SessionStatus::Completed);
    assert_eq!(session.board().solved_count(), 4);
}

#[test]
fn sloppy_release_near_a_cell_edge_still_lands() {
    let mut session = Session::new(GameRules::default());
    session.start(Piece::grid(4, PieceVariant::Simple));
    let mut input = InputController::new();
    let radius = session.rules().probe_radius;

    // Finger lifts a few pixels past the right edge of the board; the left
    // probe pulls the drop back into slot 1.
    input.touch_start(1, (0.0, 0.0), (0.0, 0.0));
    input.touch_move((204.0, 50.0), &RESOLVER);
    assert_eq!(
        input.touch_end(&RESOLVER, radius),
        TouchRelease::Hit { piece: 1, slot: 1 }
    );
}

#[test]
fn release_far_outside_the_board_changes_nothing() {
    let mut session = Session::new(GameRules::default());
    session.start(Piece::grid(4, PieceVariant::Simple));
    let mut input = InputController::new();
    let radius = session.rules().probe_radius;

    let before: Vec<_> = (0..4).map(|i| session.board().slot(i)).collect();
    // 15px outside the board with a 10px probe radius: every probe misses.
    input.touch_start(2, (0.0, 0.0), (0.0, 0.0));
    input.touch_move((215.0, 215.0), &RESOLVER);
    assert_eq!(
        input.touch_end(&RESOLVER, radius),
        TouchRelease::Miss { piece: 2 }
    );
    session.note_touch_miss(2);

    let after: Vec<_> = (0..4).map(|i| session.board().slot(i)).collect();
    assert_eq!(before, after);
    assert!(session.board().unplaced().count() == 4);
    assert!(session.take_events().is_empty());
    assert_eq!(session.status(), SessionStatus::Playing);
}

#[test]
fn pointer_and_touch_share_the_placement_path() {
    let mut session = Session::new(GameRules::default());
    session.start(Piece::grid(4, PieceVariant::Custom));
    let mut input = InputController::new();

    // Pointer drops piece 0 on the wrong slot...
    input.pointer_down(0);
    let (piece, slot) = input.pointer_drop(Some(3)).unwrap();
    assert!(!session.drop_piece(piece, slot).correct);

    // ...then a touch drop of piece 3 onto that slot evicts it.
    input.touch_start(3, (0.0, 0.0), (0.0, 0.0));
    input.touch_move(center_of(3), &RESOLVER);
    if let TouchRelease::Hit { piece, slot } = input.touch_end(&RESOLVER, 10.0) {
        let outcome = session.drop_piece(piece, slot);
        assert!(outcome.correct);
    } else {
        panic!("expected a hit");
    }
    let evicted = session.board().piece(0);
    assert!(!evicted.placed);
    assert_eq!(evicted.current, None);
}
