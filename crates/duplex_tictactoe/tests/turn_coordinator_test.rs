//! Tests for turn coordination across whole games.

use duplex_tictactoe::{
    CellIndex, Move, MoveError, Outcome, ParticipantId, TurnCoordinator, WinLine,
};
use std::collections::BTreeSet;

fn play(turns: &mut TurnCoordinator, player: ParticipantId, cell: u8) -> Option<Outcome> {
    let mv = Move::new(player, CellIndex::new(cell).expect("valid cell"));
    turns.submit_move(player, mv).expect("legal move").outcome
}

#[test]
fn test_top_row_win() {
    let mut turns = TurnCoordinator::new(ParticipantId::First);

    assert_eq!(play(&mut turns, ParticipantId::First, 1), None);
    assert_eq!(play(&mut turns, ParticipantId::Second, 4), None);
    assert_eq!(play(&mut turns, ParticipantId::First, 2), None);
    assert_eq!(play(&mut turns, ParticipantId::Second, 5), None);
    let outcome = play(&mut turns, ParticipantId::First, 3);

    assert_eq!(
        outcome,
        Some(Outcome::Won {
            winner: ParticipantId::First,
            lines: BTreeSet::from([WinLine::Top]),
        })
    );
    assert!(turns.is_finished());
    assert_eq!(turns.history().len(), 5);
}

#[test]
fn test_double_line_win_reports_both() {
    // O holds 1, 2, 6, 9; the final move on 3 completes Top and Right.
    let mut turns = TurnCoordinator::new(ParticipantId::First);
    let script = [
        (ParticipantId::First, 1),
        (ParticipantId::Second, 4),
        (ParticipantId::First, 2),
        (ParticipantId::Second, 5),
        (ParticipantId::First, 6),
        (ParticipantId::Second, 7),
        (ParticipantId::First, 9),
        (ParticipantId::Second, 8),
    ];
    for (player, cell) in script {
        assert_eq!(play(&mut turns, player, cell), None, "cell {cell}");
    }

    let outcome = play(&mut turns, ParticipantId::First, 3).expect("game over");

    assert_eq!(
        outcome,
        Outcome::Won {
            winner: ParticipantId::First,
            lines: BTreeSet::from([WinLine::Top, WinLine::Right]),
        }
    );
}

#[test]
fn test_invalid_cell_never_reaches_board() {
    assert_eq!(CellIndex::new(0), Err(MoveError::InvalidCell(0)));
    assert_eq!(CellIndex::new(42), Err(MoveError::InvalidCell(42)));
}

#[test]
fn test_errors_leave_state_untouched() {
    let mut turns = TurnCoordinator::new(ParticipantId::Second);
    play(&mut turns, ParticipantId::Second, 5);
    let before = turns.clone();

    let taken = Move::new(ParticipantId::First, CellIndex::new(5).unwrap());
    assert!(matches!(
        turns.submit_move(ParticipantId::First, taken),
        Err(MoveError::CellOccupied(_))
    ));
    let early = Move::new(ParticipantId::Second, CellIndex::new(1).unwrap());
    assert!(matches!(
        turns.submit_move(ParticipantId::Second, early),
        Err(MoveError::NotYourTurn(ParticipantId::Second))
    ));

    assert_eq!(turns, before);
}
