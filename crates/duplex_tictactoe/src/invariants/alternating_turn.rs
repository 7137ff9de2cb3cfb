//! Alternating turn invariant: participants take strict turns.

use super::Invariant;
use crate::turn::TurnCoordinator;

/// Consecutive moves come from different participants and the turn
/// holder is never the last mover.
pub struct AlternatingTurnInvariant;

impl Invariant<TurnCoordinator> for AlternatingTurnInvariant {
    fn holds(turns: &TurnCoordinator) -> bool {
        let history = turns.history();
        let alternates = history
            .windows(2)
            .all(|pair| pair[0].player() != pair[1].player());
        let holder_is_next = history
            .last()
            .is_none_or(|last| last.player() != turns.turn_holder());
        alternates && holder_is_next
    }

    fn description() -> &'static str {
        "Participants alternate turns"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::board::Board;
    use crate::types::{CellIndex, ParticipantId};

    #[test]
    fn back_to_back_moves_fail() {
        let a = CellIndex::new(1).unwrap();
        let b = CellIndex::new(2).unwrap();
        let mut board = Board::new();
        board.set(a, ParticipantId::First).unwrap();
        board.set(b, ParticipantId::First).unwrap();
        let history = vec![
            Move::new(ParticipantId::First, a),
            Move::new(ParticipantId::First, b),
        ];
        let turns = TurnCoordinator::from_parts(board, ParticipantId::Second, history);
        assert!(!AlternatingTurnInvariant::holds(&turns));
    }

    #[test]
    fn last_mover_holding_turn_fails() {
        let a = CellIndex::new(1).unwrap();
        let mut board = Board::new();
        board.set(a, ParticipantId::First).unwrap();
        let history = vec![Move::new(ParticipantId::First, a)];
        let turns = TurnCoordinator::from_parts(board, ParticipantId::First, history);
        assert!(!AlternatingTurnInvariant::holds(&turns));
    }
}
