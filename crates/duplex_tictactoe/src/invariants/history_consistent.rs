//! History/board consistency: one history entry per occupied cell.

use super::Invariant;
use crate::turn::TurnCoordinator;

/// Occupied cell count equals history length.
pub struct HistoryConsistentInvariant;

impl Invariant<TurnCoordinator> for HistoryConsistentInvariant {
    fn holds(turns: &TurnCoordinator) -> bool {
        turns.board().occupied() == turns.history().len()
    }

    fn description() -> &'static str {
        "History length matches occupied cells"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Move;
    use crate::invariants::{InvariantSet, TurnInvariants};
    use crate::types::{CellIndex, ParticipantId};

    #[test]
    fn played_game_satisfies_every_invariant() {
        let mut turns = TurnCoordinator::new(ParticipantId::First);
        for (player, cell) in [
            (ParticipantId::First, 5),
            (ParticipantId::Second, 1),
            (ParticipantId::First, 9),
        ] {
            let mv = Move::new(player, CellIndex::new(cell).unwrap());
            turns.submit_move(player, mv).unwrap();
        }
        assert!(HistoryConsistentInvariant::holds(&turns));
        assert_eq!(TurnInvariants::check_all(&turns), Ok(()));
    }

    #[test]
    fn missing_history_is_reported() {
        let mut board = crate::board::Board::new();
        board
            .set(CellIndex::new(3).unwrap(), ParticipantId::Second)
            .unwrap();
        let turns = TurnCoordinator::from_parts(board, ParticipantId::First, Vec::new());
        let violations = TurnInvariants::check_all(&turns).unwrap_err();
        assert_eq!(violations.len(), 2);
        assert!(
            violations
                .iter()
                .any(|v| v.description == HistoryConsistentInvariant::description())
        );
    }
}
