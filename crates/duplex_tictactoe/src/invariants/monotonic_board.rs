//! Monotonic board invariant: cells never change once set.

use super::Invariant;
use crate::board::Board;
use crate::turn::TurnCoordinator;

/// Replaying the history onto an empty board reproduces the board,
/// with no move landing on an occupied cell.
pub struct MonotonicBoardInvariant;

impl Invariant<TurnCoordinator> for MonotonicBoardInvariant {
    fn holds(turns: &TurnCoordinator) -> bool {
        let mut reconstructed = Board::new();
        for mv in turns.history() {
            if reconstructed.set(mv.cell(), mv.player()).is_err() {
                return false;
            }
        }
        reconstructed == *turns.board()
    }

    fn description() -> &'static str {
        "Board cells are monotonic (never overwritten)"
    }
}
