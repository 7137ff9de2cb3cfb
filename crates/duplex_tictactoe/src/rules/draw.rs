//! Draw detection logic for tic-tac-toe.

use super::win::winning_lines;
use crate::board::Board;
use crate::types::ParticipantId;
use tracing::instrument;

/// A draw is a full board on which the last mover completed no line.
#[instrument(skip(board))]
pub fn is_draw(board: &Board, last_mover: ParticipantId) -> bool {
    board.is_full() && winning_lines(board, last_mover).is_empty()
}
