//! Turn coordination: who may move next and what a move did.

use crate::action::{Move, MoveError};
use crate::board::Board;
use crate::invariants::{InvariantSet, TurnInvariants};
use crate::rules::{self, Outcome};
use crate::types::ParticipantId;
use tracing::{debug, info, instrument, warn};

/// Result of an accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// The move that was applied.
    pub applied: Move,
    /// Who holds the turn now.
    pub turn_holder: ParticipantId,
    /// Set when this move ended the game.
    pub outcome: Option<Outcome>,
}

/// Serializes moves for one game.
///
/// Owns the board and history. Once an outcome is recorded every
/// further submission fails with [`MoveError::GameAlreadyFinished`],
/// so a terminal outcome is reported exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnCoordinator {
    board: Board,
    turn_holder: ParticipantId,
    history: Vec<Move>,
    outcome: Option<Outcome>,
}

impl TurnCoordinator {
    /// Starts a game in which `opener` moves first.
    #[instrument]
    pub fn new(opener: ParticipantId) -> Self {
        Self {
            board: Board::new(),
            turn_holder: opener,
            history: Vec::new(),
            outcome: None,
        }
    }

    /// Builds a coordinator from raw parts, bypassing validation.
    #[cfg(test)]
    pub(crate) fn from_parts(board: Board, turn_holder: ParticipantId, history: Vec<Move>) -> Self {
        Self {
            board,
            turn_holder,
            history,
            outcome: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Participant permitted to move next.
    pub fn turn_holder(&self) -> ParticipantId {
        self.turn_holder
    }

    /// Accepted moves, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Terminal outcome, once reached.
    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// True once a win or draw has been recorded.
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// Validates and applies a move from `sender`.
    ///
    /// On error the coordinator is unchanged.
    #[instrument(skip(self), fields(turn_holder = %self.turn_holder))]
    pub fn submit_move(&mut self, sender: ParticipantId, mv: Move) -> Result<TurnReport, MoveError> {
        if self.is_finished() {
            warn!("Move after game end");
            return Err(MoveError::GameAlreadyFinished);
        }
        if sender != self.turn_holder || mv.player() != sender {
            warn!(%sender, mover = %mv.player(), "Move out of turn");
            return Err(MoveError::NotYourTurn(sender));
        }

        self.board.set(mv.cell(), sender).inspect_err(|e| {
            warn!(error = %e, "Cell refused");
        })?;
        self.history.push(mv);
        self.turn_holder = sender.opponent();

        let outcome = rules::evaluate(&self.board, sender);
        if let Some(outcome) = &outcome {
            info!(%outcome, moves = self.history.len(), "Game finished");
            self.outcome = Some(outcome.clone());
        } else {
            debug!(next = %self.turn_holder, "Turn passes");
        }

        debug_assert!(
            TurnInvariants::check_all(self).is_ok(),
            "turn invariants violated: {:?}",
            TurnInvariants::check_all(self)
        );

        Ok(TurnReport {
            applied: mv,
            turn_holder: self.turn_holder,
            outcome,
        })
    }
}
