//! First-class move type and the errors a move can raise.
//!
//! Moves are domain events: validated before they touch the board and
//! kept in order in the game history once accepted.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::{CellIndex, ParticipantId};

/// A participant placing their mark in a cell. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    player: ParticipantId,
    cell: CellIndex,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: ParticipantId, cell: CellIndex) -> Self {
        Self { player, cell }
    }

    /// Returns the participant making this move.
    pub fn player(&self) -> ParticipantId {
        self.player
    }

    /// Returns the target cell.
    pub fn cell(&self) -> CellIndex {
        self.cell
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> cell {}", self.player, self.cell)
    }
}

/// Error raised when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The sender does not hold the turn.
    #[display("It is not {}'s turn", _0)]
    NotYourTurn(#[error(not(source))] ParticipantId),

    /// The cell already has an owner.
    #[display("Cell {} is already occupied", _0)]
    CellOccupied(#[error(not(source))] CellIndex),

    /// The cell number is outside 1-9.
    #[display("Cell {} is out of range (must be 1-9)", _0)]
    InvalidCell(#[error(not(source))] u8),

    /// A win or draw has already been recorded.
    #[display("Game is already finished")]
    GameAlreadyFinished,
}

impl MoveError {
    /// True for the refusals that leave an active game untouched
    /// (wrong turn, occupied cell, bad cell number).
    pub fn is_invalid_turn(&self) -> bool {
        !matches!(self, MoveError::GameAlreadyFinished)
    }
}
