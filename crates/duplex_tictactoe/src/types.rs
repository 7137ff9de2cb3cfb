//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::MoveError;

/// One of the two seats in a game.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantId {
    /// Plays the `O` glyph.
    #[display("First")]
    First,
    /// Plays the `X` glyph.
    #[display("Second")]
    Second,
}

impl ParticipantId {
    /// Returns the other participant.
    pub fn opponent(self) -> Self {
        match self {
            ParticipantId::First => ParticipantId::Second,
            ParticipantId::Second => ParticipantId::First,
        }
    }

    /// Glyph drawn for this participant's marks.
    pub fn glyph(self) -> char {
        match self {
            ParticipantId::First => 'O',
            ParticipantId::Second => 'X',
        }
    }
}

/// A cell on the board, numbered 1-9 in row-major order.
///
/// ```text
/// 1 | 2 | 3
/// 4 | 5 | 6
/// 7 | 8 | 9
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(try_from = "u8", into = "u8")]
#[display("{}", _0)]
pub struct CellIndex(u8);

impl CellIndex {
    /// Smallest valid cell number.
    pub const MIN: u8 = 1;
    /// Largest valid cell number.
    pub const MAX: u8 = 9;

    /// Creates a cell index, rejecting anything outside 1-9.
    #[instrument]
    pub fn new(cell: u8) -> Result<Self, MoveError> {
        if (Self::MIN..=Self::MAX).contains(&cell) {
            Ok(Self(cell))
        } else {
            Err(MoveError::InvalidCell(cell))
        }
    }

    /// Returns the cell number (1-9).
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based offset into row-major storage.
    pub(crate) fn offset(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Iterates over all nine cells in order.
    pub fn all() -> impl Iterator<Item = CellIndex> {
        (Self::MIN..=Self::MAX).map(CellIndex)
    }
}

impl TryFrom<u8> for CellIndex {
    type Error = MoveError;

    fn try_from(cell: u8) -> Result<Self, Self::Error> {
        Self::new(cell)
    }
}

impl From<CellIndex> for u8 {
    fn from(cell: CellIndex) -> Self {
        cell.0
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Claimed by a participant.
    Occupied(ParticipantId),
}

impl Square {
    /// Returns the owner, if any.
    pub fn owner(self) -> Option<ParticipantId> {
        match self {
            Square::Empty => None,
            Square::Occupied(owner) => Some(owner),
        }
    }
}
