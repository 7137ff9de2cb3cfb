//! 3x3 board storage.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::MoveError;
use crate::types::{CellIndex, ParticipantId, Square};

/// 3x3 tic-tac-toe board.
///
/// Cells can only go from empty to occupied; nothing clears a cell
/// short of replacing the whole board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (cells 1-9).
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the square at the given cell.
    pub fn get(&self, cell: CellIndex) -> Square {
        self.squares[cell.offset()]
    }

    /// Returns the owner of the given cell, if any.
    pub fn owner(&self, cell: CellIndex) -> Option<ParticipantId> {
        self.get(cell).owner()
    }

    /// Claims a cell for `owner`.
    #[instrument(skip(self))]
    pub fn set(&mut self, cell: CellIndex, owner: ParticipantId) -> Result<(), MoveError> {
        let square = &mut self.squares[cell.offset()];
        if *square != Square::Empty {
            return Err(MoveError::CellOccupied(cell));
        }
        *square = Square::Occupied(owner);
        Ok(())
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, cell: CellIndex) -> bool {
        self.get(cell) == Square::Empty
    }

    /// True once every cell is occupied.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Formats the board as three text rows, empty cells showing their number.
    pub fn render(&self) -> String {
        let mut result = String::new();
        for (offset, square) in self.squares.iter().enumerate() {
            match square {
                Square::Empty => result.push_str(&(offset + 1).to_string()),
                Square::Occupied(owner) => result.push(owner.glyph()),
            }
            match offset % 3 {
                2 if offset < 8 => result.push_str("\n-+-+-\n"),
                2 => {}
                _ => result.push('|'),
            }
        }
        result
    }
}
