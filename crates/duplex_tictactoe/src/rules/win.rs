//! Win detection logic for tic-tac-toe.

use super::Outcome;
use crate::board::Board;
use crate::types::{CellIndex, ParticipantId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// One of the eight three-in-a-row lines.
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
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WinLine {
    /// Cells 1, 2, 3.
    Top,
    /// Cells 4, 5, 6.
    Center,
    /// Cells 7, 8, 9.
    Bottom,
    /// Cells 1, 4, 7.
    Left,
    /// Cells 2, 5, 8.
    Middle,
    /// Cells 3, 6, 9.
    Right,
    /// Cells 1, 5, 9.
    BackDiagonal,
    /// Cells 3, 5, 7.
    ForwardDiagonal,
}

impl WinLine {
    /// Cell numbers making up this line.
    pub fn cell_numbers(self) -> [u8; 3] {
        match self {
            WinLine::Top => [1, 2, 3],
            WinLine::Center => [4, 5, 6],
            WinLine::Bottom => [7, 8, 9],
            WinLine::Left => [1, 4, 7],
            WinLine::Middle => [2, 5, 8],
            WinLine::Right => [3, 6, 9],
            WinLine::BackDiagonal => [1, 5, 9],
            WinLine::ForwardDiagonal => [3, 5, 7],
        }
    }

    /// Cells making up this line.
    pub fn cells(self) -> impl Iterator<Item = CellIndex> {
        self.cell_numbers()
            .into_iter()
            .filter_map(|n| CellIndex::new(n).ok())
    }

    /// True when `owner` holds all three cells.
    pub fn is_held_by(self, board: &Board, owner: ParticipantId) -> bool {
        self.cells().all(|cell| board.owner(cell) == Some(owner))
    }
}

/// Every line fully held by `owner`.
///
/// Checks all eight lines rather than only those through the last cell,
/// so callers get every line to highlight even on a hand-built board.
#[instrument(skip(board))]
pub fn winning_lines(board: &Board, owner: ParticipantId) -> BTreeSet<WinLine> {
    WinLine::iter()
        .filter(|line| line.is_held_by(board, owner))
        .collect()
}

/// Verdict after `last_mover` played: `None` means play continues.
#[instrument(skip(board))]
pub fn evaluate(board: &Board, last_mover: ParticipantId) -> Option<Outcome> {
    let lines = winning_lines(board, last_mover);
    if !lines.is_empty() {
        debug!(winner = %last_mover, ?lines, "Winning line(s) detected");
        return Some(Outcome::Won {
            winner: last_mover,
            lines,
        });
    }
    if board.is_full() {
        debug!("Board full without a line");
        return Some(Outcome::Draw);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(owner: ParticipantId, cells: &[u8]) -> Board {
        let mut board = Board::new();
        for &n in cells {
            board.set(CellIndex::new(n).unwrap(), owner).unwrap();
        }
        board
    }

    #[test]
    fn no_winner_on_empty_board() {
        assert_eq!(evaluate(&Board::new(), ParticipantId::First), None);
    }

    #[test]
    fn each_canonical_line_wins() {
        for line in WinLine::iter() {
            let board = board_with(ParticipantId::Second, &line.cell_numbers());
            let outcome = evaluate(&board, ParticipantId::Second);
            assert_eq!(
                outcome,
                Some(Outcome::Won {
                    winner: ParticipantId::Second,
                    lines: BTreeSet::from([line]),
                }),
                "line {line}"
            );
        }
    }

    #[test]
    fn only_canonical_triples_win() {
        let canonical: BTreeSet<[u8; 3]> = WinLine::iter().map(WinLine::cell_numbers).collect();
        for a in 1..=9u8 {
            for b in (a + 1)..=9 {
                for c in (b + 1)..=9 {
                    let board = board_with(ParticipantId::First, &[a, b, c]);
                    let won = evaluate(&board, ParticipantId::First).is_some();
                    assert_eq!(won, canonical.contains(&[a, b, c]), "cells {a},{b},{c}");
                }
            }
        }
    }

    #[test]
    fn lines_of_the_other_owner_do_not_count() {
        let board = board_with(ParticipantId::First, &[1, 2, 3]);
        assert_eq!(evaluate(&board, ParticipantId::Second), None);
    }

    #[test]
    fn reports_every_completed_line() {
        // O O O / O . . / O . .
        let board = board_with(ParticipantId::First, &[1, 2, 3, 4, 7]);
        let lines = winning_lines(&board, ParticipantId::First);
        assert_eq!(lines, BTreeSet::from([WinLine::Top, WinLine::Left]));
    }
}
