//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board). Nothing here mutates
//! state or knows about turns; the turn coordinator decides what to do
//! with the verdict.

pub mod draw;
pub mod win;

pub use draw::is_draw;
pub use win::{WinLine, evaluate, winning_lines};

use crate::types::ParticipantId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Terminal result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// `winner` completed every line in `lines`.
    Won {
        /// Participant who completed the line(s).
        winner: ParticipantId,
        /// Every line completed by the final move.
        lines: BTreeSet<WinLine>,
    },
    /// Board filled without a winning line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<ParticipantId> {
        match self {
            Outcome::Won { winner, .. } => Some(*winner),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Won { winner, .. } => write!(f, "{} has won the game", winner),
            Outcome::Draw => write!(f, "Game is a draw"),
        }
    }
}
