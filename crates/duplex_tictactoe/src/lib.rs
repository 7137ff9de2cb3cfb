//! Pure tic-tac-toe game logic for two remote participants.
//!
//! Nothing in this crate performs I/O. The server crate wraps a
//! [`TurnCoordinator`] in its session state and turns each
//! [`TurnReport`] into notifications.
//!
//! # Example
//!
//! ```
//! use duplex_tictactoe::{CellIndex, Move, Outcome, ParticipantId, TurnCoordinator};
//!
//! # fn main() -> Result<(), duplex_tictactoe::MoveError> {
//! let mut turns = TurnCoordinator::new(ParticipantId::First);
//! for (player, cell) in [
//!     (ParticipantId::First, 1),
//!     (ParticipantId::Second, 4),
//!     (ParticipantId::First, 2),
//!     (ParticipantId::Second, 5),
//! ] {
//!     turns.submit_move(player, Move::new(player, CellIndex::new(cell)?))?;
//! }
//! let report = turns.submit_move(
//!     ParticipantId::First,
//!     Move::new(ParticipantId::First, CellIndex::new(3)?),
//! )?;
//! assert_eq!(report.outcome.and_then(|o| o.winner()), Some(ParticipantId::First));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
pub mod invariants;
pub mod rules;
mod turn;
mod types;

pub use action::{Move, MoveError};
pub use board::Board;
pub use rules::{Outcome, WinLine};
pub use turn::{TurnCoordinator, TurnReport};
pub use types::{CellIndex, ParticipantId, Square};
