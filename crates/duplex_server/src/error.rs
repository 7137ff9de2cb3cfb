//! Errors returned to the participant whose call was refused.

use derive_more::{Display, Error, From};
use duplex_tictactoe::{MoveError, ParticipantId};

/// Refusal of a session operation.
///
/// Every variant is local to the failing call: session state is left
/// exactly as it was and the other participant hears nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error, From)]
pub enum SessionError {
    /// Both seats are taken or a game is underway.
    #[display("Registration refused: the maximum of two players is reached")]
    CapacityExceeded,

    /// The move arrived before the second participant joined.
    #[display("Game has not started: waiting for the other player")]
    GameNotStarted,

    /// The connection has not registered yet.
    #[display("Not registered: send a registration first")]
    NotRegistered,

    /// The caller does not hold the seat it acted for.
    #[display("This connection does not hold seat {}", _0)]
    NotSeated(#[error(not(source))] ParticipantId),

    /// The caller already holds a seat in the running session.
    #[display("Already registered as {}", _0)]
    AlreadySeated(#[error(not(source))] ParticipantId),

    /// The move itself was refused.
    #[display("{}", _0)]
    #[from]
    Move(#[error(source)] MoveError),
}
