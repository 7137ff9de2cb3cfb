//! JSON wire messages exchanged over a participant's connection.

use duplex_tictactoe::{Board, Move, Outcome, ParticipantId};
use serde::{Deserialize, Serialize};

/// Calls a participant makes on the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Ask for a seat; the other one is allotted if this one is taken.
    Register {
        /// Requested seat.
        player: ParticipantId,
    },
    /// Claim a cell (1-9).
    Move {
        /// Seat the move is played for.
        player: ParticipantId,
        /// Raw cell number, validated by the session.
        cell: u8,
    },
    /// Leave a running game, ending it for both sides.
    Abort {
        /// Seat that is leaving; must be the sender's own.
        player: ParticipantId,
    },
    /// Release the seat. Mid-game this ends the game like an abort.
    Unregister {
        /// Seat being released; must be the sender's own.
        player: ParticipantId,
    },
}

/// One-way notifications pushed to a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Registration succeeded.
    Registered {
        /// True for the first participant to arrive, who also moves first.
        early_bird: bool,
        /// Seat actually allotted.
        allotted: ParticipantId,
    },
    /// Both seats are filled; play may begin.
    GameStarted,
    /// A move was accepted.
    Moved {
        /// The accepted move.
        #[serde(rename = "move")]
        mv: Move,
        /// True when the recipient holds the turn now.
        is_your_turn: bool,
    },
    /// The game ended with a win or a draw.
    GameOver {
        /// Winner and winning lines, or draw.
        outcome: Outcome,
        /// Final board as decided by the server.
        board: Board,
    },
    /// The other participant left the game.
    Aborted {
        /// Seat that aborted.
        by: ParticipantId,
    },
    /// No seat was free.
    RegistrationFailed,
    /// The recipient's last call was refused.
    Rejected {
        /// Why the call was refused.
        reason: String,
    },
}
