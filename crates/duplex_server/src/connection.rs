//! Per-connection driver, independent of the transport.
//!
//! The transport feeds text frames in and drains the outbound channel.
//! Refusals come back to the same connection as `rejected` messages.

use crate::error::SessionError;
use crate::notify::Notifier;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::SessionHandle;
use duplex_tictactoe::{CellIndex, Move, ParticipantId};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

/// One participant's connection to the session.
#[derive(Debug)]
pub struct Connection {
    session: SessionHandle,
    notifier: Notifier,
    seat: Option<ParticipantId>,
}

impl Connection {
    /// Opens a connection and returns the receiver for its notifications.
    pub fn open(session: SessionHandle) -> (Self, UnboundedReceiver<ServerMessage>) {
        let (notifier, outbound) = Notifier::channel();
        let connection = Self {
            session,
            notifier,
            seat: None,
        };
        (connection, outbound)
    }

    /// Seat this connection last registered for.
    pub fn seat(&self) -> Option<ParticipantId> {
        self.seat
    }

    /// Parses and handles one text frame.
    #[instrument(skip(self, frame), fields(seat = ?self.seat))]
    pub fn handle_frame(&mut self, frame: &str) {
        match serde_json::from_str::<ClientMessage>(frame) {
            Ok(message) => self.handle(message),
            Err(e) => {
                warn!(error = %e, "Unparseable frame");
                self.notifier.deliver(ServerMessage::Rejected {
                    reason: format!("Malformed message: {e}"),
                });
            }
        }
    }

    /// Handles one client call, reporting any refusal to this connection.
    #[instrument(skip(self), fields(seat = ?self.seat))]
    pub fn handle(&mut self, message: ClientMessage) {
        let result = match message {
            ClientMessage::Register { player } => self.register(player),
            ClientMessage::Move { player, cell } => self.submit_move(player, cell),
            ClientMessage::Abort { player } => self.abort(player),
            ClientMessage::Unregister { player } => self.unregister(player),
        };
        match result {
            Ok(()) => {}
            // The session already sent `RegistrationFailed`.
            Err(SessionError::CapacityExceeded) => {}
            Err(e) => {
                debug!(error = %e, "Call refused");
                self.notifier.deliver(ServerMessage::Rejected {
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Tears down the connection, aborting the game if it still holds a seat.
    #[instrument(skip(self), fields(seat = ?self.seat))]
    pub fn close(mut self) {
        if let Some(seat) = self.seat.take() {
            match self.session.abort(&self.notifier, seat) {
                Ok(()) => info!(%seat, "Connection closed while seated, game aborted"),
                Err(e) => debug!(error = %e, "Seat already released"),
            }
        }
    }

    fn register(&mut self, requested: ParticipantId) -> Result<(), SessionError> {
        if let Some(seat) = self.current_seat() {
            return Err(SessionError::AlreadySeated(seat));
        }
        let registration = self.session.register(requested, &self.notifier)?;
        self.seat = Some(registration.allotted);
        Ok(())
    }

    fn submit_move(&mut self, player: ParticipantId, cell: u8) -> Result<(), SessionError> {
        let seat = self.seat.ok_or(SessionError::NotRegistered)?;
        let mv = Move::new(player, CellIndex::new(cell)?);
        self.session.submit_move(&self.notifier, seat, mv)
    }

    fn abort(&mut self, player: ParticipantId) -> Result<(), SessionError> {
        let seat = self.release(player)?;
        self.session.abort(&self.notifier, seat)
    }

    fn unregister(&mut self, player: ParticipantId) -> Result<(), SessionError> {
        let seat = self.release(player)?;
        self.session.unregister(&self.notifier, seat)
    }

    /// Gives up the seat, which must be the one `player` names.
    fn release(&mut self, player: ParticipantId) -> Result<ParticipantId, SessionError> {
        match self.seat {
            None => Err(SessionError::NotRegistered),
            Some(seat) if seat != player => Err(SessionError::NotSeated(player)),
            Some(seat) => {
                self.seat = None;
                Ok(seat)
            }
        }
    }

    fn current_seat(&self) -> Option<ParticipantId> {
        self.seat
            .filter(|seat| self.session.is_seated(*seat, &self.notifier))
    }
}
