//! The single game hosted by the process.
//!
//! [`GameSession`] is plain state: every operation mutates it and
//! returns an [`Outbox`] of notifications. [`SessionHandle`] owns it
//! behind one mutex and runs each operation inside that critical section,
//! handing the outbox to the participants' channels before the lock is
//! released. Channel sends never block, so every participant sees
//! notifications in the order the operations took the lock.

use crate::error::SessionError;
use crate::notify::{Notifier, Outbox};
use crate::protocol::ServerMessage;
use crate::registry::{Registration, SessionRegistry};
use duplex_tictactoe::{Board, Move, MoveError, ParticipantId, TurnCoordinator};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, instrument, warn};

/// Lifecycle of the hosted game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Nobody seated.
    #[default]
    Empty,
    /// One participant waiting for an opponent.
    AwaitingSecondPlayer,
    /// Both seated, moves accepted.
    InProgress,
    /// Game over. Win, draw, abort and a mid-game unregister pass through
    /// here straight to `Empty` once the final notifications are queued.
    Finished,
}

/// Read-only view of the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    /// Current phase.
    pub phase: Phase,
    /// Seats currently held.
    pub occupied: Vec<ParticipantId>,
    /// Who may move, while a game is in progress.
    pub turn_holder: Option<ParticipantId>,
    /// Board of the current game, if one started.
    pub board: Option<Board>,
    /// Number of accepted moves.
    pub moves: usize,
}

/// Seats, turn order and board of the one game in the process.
#[derive(Debug, Default)]
pub struct GameSession {
    phase: Phase,
    registry: SessionRegistry,
    opener: Option<ParticipantId>,
    turns: Option<TurnCoordinator>,
}

impl GameSession {
    /// Creates an empty session.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating game session");
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seat registry.
    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// Turn state of the running game.
    pub fn turns(&self) -> Option<&TurnCoordinator> {
        self.turns.as_ref()
    }

    /// Takes a seat. The first participant to arrive moves first.
    #[instrument(skip(self, notifier), fields(phase = %self.phase))]
    pub fn register(
        &mut self,
        requested: ParticipantId,
        notifier: &Notifier,
    ) -> Result<(Registration, Outbox), SessionError> {
        if self.phase == Phase::InProgress {
            warn!("Registration while a game is underway");
            return Err(SessionError::CapacityExceeded);
        }

        let mut outbox = Outbox::new();
        let registration = self.registry.register(requested, notifier, &mut outbox)?;

        if registration.early_bird {
            self.opener = Some(registration.allotted);
            self.phase = Phase::AwaitingSecondPlayer;
        } else {
            let opener = self.opener.unwrap_or(registration.allotted.opponent());
            self.turns = Some(TurnCoordinator::new(opener));
            self.phase = Phase::InProgress;
            info!(%opener, "Game started");
        }

        Ok((registration, outbox))
    }

    /// Applies a move and queues `Moved` for both sides, plus `GameOver`
    /// and a reset when the move ends the game.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn submit_move(&mut self, sender: ParticipantId, mv: Move) -> Result<Outbox, SessionError> {
        let turns = match (self.phase, self.turns.as_mut()) {
            (Phase::InProgress, Some(turns)) => turns,
            (Phase::Finished, _) => return Err(MoveError::GameAlreadyFinished.into()),
            _ => {
                warn!("Move before the game started");
                return Err(SessionError::GameNotStarted);
            }
        };

        let report = turns.submit_move(sender, mv)?;
        debug!(board = %turns.board().render(), "Move applied");

        let mut outbox = Outbox::new();
        self.registry.broadcast(&mut outbox, |recipient| ServerMessage::Moved {
            mv: report.applied,
            is_your_turn: recipient == report.turn_holder,
        });

        if let Some(outcome) = report.outcome {
            self.phase = Phase::Finished;
            let board = turns.board().clone();
            self.registry.broadcast(&mut outbox, |_| ServerMessage::GameOver {
                outcome: outcome.clone(),
                board: board.clone(),
            });
            for id in self.registry.occupied() {
                self.registry.unregister(id);
            }
            self.reset();
        }

        Ok(outbox)
    }

    /// Ends the game for both sides, telling the other participant.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn abort(&mut self, id: ParticipantId) -> Outbox {
        let mut outbox = Outbox::new();
        if self.phase == Phase::Empty {
            debug!("Nothing to abort");
            return outbox;
        }
        if self.phase == Phase::InProgress {
            self.phase = Phase::Finished;
        }
        self.registry.abort(id, &mut outbox);
        self.reset();
        outbox
    }

    /// Releases one seat.
    ///
    /// Outside a game nobody is told. Leaving mid-game ends it like an
    /// abort: the remaining participant receives `Aborted` and the
    /// session resets so the next pair can register.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn unregister(&mut self, id: ParticipantId) -> Outbox {
        if self.phase == Phase::InProgress {
            warn!(participant = %id, "Participant left mid-game");
            return self.abort(id);
        }
        self.registry.unregister(id);
        if self.registry.is_empty() {
            self.reset();
        }
        Outbox::new()
    }

    /// Fails unless `caller` is the channel seated at `id`.
    pub fn ensure_seated(&self, id: ParticipantId, caller: &Notifier) -> Result<(), SessionError> {
        if self.registry.is_held_by(id, caller) {
            Ok(())
        } else {
            Err(SessionError::NotSeated(id))
        }
    }

    /// Read-only view for logging, health checks and tests.
    pub fn snapshot(&self) -> SessionSnapshot {
        let turns = self.turns.as_ref();
        SessionSnapshot {
            phase: self.phase,
            occupied: self.registry.occupied(),
            turn_holder: turns
                .filter(|_| self.phase == Phase::InProgress)
                .map(TurnCoordinator::turn_holder),
            board: turns.map(|t| t.board().clone()),
            moves: turns.map_or(0, |t| t.history().len()),
        }
    }

    fn reset(&mut self) {
        if self.phase != Phase::Empty {
            info!(from = %self.phase, "Session reset");
        }
        self.registry.clear();
        self.opener = None;
        self.turns = None;
        self.phase = Phase::Empty;
    }
}

/// Shared owner of the process's [`GameSession`].
///
/// Cloning is cheap; every clone drives the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<GameSession>>,
}

impl SessionHandle {
    /// Creates a handle over a fresh session.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GameSession::new())),
        }
    }

    // Operations never leave the session half-updated, so a panic in
    // another holder does not invalidate the state.
    fn lock(&self) -> MutexGuard<'_, GameSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers `notifier`'s connection. On refusal the caller alone
    /// receives `RegistrationFailed`.
    #[instrument(skip(self, notifier))]
    pub fn register(
        &self,
        requested: ParticipantId,
        notifier: &Notifier,
    ) -> Result<Registration, SessionError> {
        let mut session = self.lock();
        match session.register(requested, notifier) {
            Ok((registration, outbox)) => {
                outbox.dispatch();
                Ok(registration)
            }
            Err(e) => {
                notifier.deliver(ServerMessage::RegistrationFailed);
                Err(e)
            }
        }
    }

    /// Submits a move from the connection seated at `sender`.
    #[instrument(skip(self, caller))]
    pub fn submit_move(
        &self,
        caller: &Notifier,
        sender: ParticipantId,
        mv: Move,
    ) -> Result<(), SessionError> {
        let mut session = self.lock();
        session.ensure_seated(sender, caller)?;
        session.submit_move(sender, mv)?.dispatch();
        Ok(())
    }

    /// Aborts the game on behalf of the connection seated at `id`.
    #[instrument(skip(self, caller))]
    pub fn abort(&self, caller: &Notifier, id: ParticipantId) -> Result<(), SessionError> {
        let mut session = self.lock();
        session.ensure_seated(id, caller)?;
        session.abort(id).dispatch();
        Ok(())
    }

    /// Releases the seat held by the connection at `id`.
    #[instrument(skip(self, caller))]
    pub fn unregister(&self, caller: &Notifier, id: ParticipantId) -> Result<(), SessionError> {
        let mut session = self.lock();
        session.ensure_seated(id, caller)?;
        session.unregister(id).dispatch();
        Ok(())
    }

    /// True when `caller` holds the seat `id`.
    pub fn is_seated(&self, id: ParticipantId, caller: &Notifier) -> bool {
        self.lock().ensure_seated(id, caller).is_ok()
    }

    /// Current state of the session.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock().snapshot()
    }
}
