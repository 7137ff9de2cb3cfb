//! Duplex tic-tac-toe server library.
//!
//! Hosts exactly one two-player game at a time and resets after every
//! game so the next pair can start immediately.
//!
//! # Architecture
//!
//! - **Registry**: two seats, identity allotment, notification routing
//! - **Session**: lifecycle state machine composing registry and turns,
//!   guarded by one lock in [`SessionHandle`]
//! - **Notify**: per-participant channels; outboxes delivered after the lock
//! - **Connection / Server**: JSON-over-WebSocket adapter and host loop
//!
//! # Example
//!
//! ```
//! use duplex_server::{Notifier, ServerMessage, SessionHandle};
//! use duplex_tictactoe::ParticipantId;
//!
//! let session = SessionHandle::new();
//! let (alice, mut alice_rx) = Notifier::channel();
//! let (bob, _bob_rx) = Notifier::channel();
//!
//! session.register(ParticipantId::First, &alice).unwrap();
//! let seat = session.register(ParticipantId::First, &bob).unwrap();
//! assert_eq!(seat.allotted, ParticipantId::Second);
//!
//! let _registered = alice_rx.try_recv().unwrap();
//! assert_eq!(alice_rx.try_recv().unwrap(), ServerMessage::GameStarted);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod connection;
mod error;
mod notify;
mod protocol;
mod registry;
mod server;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, ServerConfig};

// Crate-level exports - Session core
pub use error::SessionError;
pub use notify::{Envelope, Notifier, Outbox};
pub use registry::{ParticipantSlot, Registration, SessionRegistry};
pub use session::{GameSession, Phase, SessionHandle, SessionSnapshot};

// Crate-level exports - Transport
pub use connection::Connection;
pub use protocol::{ClientMessage, ServerMessage};
pub use server::{router, serve};
