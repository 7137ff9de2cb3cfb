//! Outbound notification channels and the per-operation outbox.
//!
//! Session operations queue notifications into an [`Outbox`] while the
//! session lock is held; the caller dispatches it after the lock is
//! released. Delivery never blocks and never fails the operation.

use crate::protocol::ServerMessage;
use duplex_tictactoe::ParticipantId;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{debug, instrument, trace};

/// Sending half of a participant's notification channel.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: UnboundedSender<ServerMessage>,
}

impl Notifier {
    /// Creates a notifier and the receiver the transport drains.
    pub fn channel() -> (Self, UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }

    /// True while the receiving side is still around.
    pub fn is_live(&self) -> bool {
        !self.tx.is_closed()
    }

    /// True when both notifiers feed the same connection.
    pub fn same_channel(&self, other: &Notifier) -> bool {
        self.tx.same_channel(&other.tx)
    }

    /// Sends without waiting. Returns false if the recipient is gone.
    pub fn deliver(&self, message: ServerMessage) -> bool {
        self.tx.send(message).is_ok()
    }
}

/// A notification addressed to one participant.
#[derive(Debug, Clone, derive_new::new)]
pub struct Envelope {
    /// Seat of the recipient, if it holds one.
    pub to: Option<ParticipantId>,
    /// Recipient channel.
    pub notifier: Notifier,
    /// What to send.
    pub message: ServerMessage,
}

/// Notifications queued by one session operation, in delivery order.
#[derive(Debug, Default)]
#[must_use = "an outbox does nothing until dispatched"]
pub struct Outbox {
    envelopes: Vec<Envelope>,
}

impl Outbox {
    /// Creates an empty outbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a notification.
    pub fn push(&mut self, to: Option<ParticipantId>, notifier: &Notifier, message: ServerMessage) {
        self.envelopes
            .push(Envelope::new(to, notifier.clone(), message));
    }

    /// Number of queued notifications.
    pub fn len(&self) -> usize {
        self.envelopes.len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Queued notifications, in order.
    pub fn envelopes(&self) -> &[Envelope] {
        &self.envelopes
    }

    /// Delivers everything, skipping recipients whose channel has closed.
    ///
    /// Returns how many notifications were handed to a live channel.
    #[instrument(skip(self), fields(queued = self.envelopes.len()))]
    pub fn dispatch(self) -> usize {
        let mut delivered = 0;
        for Envelope {
            to,
            notifier,
            message,
        } in self.envelopes
        {
            if notifier.deliver(message) {
                trace!(?to, "Delivered");
                delivered += 1;
            } else {
                debug!(?to, "Recipient gone, notification dropped");
            }
        }
        delivered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_skips_closed_channel_and_reaches_the_rest() {
        let (gone, gone_rx) = Notifier::channel();
        let (alive, mut alive_rx) = Notifier::channel();
        drop(gone_rx);

        let mut outbox = Outbox::new();
        outbox.push(Some(ParticipantId::First), &gone, ServerMessage::GameStarted);
        outbox.push(Some(ParticipantId::Second), &alive, ServerMessage::GameStarted);

        assert_eq!(outbox.dispatch(), 1);
        assert_eq!(alive_rx.try_recv().unwrap(), ServerMessage::GameStarted);
    }

    #[test]
    fn liveness_follows_receiver() {
        let (notifier, rx) = Notifier::channel();
        assert!(notifier.is_live());
        drop(rx);
        assert!(!notifier.is_live());
    }

    #[test]
    fn same_channel_tells_connections_apart() {
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        assert!(a.same_channel(&a.clone()));
        assert!(!a.same_channel(&b));
    }
}
