//! The two participant seats and who is sitting in them.

use crate::error::SessionError;
use crate::notify::{Notifier, Outbox};
use crate::protocol::ServerMessage;
use duplex_tictactoe::ParticipantId;
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument, warn};

/// A filled seat.
#[derive(Debug, Clone)]
pub struct ParticipantSlot {
    id: ParticipantId,
    notifier: Notifier,
}

impl ParticipantSlot {
    /// Seat held.
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    /// Channel used to reach the participant.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// True while the participant's channel is open.
    pub fn is_live(&self) -> bool {
        self.notifier.is_live()
    }
}

/// Result of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_new::new)]
pub struct Registration {
    /// True if nobody was seated before this participant.
    pub early_bird: bool,
    /// Seat actually allotted.
    pub allotted: ParticipantId,
}

/// Admits at most two participants and routes notifications to them.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    slots: [Option<ParticipantSlot>; 2],
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seats a participant, preferring `requested`.
    ///
    /// Queues `Registered` for the newcomer and, once both seats are
    /// filled, `GameStarted` for every live participant.
    #[instrument(skip(self, notifier, outbox))]
    pub fn register(
        &mut self,
        requested: ParticipantId,
        notifier: &Notifier,
        outbox: &mut Outbox,
    ) -> Result<Registration, SessionError> {
        if self.is_full() {
            warn!("Both seats taken");
            return Err(SessionError::CapacityExceeded);
        }

        let allotted = if self.slot(requested).is_some() {
            requested.opponent()
        } else {
            requested
        };
        let early_bird = self.is_empty();
        self.slots[slot_index(allotted)] = Some(ParticipantSlot {
            id: allotted,
            notifier: notifier.clone(),
        });
        info!(%allotted, early_bird, "Participant registered");

        outbox.push(
            Some(allotted),
            notifier,
            ServerMessage::Registered {
                early_bird,
                allotted,
            },
        );
        if self.is_full() {
            self.broadcast(outbox, |_| ServerMessage::GameStarted);
        }

        Ok(Registration::new(early_bird, allotted))
    }

    /// Frees a seat. Does nothing if it was already empty.
    #[instrument(skip(self))]
    pub fn unregister(&mut self, id: ParticipantId) -> Option<ParticipantSlot> {
        let removed = self.slots[slot_index(id)].take();
        if removed.is_some() {
            info!(participant = %id, "Participant unregistered");
        } else {
            debug!(participant = %id, "Seat already empty");
        }
        removed
    }

    /// Tells the other live participant that `id` left, then empties both seats.
    #[instrument(skip(self, outbox))]
    pub fn abort(&mut self, id: ParticipantId, outbox: &mut Outbox) {
        if let Some(other) = self.slot(id.opponent()).filter(|slot| slot.is_live()) {
            outbox.push(Some(other.id), &other.notifier, ServerMessage::Aborted { by: id });
        }
        self.clear();
        info!(participant = %id, "Game aborted, seats cleared");
    }

    /// Queues one message per live participant, built per recipient.
    pub fn broadcast(&self, outbox: &mut Outbox, message: impl Fn(ParticipantId) -> ServerMessage) {
        for slot in self.slots.iter().flatten() {
            if slot.is_live() {
                outbox.push(Some(slot.id), &slot.notifier, message(slot.id));
            } else {
                debug!(participant = %slot.id, "Skipping closed channel");
            }
        }
    }

    /// Empties both seats.
    pub fn clear(&mut self) {
        self.slots = [None, None];
    }

    /// Returns the slot for a seat.
    pub fn slot(&self, id: ParticipantId) -> Option<&ParticipantSlot> {
        self.slots[slot_index(id)].as_ref()
    }

    /// True when `notifier` is the channel seated at `id`.
    pub fn is_held_by(&self, id: ParticipantId, notifier: &Notifier) -> bool {
        self.slot(id)
            .is_some_and(|slot| slot.notifier.same_channel(notifier))
    }

    /// Occupied seats, `First` before `Second`.
    pub fn occupied(&self) -> Vec<ParticipantId> {
        ParticipantId::iter()
            .filter(|id| self.slot(*id).is_some())
            .collect()
    }

    /// True when nobody is seated.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// True when both seats are taken.
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }
}

fn slot_index(id: ParticipantId) -> usize {
    match id {
        ParticipantId::First => 0,
        ParticipantId::Second => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use duplex_tictactoe::ParticipantId::{First, Second};

    fn messages(outbox: &Outbox) -> Vec<(Option<ParticipantId>, ServerMessage)> {
        outbox
            .envelopes()
            .iter()
            .map(|e| (e.to, e.message.clone()))
            .collect()
    }

    #[test]
    fn distinct_requests_get_what_they_asked_for() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let mut outbox = Outbox::new();

        let first = registry.register(Second, &a, &mut outbox).unwrap();
        let second = registry.register(First, &b, &mut outbox).unwrap();

        assert_eq!(first, Registration::new(true, Second));
        assert_eq!(second, Registration::new(false, First));
        assert!(registry.is_full());
    }

    #[test]
    fn taken_request_is_reallotted() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let mut outbox = Outbox::new();

        registry.register(First, &a, &mut outbox).unwrap();
        let second = registry.register(First, &b, &mut outbox).unwrap();

        assert_eq!(second.allotted, Second);
        assert!(registry.is_held_by(Second, &b));
        assert!(!registry.is_held_by(Second, &a));
    }

    #[test]
    fn second_registration_starts_game_for_both() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let mut outbox = Outbox::new();

        registry.register(First, &a, &mut outbox).unwrap();
        registry.register(Second, &b, &mut outbox).unwrap();

        assert_eq!(
            messages(&outbox),
            vec![
                (
                    Some(First),
                    ServerMessage::Registered {
                        early_bird: true,
                        allotted: First
                    }
                ),
                (
                    Some(Second),
                    ServerMessage::Registered {
                        early_bird: false,
                        allotted: Second
                    }
                ),
                (Some(First), ServerMessage::GameStarted),
                (Some(Second), ServerMessage::GameStarted),
            ]
        );
    }

    #[test]
    fn game_started_skips_closed_channel() {
        let mut registry = SessionRegistry::new();
        let (a, a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let mut outbox = Outbox::new();

        registry.register(First, &a, &mut outbox).unwrap();
        drop(a_rx);
        let mut outbox = Outbox::new();
        registry.register(Second, &b, &mut outbox).unwrap();

        let started: Vec<_> = messages(&outbox)
            .into_iter()
            .filter(|(_, m)| *m == ServerMessage::GameStarted)
            .collect();
        assert_eq!(started, vec![(Some(Second), ServerMessage::GameStarted)]);
    }

    #[test]
    fn third_registration_fails_without_touching_seats() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let (c, _c_rx) = Notifier::channel();
        let mut outbox = Outbox::new();
        registry.register(First, &a, &mut outbox).unwrap();
        registry.register(Second, &b, &mut outbox).unwrap();

        let mut outbox = Outbox::new();
        assert_eq!(
            registry.register(First, &c, &mut outbox),
            Err(SessionError::CapacityExceeded)
        );
        assert!(outbox.is_empty());
        assert!(registry.is_held_by(First, &a));
        assert!(registry.is_held_by(Second, &b));
    }

    #[test]
    fn abort_notifies_only_the_other_side_and_clears() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let (b, _b_rx) = Notifier::channel();
        let mut outbox = Outbox::new();
        registry.register(First, &a, &mut outbox).unwrap();
        registry.register(Second, &b, &mut outbox).unwrap();

        let mut outbox = Outbox::new();
        registry.abort(First, &mut outbox);

        assert_eq!(
            messages(&outbox),
            vec![(Some(Second), ServerMessage::Aborted { by: First })]
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn unregister_is_unconditional_and_idempotent() {
        let mut registry = SessionRegistry::new();
        let (a, _a_rx) = Notifier::channel();
        let mut outbox = Outbox::new();
        registry.register(Second, &a, &mut outbox).unwrap();

        assert!(registry.unregister(Second).is_some());
        assert!(registry.unregister(Second).is_none());
        assert!(registry.is_empty());
    }
}
