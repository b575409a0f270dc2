//! Combat events and the bus that carries them to consumers.

use brawl_common::CombatantId;
use crossbeam_channel::{bounded, Receiver, Sender};
use serde::{Deserialize, Serialize};

use crate::attack::AttackKind;
use crate::encounter::Outcome;
use crate::npc::AiState;

/// One resolved hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEvent {
    /// Who landed the hit.
    pub attacker: CombatantId,
    /// Who took it.
    pub defender: CombatantId,
    /// Damage after resistance.
    pub effective_damage: i32,
    /// Defender health after the hit.
    pub remaining_health: i32,
}

/// Events published by an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A hit landed
    Hit {
        /// Resolution details
        hit: HitEvent,
        /// Attack that landed it
        kind: AttackKind,
    },
    /// An attack window opened
    AttackStarted {
        /// Attacker
        attacker: CombatantId,
        /// Attack variant
        kind: AttackKind,
    },
    /// An NPC changed behavior state
    StateChanged {
        /// The NPC
        combatant: CombatantId,
        /// Previous state
        from: AiState,
        /// New state
        to: AiState,
    },
    /// A round was decided
    RoundEnded {
        /// Round number
        round: u32,
        /// Result from the player's side
        outcome: Outcome,
    },
}

/// Bounded event bus between the simulation and its consumers.
///
/// Publishing never blocks: when the bus is full the event is dropped.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<CombatEvent>,
    receiver: Receiver<CombatEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

impl EventBus {
    /// Creates a new event bus with the given capacity (at least 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
            dropped: 0,
        }
    }

    /// Publishes an event. Returns `false` if it was dropped.
    pub fn publish(&mut self, event: CombatEvent) -> bool {
        if self.sender.try_send(event).is_ok() {
            true
        } else {
            self.dropped += 1;
            false
        }
    }

    /// Drains all pending events.
    pub fn drain(&self) -> Vec<CombatEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the channel capacity.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events dropped because the bus was full.
    #[must_use]
    pub const fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Receiver handle for a consumer on another thread.
    #[must_use]
    pub fn subscribe(&self) -> Receiver<CombatEvent> {
        self.receiver.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> CombatEvent {
        CombatEvent::AttackStarted {
            attacker: CombatantId::PLAYER,
            kind: AttackKind::Light,
        }
    }

    #[test]
    fn test_publish_and_drain() {
        let mut bus = EventBus::new(8);
        assert!(bus.publish(started()));
        assert!(bus.publish(CombatEvent::RoundEnded {
            round: 1,
            outcome: Outcome::Victory,
        }));
        assert_eq!(bus.pending_count(), 2);

        let events = bus.drain();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], started());
        assert_eq!(bus.pending_count(), 0);
    }

    #[test]
    fn test_full_bus_drops() {
        let mut bus = EventBus::new(2);
        assert!(bus.publish(started()));
        assert!(bus.publish(started()));
        assert!(!bus.publish(started()));
        assert_eq!(bus.dropped(), 1);
        assert_eq!(bus.drain().len(), 2);
    }

    #[test]
    fn test_subscriber_sees_events() {
        let mut bus = EventBus::default();
        let rx = bus.subscribe();
        bus.publish(started());
        assert_eq!(rx.try_recv().ok(), Some(started()));
    }

    #[test]
    fn test_hit_event_serializes() {
        let event = CombatEvent::Hit {
            hit: HitEvent {
                attacker: CombatantId::ENEMY,
                defender: CombatantId::PLAYER,
                effective_damage: 8,
                remaining_health: 92,
            },
            kind: AttackKind::Medium,
        };
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"effective_damage\":8"));
        let back: Option<CombatEvent> = serde_json::from_str(&json).ok();
        assert_eq!(back, Some(event));
    }
}
