//! Combat notifications.
//!
//! The engine performs no I/O. Everything a presentation layer may want to
//! show (the "combat ready" roll call, every attack, destroyed gear,
//! knockouts, round boundaries) is emitted as a [`CombatEvent`] to a
//! [`CombatObserver`] supplied by the caller.
//!
//! Any `FnMut(&CombatEvent)` closure is an observer; [`EventLog`] records
//! events in order.

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use crate::entity::CharacterId;
use crate::team::Side;

/// Why an attack did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The attacker's character is not in the match roster.
    MissingAttacker,
    /// The chosen target's character is not in the match roster.
    MissingTarget,
    /// The opposing team has no members to target.
    NoTargets,
}

/// Something that happened during a match.
///
/// # Variants
///
/// - `CombatReady`: a member's equipment, emitted once per member before round 1
/// - `RoundStarted` / `RoundResolved`: round boundaries
/// - `Attack`: one resolved attack
/// - `ItemDestroyed`: gear durability crossed zero
/// - `KnockedOut`: a member was removed from the fight
/// - `AttackSkipped`: an attack was aborted
/// - `MatchEnded`: the final outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// A member is equipped and ready.
    CombatReady {
        /// Member's side
        side: Side,
        /// Member's character
        character: CharacterId,
        /// Character name
        name: String,
        /// Weapon name
        weapon: String,
        /// Armor name
        armor: String,
    },
    /// A round begins.
    RoundStarted {
        /// Round number, starting at 1
        round: u32,
    },
    /// An attack was resolved and applied.
    Attack {
        /// Round number
        round: u32,
        /// Attacking side
        side: Side,
        /// Attacking character
        attacker: CharacterId,
        /// Attacker name
        attacker_name: String,
        /// Targeted character
        target: CharacterId,
        /// Target name
        target_name: String,
        /// Weapon used
        weapon: String,
        /// Attack value before mitigation
        attack_value: f64,
        /// Damage after mitigation (may be negative)
        final_damage: f64,
    },
    /// An item reached zero durability. It stays equipped.
    ItemDestroyed {
        /// Character wearing it
        owner: CharacterId,
        /// Item name
        item: String,
    },
    /// A member was knocked out.
    KnockedOut {
        /// Side the member belongs to
        side: Side,
        /// Knocked out character
        character: CharacterId,
        /// Character name
        name: String,
    },
    /// An attack was aborted.
    AttackSkipped {
        /// Round number
        round: u32,
        /// Attacking side
        side: Side,
        /// Attacking member's character
        attacker: CharacterId,
        /// Why
        reason: SkipReason,
    },
    /// A round finished.
    RoundResolved {
        /// Round number
        round: u32,
    },
    /// The match is over.
    MatchEnded {
        /// Rounds played
        rounds: u32,
        /// Final outcome
        outcome: Outcome,
    },
}

/// Receives combat events as they happen.
pub trait CombatObserver {
    /// Called once per event, in order.
    fn on_event(&mut self, event: &CombatEvent);
}

impl<F: FnMut(&CombatEvent)> CombatObserver for F {
    fn on_event(&mut self, event: &CombatEvent) {
        self(event);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl CombatObserver for NullObserver {
    fn on_event(&mut self, _event: &CombatEvent) {}
}

/// Observer that keeps every event.
///
/// # Example
///
/// ```
/// use skirmish_core::combat::{CombatEvent, CombatObserver, EventLog};
///
/// let mut log = EventLog::new();
/// log.on_event(&CombatEvent::RoundStarted { round: 1 });
/// assert_eq!(log.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<CombatEvent>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Drains and returns all recorded events.
    pub fn take_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterates over attacks only.
    pub fn attacks(&self) -> impl Iterator<Item = &CombatEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Attack { .. }))
    }
}

impl CombatObserver for EventLog {
    fn on_event(&mut self, event: &CombatEvent) {
        self.events.push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_is_an_observer() {
        let mut rounds = Vec::new();
        {
            let mut observer = |e: &CombatEvent| {
                if let CombatEvent::RoundStarted { round } = e {
                    rounds.push(*round);
                }
            };
            observer.on_event(&CombatEvent::RoundStarted { round: 1 });
            observer.on_event(&CombatEvent::RoundResolved { round: 1 });
            observer.on_event(&CombatEvent::RoundStarted { round: 2 });
        }
        assert_eq!(rounds, vec![1, 2]);
    }

    #[test]
    fn log_keeps_order_and_drains() {
        let mut log = EventLog::new();
        log.on_event(&CombatEvent::RoundStarted { round: 1 });
        log.on_event(&CombatEvent::RoundResolved { round: 1 });
        assert_eq!(log.events()[0], CombatEvent::RoundStarted { round: 1 });
        assert_eq!(log.attacks().count(), 0);

        let drained = log.take_events();
        assert_eq!(drained.len(), 2);
        assert!(log.is_empty());
    }
}
