//! Combat module: everything that happens between "combat ready" and the
//! final verdict.
//!
//! # Architecture
//!
//! - [`Combat`]: the two teams plus the match roster of [`Fighter`]s
//! - [`attack`]: pure attack/defense formulas
//! - [`durability`]: per-use gear wear
//! - [`knockout`]: the two-stage knockout check
//! - [`RoundEngine`]: the round state machine driving the above
//! - [`MatchReport`]: outcome, stats deltas and final ledgers
//! - [`CombatEvent`] / [`CombatObserver`]: notifications for presentation
//!
//! # Sources of truth
//!
//! Damage is tracked only on [`Character::accumulated_damage`] of the
//! fighter in the roster. A team is eliminated when every member's
//! character is eliminated (damage above `1.0`). The member knockout flag
//! only decides who still gets to attack.
//!
//! [`Character::accumulated_damage`]: crate::entity::Character::accumulated_damage

pub mod attack;
pub mod durability;
mod engine;
mod event;
pub mod knockout;
mod loadout;
mod outcome;

use std::collections::BTreeMap;

use rand::Rng;
use serde::Serialize;
use tracing::warn;

use crate::entity::{Character, CharacterId};
use crate::store::EntityStore;
use crate::team::{Side, Team};

pub use attack::{resolve_attack, Strike};
pub use durability::apply_usage;
pub use engine::{RoundEngine, RoundPhase};
pub use event::{CombatEvent, CombatObserver, EventLog, NullObserver, SkipReason};
pub use knockout::evaluate;
pub use loadout::{assign_loadout, Loadout};
pub use outcome::{DrawReason, FighterReport, MatchReport, Outcome};

/// A character as it fights in one match: its damage ledger plus the gear
/// it was handed for this match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fighter {
    /// The character and its damage ledger
    pub character: Character,
    /// Per-match equipment
    pub loadout: Loadout,
}

impl Fighter {
    /// Pairs a character with its loadout.
    #[must_use]
    pub fn new(character: Character, loadout: Loadout) -> Self {
        Self { character, loadout }
    }
}

/// State of one match.
///
/// Holds both teams (member order is attack order) and a roster with one
/// [`Fighter`] per distinct character. A character listed on both teams
/// shares a single ledger.
#[derive(Debug, Clone)]
pub struct Combat {
    teams: [Team; 2],
    roster: BTreeMap<CharacterId, Fighter>,
}

impl Combat {
    /// Creates a match from teams and already equipped fighters.
    ///
    /// Members without a fighter stay in their team; their attacks are
    /// skipped and they count as eliminated.
    pub fn new(team1: Team, team2: Team, fighters: impl IntoIterator<Item = Fighter>) -> Self {
        let roster = fighters
            .into_iter()
            .map(|f| (f.character.id(), f))
            .collect();
        Self {
            teams: [team1, team2],
            roster,
        }
    }

    /// Resolves every member against `store` and hands out random gear
    /// from the store's item pool.
    ///
    /// Members whose character is not in the store are logged and left
    /// without a fighter.
    pub fn prepare<S, R>(store: &S, team1: &Team, team2: &Team, rng: &mut R) -> Self
    where
        S: EntityStore + ?Sized,
        R: Rng + ?Sized,
    {
        let mut roster = BTreeMap::new();
        for team in [team1, team2] {
            for member in &team.members {
                if roster.contains_key(&member.id) {
                    continue;
                }
                match store.character(member.id) {
                    Some(character) => {
                        let loadout = assign_loadout(store.items(), rng);
                        roster.insert(member.id, Fighter::new(character.clone(), loadout));
                    }
                    None => warn!(
                        team = %team.name,
                        character = %member.id,
                        "member has no character record"
                    ),
                }
            }
        }
        Self {
            teams: [team1.clone(), team2.clone()],
            roster,
        }
    }

    /// One of the two teams.
    #[must_use]
    pub fn team(&self, side: Side) -> &Team {
        &self.teams[side.index()]
    }

    /// The fighter for a character, if it is in the roster.
    #[must_use]
    pub fn fighter(&self, id: CharacterId) -> Option<&Fighter> {
        self.roster.get(&id)
    }

    /// All fighters in id order.
    pub fn fighters(&self) -> impl Iterator<Item = &Fighter> {
        self.roster.values()
    }

    /// Returns true when every member of `side` is eliminated.
    ///
    /// Members without a fighter count as eliminated, and so does an empty
    /// team. The knockout flag plays no part here.
    #[must_use]
    pub fn is_eliminated(&self, side: Side) -> bool {
        self.team(side).members.iter().all(|m| {
            self.roster
                .get(&m.id)
                .map_or(true, |f| f.character.is_eliminated())
        })
    }

    /// One status line per member: `"name - K.O."` or `"name - 12.50% damage"`.
    #[must_use]
    pub fn summary(&self, side: Side) -> Vec<String> {
        self.team(side)
            .members
            .iter()
            .map(|m| {
                let name = self
                    .roster
                    .get(&m.id)
                    .map_or_else(|| format!("#{}", m.id), |f| f.character.name().to_string());
                if m.is_knocked_out() {
                    format!("{name} - K.O.")
                } else {
                    let damage = self
                        .roster
                        .get(&m.id)
                        .map_or(0.0, |f| f.character.accumulated_damage());
                    format!("{name} - {:.2}% damage", damage * 100.0)
                }
            })
            .collect()
    }
}
