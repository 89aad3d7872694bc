//! Round state machine.
//!
//! A match moves through [`RoundPhase`]s:
//!
//! ```text
//! AwaitingRound -> RoundInProgress -> RoundResolved -> AwaitingRound ...
//!                                                   \-> Team1Eliminated
//!                                                   \-> Team2Eliminated
//!                                                   \-> BothEliminated
//!                                                   \-> RoundCapReached
//! ```
//!
//! In every round Team 1's standing members attack in roster order, then
//! Team 2's. Standing is checked at the moment a member's turn comes up, so
//! a member knocked out earlier in the round does not attack. Elimination
//! is checked only once the round is fully resolved.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::attack::resolve_attack;
use super::durability::apply_usage;
use super::event::{CombatEvent, CombatObserver, SkipReason};
use super::knockout;
use super::outcome::{MatchReport, Outcome};
use super::Combat;
use crate::config::CombatConfig;
use crate::team::Side;

/// Where a match currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ready to start the next round.
    AwaitingRound,
    /// Attacks of the current round are being resolved.
    RoundInProgress,
    /// All attacks done, elimination not yet checked.
    RoundResolved,
    /// Team 1 is eliminated; Team 2 wins.
    Team1Eliminated,
    /// Team 2 is eliminated; Team 1 wins.
    Team2Eliminated,
    /// Both teams fell in the same round.
    BothEliminated,
    /// The round limit was hit with both teams still in.
    RoundCapReached,
}

impl RoundPhase {
    /// Returns true once the match is over.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Team1Eliminated
                | Self::Team2Eliminated
                | Self::BothEliminated
                | Self::RoundCapReached
        )
    }
}

/// Drives a [`Combat`] round by round.
///
/// The engine owns its random source. Given the same combat, config and
/// seeded rng, a match replays identically.
///
/// # Example
///
/// ```ignore
/// let mut engine = RoundEngine::new(combat, CombatConfig::default().with_seed(7), rng);
/// while !engine.phase().is_terminal() {
///     engine.step_round(&mut log);
/// }
/// ```
#[derive(Debug)]
pub struct RoundEngine<R = ChaCha8Rng> {
    combat: Combat,
    config: CombatConfig,
    rng: R,
    phase: RoundPhase,
    round: u32,
    knockouts: [u32; 2],
    announced: bool,
}

impl<R: Rng> RoundEngine<R> {
    /// Creates an engine positioned before round 1.
    pub fn new(combat: Combat, config: CombatConfig, rng: R) -> Self {
        Self {
            combat,
            config,
            rng,
            phase: RoundPhase::AwaitingRound,
            round: 0,
            knockouts: [0; 2],
            announced: false,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Number of rounds started so far.
    #[must_use]
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// The match state.
    #[must_use]
    pub const fn combat(&self) -> &Combat {
        &self.combat
    }

    /// Knockouts inflicted by each side, indexed by [`Side::index`].
    #[must_use]
    pub const fn knockouts(&self) -> [u32; 2] {
        self.knockouts
    }

    /// Report for the match, available once it is over.
    #[must_use]
    pub fn report(&self) -> Option<MatchReport> {
        Outcome::from_phase(self.phase)
            .map(|outcome| MatchReport::new(&self.combat, self.round, outcome, self.knockouts))
    }

    /// Emits one `CombatReady` event per rostered member. Runs once.
    pub fn announce<O: CombatObserver + ?Sized>(&mut self, observer: &mut O) {
        if self.announced {
            return;
        }
        self.announced = true;
        for side in Side::BOTH {
            for member in &self.combat.team(side).members {
                if let Some(fighter) = self.combat.fighter(member.id) {
                    observer.on_event(&CombatEvent::CombatReady {
                        side,
                        character: member.id,
                        name: fighter.character.name().to_string(),
                        weapon: fighter.loadout.weapon.name().to_string(),
                        armor: fighter.loadout.armor.name().to_string(),
                    });
                }
            }
        }
    }

    /// Plays one full round and returns the resulting phase.
    ///
    /// Does nothing once the match is over. If the round limit is already
    /// reached the match ends as a draw without playing.
    pub fn step_round<O: CombatObserver + ?Sized>(&mut self, observer: &mut O) -> RoundPhase {
        if self.phase.is_terminal() {
            return self.phase;
        }
        if self.round >= self.config.max_rounds {
            self.phase = RoundPhase::RoundCapReached;
            return self.phase;
        }

        self.round += 1;
        self.phase = RoundPhase::RoundInProgress;
        debug!(round = self.round, "round started");
        observer.on_event(&CombatEvent::RoundStarted { round: self.round });

        for side in Side::BOTH {
            self.run_turns(side, observer);
        }

        self.phase = RoundPhase::RoundResolved;
        observer.on_event(&CombatEvent::RoundResolved { round: self.round });

        self.phase = self.check_elimination();
        debug!(round = self.round, phase = ?self.phase, "round resolved");
        self.phase
    }

    /// Plays rounds until the match is over and returns the report.
    ///
    /// Emits the roll call first if [`announce`](Self::announce) was not
    /// called yet, and `MatchEnded` last.
    pub fn run<O: CombatObserver + ?Sized>(&mut self, observer: &mut O) -> MatchReport {
        self.announce(observer);
        info!(
            team1 = %self.combat.team(Side::Team1).name,
            team2 = %self.combat.team(Side::Team2).name,
            max_rounds = self.config.max_rounds,
            "match started"
        );

        loop {
            if let Some(outcome) = Outcome::from_phase(self.phase) {
                let report = MatchReport::new(&self.combat, self.round, outcome, self.knockouts);
                observer.on_event(&CombatEvent::MatchEnded {
                    rounds: self.round,
                    outcome,
                });
                info!(rounds = self.round, ?outcome, "match ended");
                return report;
            }
            self.step_round(observer);
        }
    }

    fn check_elimination(&self) -> RoundPhase {
        let team1_out = self.combat.is_eliminated(Side::Team1);
        let team2_out = self.combat.is_eliminated(Side::Team2);
        match (team1_out, team2_out) {
            (true, true) => RoundPhase::BothEliminated,
            (true, false) => RoundPhase::Team1Eliminated,
            (false, true) => RoundPhase::Team2Eliminated,
            (false, false) if self.round >= self.config.max_rounds => RoundPhase::RoundCapReached,
            (false, false) => RoundPhase::AwaitingRound,
        }
    }

    fn run_turns<O: CombatObserver + ?Sized>(&mut self, side: Side, observer: &mut O) {
        let count = self.combat.teams[side.index()].members.len();
        for slot in 0..count {
            if self.combat.teams[side.index()].members[slot].is_knocked_out() {
                continue;
            }
            self.attack(side, slot, observer);
        }
    }

    fn skip<O: CombatObserver + ?Sized>(
        &self,
        side: Side,
        slot: usize,
        reason: SkipReason,
        observer: &mut O,
    ) {
        let attacker = self.combat.teams[side.index()].members[slot].id;
        warn!(round = self.round, %side, %attacker, ?reason, "attack skipped");
        observer.on_event(&CombatEvent::AttackSkipped {
            round: self.round,
            side,
            attacker,
            reason,
        });
    }

    /// One member of `side` attacks a random member of the other side.
    ///
    /// Knocked out members stay valid targets.
    fn attack<O: CombatObserver + ?Sized>(&mut self, side: Side, slot: usize, observer: &mut O) {
        let foe = side.opponent();
        let attacker_id = self.combat.teams[side.index()].members[slot].id;

        let target_count = self.combat.teams[foe.index()].members.len();
        if target_count == 0 {
            self.skip(side, slot, SkipReason::NoTargets, observer);
            return;
        }
        let target_slot = self.rng.gen_range(0..target_count);
        let target_id = self.combat.teams[foe.index()].members[target_slot].id;

        let Some(attacker) = self.combat.roster.get(&attacker_id) else {
            self.skip(side, slot, SkipReason::MissingAttacker, observer);
            return;
        };
        let Some(defender) = self.combat.roster.get(&target_id) else {
            self.skip(side, slot, SkipReason::MissingTarget, observer);
            return;
        };

        let strike = resolve_attack(attacker, defender);
        let attacker_name = attacker.character.name().to_string();
        let weapon = attacker.loadout.weapon.name().to_string();

        let Combat { teams, roster } = &mut self.combat;

        let Some(defender) = roster.get_mut(&target_id) else {
            return;
        };
        defender.character.take_damage(strike.final_damage);
        let target_name = defender.character.name().to_string();
        debug!(
            round = self.round,
            attacker = %attacker_name,
            target = %target_name,
            attack = strike.attack_value,
            damage = strike.final_damage,
            total = defender.character.accumulated_damage(),
            "attack resolved"
        );
        observer.on_event(&CombatEvent::Attack {
            round: self.round,
            side,
            attacker: attacker_id,
            attacker_name,
            target: target_id,
            target_name: target_name.clone(),
            weapon,
            attack_value: strike.attack_value,
            final_damage: strike.final_damage,
        });

        // Weapon wears before armor.
        if let Some(attacker) = roster.get_mut(&attacker_id) {
            if apply_usage(&mut attacker.loadout.weapon) {
                observer.on_event(&CombatEvent::ItemDestroyed {
                    owner: attacker_id,
                    item: attacker.loadout.weapon.name().to_string(),
                });
            }
        }
        if let Some(defender) = roster.get_mut(&target_id) {
            if apply_usage(&mut defender.loadout.armor) {
                observer.on_event(&CombatEvent::ItemDestroyed {
                    owner: target_id,
                    item: defender.loadout.armor.name().to_string(),
                });
            }
        }

        let Some(defender) = roster.get(&target_id) else {
            return;
        };
        let member = &mut teams[foe.index()].members[target_slot];
        let was_out = member.is_knocked_out();
        if knockout::evaluate(&defender.character, member, &mut self.rng) && !was_out {
            self.knockouts[side.index()] += 1;
            info!(round = self.round, name = %target_name, "knocked out");
            observer.on_event(&CombatEvent::KnockedOut {
                side: foe,
                character: target_id,
                name: target_name,
            });
        }
    }
}
