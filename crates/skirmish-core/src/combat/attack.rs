//! Attack resolution.
//!
//! ```text
//! attack  = weight_a * (1 - damage_a) / 10 + weapon_power / 20 + 18
//! defense = (200 * (1 - damage_d) / weight_d + armor_power / 20) * 1.4
//! damage  = attack - defense
//! ```
//!
//! The result is not clamped: a defense stronger than the attack yields a
//! negative value. Callers apply it through [`Character::take_damage`],
//! which ignores negative amounts.
//!
//! [`Character::take_damage`]: crate::entity::Character::take_damage

use serde::{Deserialize, Serialize};

use super::Fighter;

/// Divisor applied to attacker weight.
pub const WEIGHT_DIVISOR: f64 = 10.0;
/// Divisor applied to weapon and armor power.
pub const POWER_DIVISOR: f64 = 20.0;
/// Flat attack bonus.
pub const BASE_ATTACK: f64 = 18.0;
/// Numerator of the weight-based defense term.
pub const DEFENSE_WEIGHT_FACTOR: f64 = 200.0;
/// Multiplier applied to the whole defense term.
pub const DEFENSE_MULTIPLIER: f64 = 1.4;

/// The two values produced by one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Strike {
    /// Raw attack value before mitigation
    pub attack_value: f64,
    /// Damage after mitigation; may be negative
    pub final_damage: f64,
}

/// Attack value of `attacker` with its current weapon and damage.
#[must_use]
pub fn attack_value(attacker: &Fighter) -> f64 {
    let weight = f64::from(attacker.character.weight());
    let damage = attacker.character.accumulated_damage();
    let power = f64::from(attacker.loadout.weapon.power());

    (weight * (1.0 - damage) / WEIGHT_DIVISOR) + (power / POWER_DIVISOR) + BASE_ATTACK
}

/// Mitigation `defender` applies to any incoming attack.
#[must_use]
pub fn defense_value(defender: &Fighter) -> f64 {
    let weight = f64::from(defender.character.weight());
    let damage = defender.character.accumulated_damage();
    let power = f64::from(defender.loadout.armor.power());

    (DEFENSE_WEIGHT_FACTOR * (1.0 - damage) / weight + power / POWER_DIVISOR) * DEFENSE_MULTIPLIER
}

/// Damage left after `defender` mitigates `attack`.
#[must_use]
pub fn final_damage(attack: f64, defender: &Fighter) -> f64 {
    attack - defense_value(defender)
}

/// Resolves one attack. Pure: reads both fighters, mutates nothing.
#[must_use]
pub fn resolve_attack(attacker: &Fighter, defender: &Fighter) -> Strike {
    let attack_value = attack_value(attacker);
    Strike {
        attack_value,
        final_damage: final_damage(attack_value, defender),
    }
}
