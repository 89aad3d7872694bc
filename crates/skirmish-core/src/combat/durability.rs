//! Durability tracking.
//!
//! Every resolved attack wears the attacker's weapon and the defender's
//! armor by one point, sentinels included. An item that reaches zero is
//! reported destroyed once but stays equipped and keeps its power.

use crate::entity::Gear;

/// Wears `gear` by one use.
///
/// Returns true only on the use that takes durability from positive to zero
/// or below; later uses keep decrementing without reporting again.
pub fn apply_usage(gear: &mut Gear) -> bool {
    let durability = gear.durability_mut();
    let before = *durability;
    *durability = before.saturating_sub(1);
    before > 0 && *durability <= 0
}
