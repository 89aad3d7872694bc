//! Knockout evaluation.
//!
//! Two stages, checked against the same character:
//!
//! 1. Damage at or above `1.0` knocks out unconditionally.
//! 2. Otherwise an integer is drawn uniformly from `1..=200`; the character
//!    is knocked out if the draw is strictly greater than its damage.
//!
//! Damage below `1.0` is a fraction, so stage two succeeds on every draw.

use rand::Rng;

use crate::entity::Character;
use crate::team::Member;

/// Smallest knockout draw.
pub const DRAW_MIN: u32 = 1;
/// Largest knockout draw.
pub const DRAW_MAX: u32 = 200;
/// Damage at which the knockout is certain.
pub const CERTAIN_KNOCKOUT: f64 = 1.0;

/// Runs the two-stage check for a character with `damage`.
pub fn knockout_check<R: Rng + ?Sized>(damage: f64, rng: &mut R) -> bool {
    if damage >= CERTAIN_KNOCKOUT {
        return true;
    }
    let draw = rng.gen_range(DRAW_MIN..=DRAW_MAX);
    f64::from(draw) > damage
}

/// Probability that [`knockout_check`] returns true for `damage`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn knockout_probability(damage: f64) -> f64 {
    if damage >= CERTAIN_KNOCKOUT {
        return 1.0;
    }
    let winning = (DRAW_MIN..=DRAW_MAX)
        .filter(|&draw| f64::from(draw) > damage)
        .count();
    winning as f64 / f64::from(DRAW_MAX - DRAW_MIN + 1)
}

/// Evaluates `member` after its character took a hit.
///
/// Sets the member's knockout flag when the check succeeds and returns the
/// flag. Once knocked out the member stays knocked out and no draw is made.
pub fn evaluate<R: Rng + ?Sized>(character: &Character, member: &mut Member, rng: &mut R) -> bool {
    if member.is_knocked_out() {
        return true;
    }
    if knockout_check(character.accumulated_damage(), rng) {
        member.knock_out();
    }
    member.is_knocked_out()
}
