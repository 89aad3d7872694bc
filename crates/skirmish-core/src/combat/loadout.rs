//! Per-match equipment.
//!
//! Item records are never worn directly: at match start each fighter gets a
//! [`Loadout`] holding copies, so wear stays local to the match and the
//! permanent records are untouched unless a caller chooses to persist the
//! final durabilities from the match report.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entity::{Gear, Item, ItemClass};

/// One weapon slot and one armor slot, each always resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    /// Weapon slot
    pub weapon: Gear,
    /// Armor slot
    pub armor: Gear,
}

impl Loadout {
    /// Creates a loadout from two resolved slots.
    #[must_use]
    pub fn new(weapon: Gear, armor: Gear) -> Self {
        debug_assert_eq!(weapon.class(), ItemClass::Weapon);
        debug_assert_eq!(armor.class(), ItemClass::Armor);
        Self { weapon, armor }
    }

    /// Both slots hold the sentinel.
    #[must_use]
    pub const fn bare() -> Self {
        Self {
            weapon: Gear::empty(ItemClass::Weapon),
            armor: Gear::empty(ItemClass::Armor),
        }
    }
}

impl Default for Loadout {
    fn default() -> Self {
        Self::bare()
    }
}

fn pick<R: Rng + ?Sized>(items: &[Item], class: ItemClass, rng: &mut R) -> Gear {
    let candidates: Vec<&Item> = items.iter().filter(|i| i.class == class).collect();
    candidates
        .choose(rng)
        .map_or_else(|| Gear::empty(class), |item| Gear::Equipped((*item).clone()))
}

/// Draws a random weapon and a random armor from `items`.
///
/// A class with no item in the pool yields the sentinel for that slot.
pub fn assign_loadout<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Loadout {
    let weapon = pick(items, ItemClass::Weapon, rng);
    let armor = pick(items, ItemClass::Armor, rng);
    Loadout::new(weapon, armor)
}
