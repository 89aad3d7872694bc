//! Factories for test matches.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::{Combat, Fighter, Loadout, RoundEngine};
use crate::config::CombatConfig;
use crate::entity::{Character, CharacterId, Gear, Item, ItemClass, ItemId};
use crate::store::Catalog;
use crate::team::{Member, Team};

// =============================================================================
// Entities
// =============================================================================

/// A character with the given weight and no damage.
pub fn character(id: u32, name: &str, weight: u32) -> Character {
    Character::new(CharacterId::new(id), name, weight).expect("test weights are positive")
}

/// A weapon with the given power and durability.
pub fn weapon(id: u32, power: i32, durability: i32) -> Item {
    Item::new(ItemId::new(id), format!("Weapon {id}"), ItemClass::Weapon, power, durability)
}

/// An armor with the given power and durability.
pub fn armor(id: u32, power: i32, durability: i32) -> Item {
    Item::new(ItemId::new(id), format!("Armor {id}"), ItemClass::Armor, power, durability)
}

/// A fighter wearing one weapon and one armor with durability 10.
pub fn armed_fighter(id: u32, name: &str, weight: u32, weapon_power: i32, armor_power: i32) -> Fighter {
    Fighter::new(
        character(id, name, weight),
        Loadout::new(
            Gear::Equipped(weapon(id * 100, weapon_power, 10)),
            Gear::Equipped(armor(id * 100 + 1, armor_power, 10)),
        ),
    )
}

/// A fighter with both slots empty.
pub fn bare_fighter(id: u32, name: &str, weight: u32) -> Fighter {
    Fighter::new(character(id, name, weight), Loadout::bare())
}

// =============================================================================
// Teams and matches
// =============================================================================

/// A team whose members are `ids`, in order.
pub fn team(name: &str, ids: &[u32]) -> Team {
    Team::new(
        name,
        ids.iter()
            .map(|&id| Member::new(CharacterId::new(id), "balanced"))
            .collect(),
    )
}

/// A seeded engine with the given round limit.
pub fn seeded_engine(combat: Combat, seed: u64, max_rounds: u32) -> RoundEngine {
    let config = CombatConfig::default()
        .with_seed(seed)
        .with_max_rounds(max_rounds);
    let rng = config.rng();
    RoundEngine::new(combat, config, rng)
}

/// Six characters, a few items of each class and two three-member teams.
pub fn league_catalog() -> Catalog {
    let characters = vec![
        character(1, "Aldo", 80),
        character(2, "Brina", 65),
        character(3, "Corvo", 95),
        character(4, "Dalia", 55),
        character(5, "Enzo", 72),
        character(6, "Fiora", 60),
    ];
    let items = vec![
        weapon(10, 50, 3),
        weapon(11, 120, 2),
        weapon(12, 20, 8),
        armor(20, 10, 4),
        armor(21, 60, 2),
        armor(22, 200, 1),
    ];
    let teams = vec![team("Wolves", &[1, 2, 3]), team("Ravens", &[4, 5, 6])];
    Catalog::new(characters, items, teams)
}

/// Seeded rng for match preparation.
pub fn prep_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}
