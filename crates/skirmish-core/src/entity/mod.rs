//! Entity module: the records combat is fought with.
//!
//! - [`CharacterId`] / [`ItemId`]: typed identifiers
//! - [`Character`]: a weighted fighter carrying the combat damage ledger
//! - [`Item`]: a weapon or armor record
//! - [`Gear`]: an equipped item, or the "no item" sentinel
//!
//! # Damage ledger
//!
//! [`Character::accumulated_damage`] is the single source of truth for harm
//! taken during a match. It is a fraction of the maximum where anything above
//! `1.0` means the character is eliminated.
//!
//! # Example
//!
//! ```
//! use skirmish_core::entity::{Character, CharacterId};
//!
//! let mut brute = Character::new(CharacterId::new(1), "Brute", 90).unwrap();
//! assert!(!brute.is_eliminated());
//!
//! brute.take_damage(1.5);
//! assert!(brute.is_eliminated());
//! ```

pub mod item;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::StoreError;

pub use item::{Gear, Item, ItemClass, ItemId};

/// Unique identifier for a character.
///
/// Newtype over the numeric id used in `characters.json` and in team member
/// lists.
///
/// # Example
///
/// ```
/// use skirmish_core::entity::CharacterId;
///
/// let id = CharacterId::new(3);
/// assert_eq!(id.as_u32(), 3);
/// assert!(CharacterId::new(1) < id);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(u32);

impl CharacterId {
    /// Creates a new `CharacterId` from a raw value.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw value of this identifier.
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CharacterId({})", self.0)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        Self::new(id)
    }
}

/// A fighter.
///
/// Characters are identified by id, carry a positive weight in kilograms and
/// accumulate damage over a match. A weight of zero is rejected at
/// construction because the defense formula divides by it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Character {
    id: CharacterId,
    name: String,
    weight: u32,
    accumulated_damage: f64,
}

impl Character {
    /// Damage above which a character is eliminated.
    pub const ELIMINATION_THRESHOLD: f64 = 1.0;

    /// Creates a character with an empty damage ledger.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidWeight`] if `weight` is zero.
    pub fn new(id: CharacterId, name: impl Into<String>, weight: u32) -> Result<Self, StoreError> {
        let name = name.into();
        if weight == 0 {
            return Err(StoreError::InvalidWeight { id, name });
        }
        Ok(Self {
            id,
            name,
            weight,
            accumulated_damage: 0.0,
        })
    }

    /// Returns the character id.
    #[must_use]
    pub const fn id(&self) -> CharacterId {
        self.id
    }

    /// Returns the character name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weight in kilograms (always positive).
    #[must_use]
    pub const fn weight(&self) -> u32 {
        self.weight
    }

    /// Returns the accumulated damage fraction.
    #[must_use]
    pub const fn accumulated_damage(&self) -> f64 {
        self.accumulated_damage
    }

    /// Adds damage to the ledger.
    ///
    /// Negative amounts (a defense stronger than the attack) leave the ledger
    /// untouched, so the ledger never decreases within a match.
    pub fn take_damage(&mut self, amount: f64) {
        if amount > 0.0 {
            self.accumulated_damage += amount;
        }
    }

    /// Returns true once accumulated damage is strictly above `1.0`.
    #[must_use]
    pub fn is_eliminated(&self) -> bool {
        self.accumulated_damage > Self::ELIMINATION_THRESHOLD
    }

    /// Multi-line description used by listings.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "\tID: {}\n\tNAME: {}\n\tWEIGHT: {} kg",
            self.id, self.name, self.weight
        )
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod character_id_tests {
        use super::*;

        #[test]
        fn ordering_follows_raw_value() {
            assert!(CharacterId::new(1) < CharacterId::new(2));
            assert_eq!(CharacterId::from(9).as_u32(), 9);
        }

        #[test]
        fn serializes_as_plain_number() {
            let json = serde_json::to_string(&CharacterId::new(12)).unwrap();
            assert_eq!(json, "12");
        }
    }

    mod character_tests {
        use super::*;

        #[test]
        fn zero_weight_is_rejected() {
            let err = Character::new(CharacterId::new(1), "Feather", 0).unwrap_err();
            assert!(matches!(err, StoreError::InvalidWeight { .. }));
        }

        #[test]
        fn new_character_is_undamaged() {
            let c = Character::new(CharacterId::new(1), "Tank", 120).unwrap();
            assert_eq!(c.accumulated_damage(), 0.0);
            assert!(!c.is_eliminated());
        }

        #[test]
        fn exactly_one_is_not_eliminated() {
            let mut c = Character::new(CharacterId::new(1), "Edge", 70).unwrap();
            c.take_damage(1.0);
            assert!(!c.is_eliminated());
            c.take_damage(0.01);
            assert!(c.is_eliminated());
        }

        #[test]
        fn negative_damage_leaves_ledger_untouched() {
            let mut c = Character::new(CharacterId::new(1), "Wall", 70).unwrap();
            c.take_damage(0.4);
            c.take_damage(-12.5);
            assert!((c.accumulated_damage() - 0.4).abs() < 1e-12);
        }

        #[test]
        fn details_lists_id_name_and_weight() {
            let c = Character::new(CharacterId::new(5), "Mira", 64).unwrap();
            assert_eq!(c.details(), "\tID: 5\n\tNAME: Mira\n\tWEIGHT: 64 kg");
            assert_eq!(c.to_string(), "5 Mira");
        }
    }
}
