//! Items and equipped gear.
//!
//! An [`Item`] is either a weapon or an armor, never both. During a match a
//! fighter wears [`Gear`]: a copy of an item, or the explicit "no item"
//! sentinel which has zero power and zero durability and flows through the
//! damage formulas exactly like a real item.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    /// Creates a new `ItemId` from a raw value.
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

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item class. Serialized as `"Weapon"` / `"Armor"`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemClass {
    /// Offensive item; its power feeds the attack value.
    Weapon,
    /// Defensive item; its power feeds the defense term.
    Armor,
}

impl fmt::Display for ItemClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weapon => write!(f, "Weapon"),
            Self::Armor => write!(f, "Armor"),
        }
    }
}

/// A weapon or armor record as stored in `items.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item id
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Weapon or armor
    pub class: ItemClass,
    /// Offense or defense magnitude
    pub power: i32,
    /// Remaining uses; may go negative during a match
    pub durability: i32,
}

impl Item {
    /// Creates an item record.
    #[must_use]
    pub fn new(id: ItemId, name: impl Into<String>, class: ItemClass, power: i32, durability: i32) -> Self {
        Self {
            id,
            name: name.into(),
            class,
            power,
            durability,
        }
    }

    /// Returns true for weapons.
    #[must_use]
    pub fn is_weapon(&self) -> bool {
        self.class == ItemClass::Weapon
    }

    /// Returns true for armors.
    #[must_use]
    pub fn is_armor(&self) -> bool {
        self.class == ItemClass::Armor
    }

    /// Multi-line description used by listings.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "\tID: {}\n\tNAME: {}\n\tCLASS: {}\n\tPOWER: {}\n\tDURABILITY: {}",
            self.id, self.name, self.class, self.power, self.durability
        )
    }
}

/// Gear worn for the length of one match.
///
/// # Variants
///
/// - `Equipped`: a per-match copy of an item record
/// - `Empty`: the "no weapon" / "no armor" sentinel (power 0, durability
///   starting at 0). Its durability still decreases on use so the sentinel
///   behaves like any other gear.
///
/// # Example
///
/// ```
/// use skirmish_core::entity::{Gear, ItemClass};
///
/// let bare = Gear::empty(ItemClass::Armor);
/// assert_eq!(bare.power(), 0);
/// assert_eq!(bare.name(), "No armor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gear {
    /// A real item.
    Equipped(Item),
    /// No item of this class is worn.
    Empty {
        /// Slot class the sentinel stands in for
        class: ItemClass,
        /// Wear counter
        durability: i32,
    },
}

impl Gear {
    /// The sentinel for `class`.
    #[must_use]
    pub const fn empty(class: ItemClass) -> Self {
        Self::Empty {
            class,
            durability: 0,
        }
    }

    /// Returns the power fed into the damage formulas.
    #[must_use]
    pub fn power(&self) -> i32 {
        match self {
            Self::Equipped(item) => item.power,
            Self::Empty { .. } => 0,
        }
    }

    /// Returns the remaining durability.
    #[must_use]
    pub fn durability(&self) -> i32 {
        match self {
            Self::Equipped(item) => item.durability,
            Self::Empty { durability, .. } => *durability,
        }
    }

    /// Mutable access to the durability counter.
    pub(crate) fn durability_mut(&mut self) -> &mut i32 {
        match self {
            Self::Equipped(item) => &mut item.durability,
            Self::Empty { durability, .. } => durability,
        }
    }

    /// Returns the slot class.
    #[must_use]
    pub fn class(&self) -> ItemClass {
        match self {
            Self::Equipped(item) => item.class,
            Self::Empty { class, .. } => *class,
        }
    }

    /// Returns the display name; the sentinel reads "No weapon" / "No armor".
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Equipped(item) => &item.name,
            Self::Empty {
                class: ItemClass::Weapon,
                ..
            } => "No weapon",
            Self::Empty {
                class: ItemClass::Armor,
                ..
            } => "No armor",
        }
    }

    /// Returns the underlying item, if any.
    #[must_use]
    pub fn item(&self) -> Option<&Item> {
        match self {
            Self::Equipped(item) => Some(item),
            Self::Empty { .. } => None,
        }
    }

    /// Returns true for the sentinel.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }
}

impl From<Item> for Gear {
    fn from(item: Item) -> Self {
        Self::Equipped(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new(ItemId::new(1), "Sword", ItemClass::Weapon, 40, 3)
    }

    mod item_tests {
        use super::*;

        #[test]
        fn class_predicates_are_exclusive() {
            let item = sword();
            assert!(item.is_weapon());
            assert!(!item.is_armor());
        }

        #[test]
        fn deserializes_record_field_names() {
            let json = r#"{"id": 7, "name": "Shield", "class": "Armor", "power": 20, "durability": 5}"#;
            let item: Item = serde_json::from_str(json).unwrap();
            assert_eq!(item.id, ItemId::new(7));
            assert_eq!(item.class, ItemClass::Armor);
            assert_eq!(item.power, 20);
        }

        #[test]
        fn unknown_class_is_rejected() {
            let json = r#"{"id": 7, "name": "Ring", "class": "Trinket", "power": 1, "durability": 1}"#;
            assert!(serde_json::from_str::<Item>(json).is_err());
        }

        #[test]
        fn missing_field_is_rejected() {
            let json = r#"{"id": 7, "name": "Shield", "class": "Armor", "power": 20}"#;
            assert!(serde_json::from_str::<Item>(json).is_err());
        }

        #[test]
        fn serializes_class_field() {
            let json = serde_json::to_value(sword()).unwrap();
            assert_eq!(json["class"], "Weapon");
        }
    }

    mod gear_tests {
        use super::*;

        #[test]
        fn sentinel_has_no_power_or_durability() {
            let gear = Gear::empty(ItemClass::Weapon);
            assert_eq!(gear.power(), 0);
            assert_eq!(gear.durability(), 0);
            assert_eq!(gear.name(), "No weapon");
            assert!(gear.is_empty());
            assert!(gear.item().is_none());
        }

        #[test]
        fn equipped_reports_item_values() {
            let gear = Gear::from(sword());
            assert_eq!(gear.power(), 40);
            assert_eq!(gear.durability(), 3);
            assert_eq!(gear.class(), ItemClass::Weapon);
            assert_eq!(gear.name(), "Sword");
        }

        #[test]
        fn durability_mut_reaches_both_variants() {
            let mut bare = Gear::empty(ItemClass::Armor);
            *bare.durability_mut() -= 1;
            assert_eq!(bare.durability(), -1);

            let mut real = Gear::from(sword());
            *real.durability_mut() -= 1;
            assert_eq!(real.durability(), 2);
        }
    }
}
