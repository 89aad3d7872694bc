//! # Skirmish Core
//!
//! Turn-based team combat engine for Skirmish.
//!
//! Two teams of weighted characters, each member carrying one weapon and one
//! armor, trade blows round after round until one side (or both) is
//! eliminated. This crate holds the combat resolution engine together with
//! the data it consumes:
//!
//! - **Entities**: characters, items and the "no item" sentinel ([`entity`])
//! - **Teams**: ordered members with a per-match knockout flag ([`team`])
//! - **Store**: read access to the persisted records ([`store`])
//! - **Stats**: per-team match bookkeeping ([`stats`])
//! - **Combat**: attack resolution, durability, knockouts, the round engine
//!   and the outcome report ([`combat`])
//!
//! ## Usage
//!
//! ```rust,ignore
//! use skirmish_core::combat::{Combat, EventLog, RoundEngine};
//! use skirmish_core::config::CombatConfig;
//! use skirmish_core::store::{Catalog, DataPaths, EntityStore};
//!
//! let catalog = Catalog::load(&DataPaths::new("Data"))?;
//! let config = CombatConfig::default().with_seed(42);
//! let mut rng = config.rng();
//! let combat = Combat::prepare(&catalog, &catalog.teams()[0], &catalog.teams()[1], &mut rng);
//! let mut engine = RoundEngine::new(combat, config, rng);
//! let report = engine.run(&mut EventLog::new());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod combat;
pub mod config;
pub mod entity;
pub mod error;
pub mod stats;
pub mod store;
pub mod team;

pub use combat::{Combat, MatchReport, Outcome, RoundEngine, RoundPhase};
pub use config::CombatConfig;
pub use entity::{Character, CharacterId, Gear, Item, ItemClass, ItemId};
pub use error::StoreError;
pub use stats::{Stats, StatsBook, StatsDelta};
pub use store::{Catalog, DataPaths, EntityStore};
pub use team::{Member, Side, Team};

#[cfg(test)]
mod tests;
