//! Crate-level tests that drive whole matches.
//!
//! - `determinism.rs`: same seed, same match
//! - `integration.rs`: end-to-end scenarios through the round engine
//! - `helpers.rs`: factories for fighters, teams and catalogs

mod helpers;
mod integration;

pub use helpers::*;
