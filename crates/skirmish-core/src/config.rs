//! Match configuration.

use std::path::Path;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

/// Configuration for one match.
///
/// # Example
///
/// ```
/// use skirmish_core::config::CombatConfig;
///
/// let config = CombatConfig::default().with_seed(7);
/// assert_eq!(config.seed, Some(7));
/// assert_eq!(config.max_rounds, CombatConfig::DEFAULT_MAX_ROUNDS);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Rounds after which the match is stopped and scored as a draw
    pub max_rounds: u32,
    /// Generator seed (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            max_rounds: Self::DEFAULT_MAX_ROUNDS,
            seed: None,
        }
    }
}

impl CombatConfig {
    /// Default round cap.
    pub const DEFAULT_MAX_ROUNDS: u32 = 500;

    /// Returns a copy with a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Returns a copy with a different round cap.
    #[must_use]
    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Reads a configuration from a JSON file. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or is not a valid configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::MalformedRecord {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Creates the match generator.
    #[must_use]
    pub fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}
