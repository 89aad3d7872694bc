//! Per-team match statistics.
//!
//! [`Stats`] mirrors one record of `stats.json`. A finished match produces a
//! [`StatsDelta`] per team which a [`StatsBook`] folds into the stored
//! counters.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::store::{read_records, write_records};

/// Counters for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Team these counters belong to
    pub team_name: String,
    /// Matches played
    pub games_played: u32,
    /// Matches won
    pub games_won: u32,
    /// Knockouts inflicted on opponents
    pub ko_done: u32,
    /// Knockouts suffered
    pub ko_received: u32,
}

impl Stats {
    /// Fresh, zeroed counters for `team_name`.
    #[must_use]
    pub fn new(team_name: impl Into<String>) -> Self {
        Self {
            team_name: team_name.into(),
            games_played: 0,
            games_won: 0,
            ko_done: 0,
            ko_received: 0,
        }
    }

    /// Win rate as a percentage; 0 when no match has been played.
    #[must_use]
    pub fn win_rate(&self) -> f32 {
        if self.games_played == 0 {
            0.0
        } else {
            #[allow(clippy::cast_precision_loss)]
            let rate = self.games_won as f32 / self.games_played as f32;
            rate * 100.0
        }
    }

    /// Folds a match delta into the counters.
    pub fn apply(&mut self, delta: &StatsDelta) {
        self.games_played += delta.games_played;
        self.games_won += delta.games_won;
        self.ko_done += delta.ko_done;
        self.ko_received += delta.ko_received;
    }

    /// Multi-line description used by listings.
    #[must_use]
    pub fn details(&self) -> String {
        format!(
            "\n\tCombats played: {}\n\tCombats won: {}\n\tWin rate: {:.2}%\n\tKOs done: {}\n\tKOs received: {}\n",
            self.games_played,
            self.games_won,
            self.win_rate(),
            self.ko_done,
            self.ko_received
        )
    }
}

/// What one match adds to a team's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsDelta {
    /// Always 1 for a finished match
    pub games_played: u32,
    /// 1 for the winner, 0 otherwise
    pub games_won: u32,
    /// Knockouts this team inflicted
    pub ko_done: u32,
    /// Knockouts this team suffered
    pub ko_received: u32,
}

/// The set of stats records, keyed case-insensitively by team name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsBook {
    entries: Vec<Stats>,
}

impl StatsBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `stats.json`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or any record is malformed.
    pub fn load(path: &Path) -> Result<Self> {
        let entries = read_records(path)?;
        Ok(Self { entries })
    }

    /// Writes every record back to `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        write_records(path, &self.entries)
    }

    /// All records in file order.
    #[must_use]
    pub fn entries(&self) -> &[Stats] {
        &self.entries
    }

    /// Looks up a team's counters, ignoring case.
    #[must_use]
    pub fn get(&self, team_name: &str) -> Option<&Stats> {
        let key = team_name.to_lowercase();
        self.entries
            .iter()
            .find(|s| s.team_name.to_lowercase() == key)
    }

    /// Returns a team's counters, creating zeroed ones if missing.
    pub fn get_or_create(&mut self, team_name: &str) -> &mut Stats {
        let key = team_name.to_lowercase();
        let pos = match self
            .entries
            .iter()
            .position(|s| s.team_name.to_lowercase() == key)
        {
            Some(pos) => pos,
            None => {
                debug!(team = team_name, "creating stats record");
                self.entries.push(Stats::new(team_name));
                self.entries.len() - 1
            }
        };
        &mut self.entries[pos]
    }

    /// Applies a delta to a team, creating its record if needed.
    pub fn record(&mut self, team_name: &str, delta: &StatsDelta) {
        self.get_or_create(team_name).apply(delta);
    }
}

impl From<Vec<Stats>> for StatsBook {
    fn from(entries: Vec<Stats>) -> Self {
        Self { entries }
    }
}
