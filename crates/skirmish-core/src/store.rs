//! Entity store: read access to characters, items and teams.
//!
//! The combat engine never touches files. It consumes an [`EntityStore`],
//! which answers lookups by id, by (case-insensitive) name and by list
//! index. [`Catalog`] is the in-memory implementation, filled either directly
//! or from the JSON files of a data directory.
//!
//! # Data files
//!
//! Every file is a flat JSON array of plain records:
//!
//! | File              | Record fields                                          |
//! |-------------------|--------------------------------------------------------|
//! | `characters.json` | `id`, `name`, `weight`                                 |
//! | `items.json`      | `id`, `name`, `class`, `power`, `durability`           |
//! | `teams.json`      | `name`, `members[{id, strategy}]`                      |
//! | `stats.json`      | `team_name`, `games_played`, `games_won`, `ko_done`, `ko_received` |
//!
//! A load fails as a whole on the first malformed record; the engine never
//! runs on partial data.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::entity::{Character, CharacterId, Item};
use crate::error::{RecordKind, Result, StoreError};
use crate::team::Team;

/// Locations of the four data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    /// Character records
    pub characters: PathBuf,
    /// Item records
    pub items: PathBuf,
    /// Team records
    pub teams: PathBuf,
    /// Stats records
    pub stats: PathBuf,
}

impl DataPaths {
    /// Default data directory name.
    pub const DEFAULT_DIR: &'static str = "Data";

    /// Standard file names under `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            characters: dir.join("characters.json"),
            items: dir.join("items.json"),
            teams: dir.join("teams.json"),
            stats: dir.join("stats.json"),
        }
    }

    /// Returns the files that do not exist.
    #[must_use]
    pub fn missing(&self) -> Vec<&Path> {
        [&self.characters, &self.items, &self.teams, &self.stats]
            .into_iter()
            .filter(|p| !p.exists())
            .map(PathBuf::as_path)
            .collect()
    }

    /// Checks that all four data files exist.
    ///
    /// # Errors
    ///
    /// [`StoreError::MissingFiles`] naming every absent file.
    pub fn ensure_present(&self) -> Result<()> {
        let missing = self.missing();
        if missing.is_empty() {
            return Ok(());
        }
        Err(StoreError::MissingFiles {
            paths: missing.into_iter().map(Path::to_path_buf).collect(),
        })
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIR)
    }
}

/// Reads a JSON array of records.
///
/// # Errors
///
/// [`StoreError::Io`] if the file cannot be read,
/// [`StoreError::MalformedRecord`] if any record fails to parse.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| StoreError::MalformedRecord {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes records as a JSON array indented with four spaces.
///
/// # Errors
///
/// [`StoreError::Io`] if the records cannot be encoded or the file cannot
/// be written. Nothing is written when encoding fails.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut ser).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source: source.into(),
    })?;
    fs::write(path, buf).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Case-insensitive name comparison used by every by-name lookup.
pub(crate) fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn at<'a, T>(list: &'a [T], index: usize, kind: RecordKind) -> Result<&'a T> {
    list.get(index).ok_or(StoreError::InvalidIndex {
        kind,
        index,
        len: list.len(),
    })
}

/// Read access to characters, items and teams.
///
/// Implementors only provide the three list accessors; every lookup has a
/// default implementation on top of them.
pub trait EntityStore {
    /// All characters, in file order.
    fn characters(&self) -> &[Character];

    /// All items, in file order.
    fn items(&self) -> &[Item];

    /// All teams, in file order.
    fn teams(&self) -> &[Team];

    /// Finds a character by id.
    fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters().iter().find(|c| c.id() == id)
    }

    /// Finds a character by name, ignoring case.
    fn character_by_name(&self, name: &str) -> Option<&Character> {
        self.characters().iter().find(|c| same_name(c.name(), name))
    }

    /// Finds a team by name, ignoring case.
    fn team_by_name(&self, name: &str) -> Option<&Team> {
        self.teams().iter().find(|t| same_name(&t.name, name))
    }

    /// Character at a list position.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidIndex`] when out of range.
    fn character_at(&self, index: usize) -> Result<&Character> {
        at(self.characters(), index, RecordKind::Character)
    }

    /// Item at a list position.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidIndex`] when out of range.
    fn item_at(&self, index: usize) -> Result<&Item> {
        at(self.items(), index, RecordKind::Item)
    }

    /// Team at a list position.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidIndex`] when out of range.
    fn team_at(&self, index: usize) -> Result<&Team> {
        at(self.teams(), index, RecordKind::Team)
    }

    /// Names of the teams a character belongs to.
    fn teams_for_character(&self, id: CharacterId) -> Vec<&str> {
        self.teams()
            .iter()
            .filter(|t| t.contains(id))
            .map(|t| t.name.as_str())
            .collect()
    }

    /// Weapons only.
    fn weapons(&self) -> Vec<&Item> {
        self.items().iter().filter(|i| i.is_weapon()).collect()
    }

    /// Armors only.
    fn armors(&self) -> Vec<&Item> {
        self.items().iter().filter(|i| i.is_armor()).collect()
    }
}

/// Raw `characters.json` record, validated into a [`Character`].
#[derive(Debug, Deserialize)]
struct CharacterRecord {
    id: CharacterId,
    name: String,
    weight: u32,
}

/// In-memory entity store.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    characters: Vec<Character>,
    items: Vec<Item>,
    teams: Vec<Team>,
}

impl Catalog {
    /// Builds a catalog from already materialized lists.
    #[must_use]
    pub fn new(characters: Vec<Character>, items: Vec<Item>, teams: Vec<Team>) -> Self {
        Self {
            characters,
            items,
            teams,
        }
    }

    /// Loads characters, items and teams from a data directory.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file, malformed record, or character
    /// with a weight of zero.
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let records: Vec<CharacterRecord> = read_records(&paths.characters)?;
        let characters = records
            .into_iter()
            .map(|r| Character::new(r.id, r.name, r.weight))
            .collect::<Result<Vec<_>>>()?;
        let items: Vec<Item> = read_records(&paths.items)?;
        let teams: Vec<Team> = read_records(&paths.teams)?;

        info!(
            dir = %paths.characters.parent().unwrap_or(Path::new("")).display(),
            characters = characters.len(),
            items = items.len(),
            teams = teams.len(),
            "catalog loaded"
        );

        Ok(Self::new(characters, items, teams))
    }

    /// Looks up a team by name, as an error when missing.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotFound`] when no team has that name.
    pub fn require_team(&self, name: &str) -> Result<&Team> {
        self.team_by_name(name)
            .ok_or_else(|| StoreError::not_found(RecordKind::Team, name))
    }
}

impl EntityStore for Catalog {
    fn characters(&self) -> &[Character] {
        &self.characters
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn teams(&self) -> &[Team] {
        &self.teams
    }
}
