//! Teams and their members.
//!
//! A [`Team`] is a name plus an ordered list of [`Member`]s. Member order is
//! the attack order within a round. A member refers to a character by id and
//! carries the per-match knockout flag; damage lives on the character.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entity::CharacterId;

/// One slot in a team.
///
/// Serialized as `{"id": .., "strategy": ..}` in `teams.json`. The knockout
/// flag is match-local and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Character this slot refers to
    pub id: CharacterId,
    /// Free-form strategy tag chosen when the team was built
    pub strategy: String,
    #[serde(skip)]
    knocked_out: bool,
}

impl Member {
    /// Creates a member that is still standing.
    #[must_use]
    pub fn new(id: CharacterId, strategy: impl Into<String>) -> Self {
        Self {
            id,
            strategy: strategy.into(),
            knocked_out: false,
        }
    }

    /// Returns true once the member has been knocked out this match.
    #[must_use]
    pub const fn is_knocked_out(&self) -> bool {
        self.knocked_out
    }

    /// Marks the member knocked out. There is no way back.
    pub(crate) fn knock_out(&mut self) {
        self.knocked_out = true;
    }
}

/// A named, ordered group of members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Team name
    pub name: String,
    /// Members in attack order
    pub members: Vec<Member>,
}

impl Team {
    /// Creates a team.
    #[must_use]
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Returns true if `id` is one of the members.
    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }
}

/// Which of the two teams in a match.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The first team selected
    Team1,
    /// The second team selected
    Team2,
}

impl Side {
    /// Both sides, in attack order.
    pub const BOTH: [Side; 2] = [Side::Team1, Side::Team2];

    /// Returns the other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Team1 => Self::Team2,
            Self::Team2 => Self::Team1,
        }
    }

    /// Index into per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Team1 => 0,
            Self::Team2 => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Team1 => write!(f, "Team #1"),
            Self::Team2 => write!(f, "Team #2"),
        }
    }
}
