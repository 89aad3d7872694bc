//! Outcome reporting.
//!
//! Turns the final combat state into a winner or a draw and the stats delta
//! each team earns from the match. Both teams always get one game played;
//! only a winner gets a game won.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{Combat, RoundPhase};
use crate::entity::{CharacterId, Gear};
use crate::stats::{StatsBook, StatsDelta};
use crate::team::Side;

/// Why a match ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawReason {
    /// Both teams were eliminated in the same round.
    BothEliminated,
    /// The round cap was reached with both teams still in.
    RoundCap,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// One side won.
    Winner(Side),
    /// Nobody won.
    Draw(DrawReason),
}

impl Outcome {
    /// Derives the outcome from a terminal phase; None while the match runs.
    #[must_use]
    pub const fn from_phase(phase: RoundPhase) -> Option<Self> {
        match phase {
            RoundPhase::Team1Eliminated => Some(Self::Winner(Side::Team2)),
            RoundPhase::Team2Eliminated => Some(Self::Winner(Side::Team1)),
            RoundPhase::BothEliminated => Some(Self::Draw(DrawReason::BothEliminated)),
            RoundPhase::RoundCapReached => Some(Self::Draw(DrawReason::RoundCap)),
            RoundPhase::AwaitingRound | RoundPhase::RoundInProgress | RoundPhase::RoundResolved => {
                None
            }
        }
    }

    /// The winning side, if any.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Self::Winner(side) => Some(side),
            Self::Draw(_) => None,
        }
    }

    /// Returns true for draws.
    #[must_use]
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Draw(_))
    }
}

/// End-of-match state of one fighter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterReport {
    /// Character id
    pub id: CharacterId,
    /// Character name
    pub name: String,
    /// Final damage ledger
    pub accumulated_damage: f64,
    /// Weapon and its remaining durability
    pub weapon: Gear,
    /// Armor and its remaining durability
    pub armor: Gear,
}

/// Everything a finished match produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    /// Rounds played
    pub rounds: u32,
    /// Winner or draw
    pub outcome: Outcome,
    /// Team names, indexed by [`Side::index`]
    pub team_names: [String; 2],
    /// Stats deltas, indexed by [`Side::index`]
    pub deltas: [StatsDelta; 2],
    /// Member summary lines, indexed by [`Side::index`]
    pub summaries: [Vec<String>; 2],
    /// Final ledgers and gear, in id order
    pub fighters: Vec<FighterReport>,
}

impl MatchReport {
    /// Builds the report for a finished match.
    ///
    /// `knockouts` holds the knockouts each side inflicted, indexed by
    /// [`Side::index`].
    #[must_use]
    pub fn new(combat: &Combat, rounds: u32, outcome: Outcome, knockouts: [u32; 2]) -> Self {
        let delta = |side: Side| StatsDelta {
            games_played: 1,
            games_won: u32::from(outcome.winner() == Some(side)),
            ko_done: knockouts[side.index()],
            ko_received: knockouts[side.opponent().index()],
        };

        let fighters = combat
            .fighters()
            .map(|f| FighterReport {
                id: f.character.id(),
                name: f.character.name().to_string(),
                accumulated_damage: f.character.accumulated_damage(),
                weapon: f.loadout.weapon.clone(),
                armor: f.loadout.armor.clone(),
            })
            .collect();

        Self {
            rounds,
            outcome,
            team_names: Side::BOTH.map(|s| combat.team(s).name.clone()),
            deltas: Side::BOTH.map(delta),
            summaries: Side::BOTH.map(|s| combat.summary(s)),
            fighters,
        }
    }

    /// Name of the winning team, if any.
    #[must_use]
    pub fn winner_name(&self) -> Option<&str> {
        self.outcome
            .winner()
            .map(|side| self.team_names[side.index()].as_str())
    }

    /// Stats delta for one side.
    #[must_use]
    pub fn delta(&self, side: Side) -> &StatsDelta {
        &self.deltas[side.index()]
    }

    /// Final state of one fighter.
    #[must_use]
    pub fn fighter(&self, id: CharacterId) -> Option<&FighterReport> {
        self.fighters.iter().find(|f| f.id == id)
    }

    /// Human-readable verdict line.
    #[must_use]
    pub fn verdict(&self) -> String {
        match self.outcome {
            Outcome::Winner(side) => format!("Team {} wins!", self.team_names[side.index()]),
            Outcome::Draw(DrawReason::BothEliminated) => {
                "Both teams are eliminated. It's a draw!".to_string()
            }
            Outcome::Draw(DrawReason::RoundCap) => {
                format!("No team fell after {} rounds. It's a draw!", self.rounds)
            }
        }
    }

    /// Folds both deltas into `book`, creating records for unknown teams.
    ///
    /// When a team fought itself both deltas land on the same record.
    pub fn apply_to(&self, book: &mut StatsBook) {
        for side in Side::BOTH {
            book.record(&self.team_names[side.index()], self.delta(side));
        }
        info!(
            team1 = %self.team_names[0],
            team2 = %self.team_names[1],
            winner = self.winner_name().unwrap_or("draw"),
            "stats recorded"
        );
    }
}
