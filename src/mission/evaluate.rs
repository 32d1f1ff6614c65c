//! Mission completion checks.

use tracing::info;

use super::{Mission, Objective};
use crate::board::{count_owned, Faction, Territory};

/// Returns true if `mission` is complete for `player` on `turn`.
///
/// Pure: a completed mission short-circuits to true, but persisting a fresh
/// completion is left to the caller (see [`Mission::check`]).
pub fn evaluate(mission: &Mission, territories: &[Territory], player: &Faction, turn: u32) -> bool {
    if mission.completed {
        return true;
    }
    match &mission.objective {
        Objective::ConquerFaction { region, .. } => {
            !region.is_empty()
                && region
                    .iter()
                    .all(|&i| territories.get(i).is_some_and(|t| t.owner == *player))
        }
        Objective::EliminateFaction { target } => territories.iter().all(|t| t.owner != *target),
        Objective::ControlCount { territories: needed } => {
            count_owned(territories, player) >= *needed as usize
        }
        Objective::SurviveTurns { turns } => turn >= *turns,
    }
}

impl Mission {
    /// Evaluates the mission and records a completion. Returns the result.
    pub fn check(&mut self, territories: &[Territory], player: &Faction, turn: u32) -> bool {
        if self.completed {
            return true;
        }
        if evaluate(self, territories, player, turn) {
            self.completed = true;
            info!(%player, turn, mission = %self, "mission complete");
        }
        self.completed
    }
}
