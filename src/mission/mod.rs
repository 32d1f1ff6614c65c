//! Player missions.
//!
//! A mission is generated once at game start from the territory layout and
//! checked every round. Completion is sticky: once a mission is complete it
//! stays complete no matter what happens on the map afterwards.

pub mod evaluate;
pub mod generate;

use std::fmt;

use serde::Serialize;

use crate::board::Faction;

pub use evaluate::evaluate;
pub use generate::generate;

/// The four mission families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MissionKind {
    ConquerFaction,
    EliminateFaction,
    ControlCount,
    SurviveTurns,
}

/// All mission kinds, in draw order.
pub const ALL_KINDS: [MissionKind; 4] = [
    MissionKind::ConquerFaction,
    MissionKind::EliminateFaction,
    MissionKind::ControlCount,
    MissionKind::SurviveTurns,
];

/// What the player must achieve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Take every territory `target` held when the mission was drawn.
    ///
    /// `region` holds board indices; territories are never added or removed
    /// so an index names one cell for the whole game.
    ConquerFaction {
        target: Faction,
        region: Vec<usize>,
    },
    /// Leave `target` with no territories.
    EliminateFaction { target: Faction },
    /// Hold at least this many territories at once.
    ControlCount { territories: u32 },
    /// Reach this turn.
    SurviveTurns { turns: u32 },
}

impl Objective {
    /// Returns the family of this objective.
    pub fn kind(&self) -> MissionKind {
        match self {
            Objective::ConquerFaction { .. } => MissionKind::ConquerFaction,
            Objective::EliminateFaction { .. } => MissionKind::EliminateFaction,
            Objective::ControlCount { .. } => MissionKind::ControlCount,
            Objective::SurviveTurns { .. } => MissionKind::SurviveTurns,
        }
    }
}

/// A player's mission and whether it has been achieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mission {
    pub objective: Objective,
    pub completed: bool,
}

impl Mission {
    /// Creates an uncompleted mission.
    pub fn new(objective: Objective) -> Self {
        Mission {
            objective,
            completed: false,
        }
    }

    pub fn kind(&self) -> MissionKind {
        self.objective.kind()
    }
}

impl fmt::Display for Mission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.objective {
            Objective::ConquerFaction { target, region } => write!(
                f,
                "Conquer every territory of faction {} ({} territories)",
                target,
                region.len()
            )?,
            Objective::EliminateFaction { target } => {
                write!(f, "Eliminate faction {} from the map", target)?
            }
            Objective::ControlCount { territories } => {
                write!(f, "Control at least {} territories", territories)?
            }
            Objective::SurviveTurns { turns } => write!(f, "Survive until turn {}", turns)?,
        }
        if self.completed {
            write!(f, " [complete]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Faction;

    #[test]
    fn kind_matches_objective() {
        let m = Mission::new(Objective::SurviveTurns { turns: 9 });
        assert_eq!(m.kind(), MissionKind::SurviveTurns);
        let m = Mission::new(Objective::EliminateFaction {
            target: Faction::from("red"),
        });
        assert_eq!(m.kind(), MissionKind::EliminateFaction);
    }

    #[test]
    fn display_describes_objective() {
        let mut m = Mission::new(Objective::ControlCount { territories: 4 });
        assert_eq!(m.to_string(), "Control at least 4 territories");
        m.completed = true;
        assert_eq!(m.to_string(), "Control at least 4 territories [complete]");

        let m = Mission::new(Objective::ConquerFaction {
            target: Faction::from("red"),
            region: vec![3, 2],
        });
        assert_eq!(m.to_string(), "Conquer every territory of faction red (2 territories)");
    }

    #[test]
    fn serializes_with_kind_tag() {
        let m = Mission::new(Objective::EliminateFaction {
            target: Faction::from("green"),
        });
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["objective"]["kind"], "eliminate_faction");
        assert_eq!(json["objective"]["target"], "green");
        assert_eq!(json["completed"], false);
    }
}
