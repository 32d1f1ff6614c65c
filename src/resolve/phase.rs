//! Round sequencing and end-of-game detection.

use serde::Serialize;

use crate::board::{dominant_faction, Faction, Territory};
use crate::config::RulesConfig;

/// Where a game stands after a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    InProgress,
    /// The player completed their mission.
    MissionComplete,
    /// Every territory belongs to one faction.
    Dominated(Faction),
    /// The configured turn limit passed.
    TurnLimit,
}

impl GameStatus {
    /// Returns true for every status except `InProgress`.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

/// Returns true iff the map is non-empty and has a single owner.
pub fn is_dominated(territories: &[Territory]) -> bool {
    dominant_faction(territories).is_some()
}

/// Returns true if reinforcements are handed out on `turn`.
pub fn reinforces_on(turn: u32, config: &RulesConfig) -> bool {
    turn >= config.reinforce_from_turn
}

/// Returns true once `turn` is past the last playable turn.
pub fn past_turn_limit(turn: u32, config: &RulesConfig) -> bool {
    turn > config.max_turns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dominated_needs_one_owner() {
        let split = vec![Territory::new("a", "blue", 1), Territory::new("b", "red", 1)];
        assert!(!is_dominated(&split));
        let whole = vec![Territory::new("a", "red", 1), Territory::new("b", "red", 0)];
        assert!(is_dominated(&whole));
    }

    #[test]
    fn empty_map_is_not_dominated() {
        assert!(!is_dominated(&[]));
    }

    #[test]
    fn single_territory_is_dominated() {
        assert!(is_dominated(&[Territory::new("a", "blue", 3)]));
    }

    #[test]
    fn first_turn_has_no_reinforcements() {
        let config = RulesConfig::default();
        assert!(!reinforces_on(1, &config));
        assert!(reinforces_on(2, &config));
        assert!(reinforces_on(9, &config));
    }

    #[test]
    fn turn_limit_is_inclusive() {
        let config = RulesConfig::default();
        assert!(!past_turn_limit(15, &config));
        assert!(past_turn_limit(16, &config));
    }

    #[test]
    fn only_in_progress_keeps_going() {
        assert!(!GameStatus::InProgress.is_over());
        assert!(GameStatus::TurnLimit.is_over());
        assert!(GameStatus::Dominated(Faction::from("red")).is_over());
    }
}
