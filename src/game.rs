//! Game state.
//!
//! Holds the territory list, the player's faction, the turn counter, and the
//! active mission, and exposes the per-round operations an outer loop calls in
//! sequence: reinforce, attack (any number of times), check status, end round.

use rand::Rng;
use tracing::debug;

use crate::board::{dominant_faction, Faction, Territory};
use crate::config::RulesConfig;
use crate::mission::{self, Mission};
use crate::protocol::position::{encode_position, parse_position, PositionError};
use crate::resolve::{
    allocate, past_turn_limit, reinforces_on, resolve_round, CombatRound, GameStatus, RejectReason,
    Reinforcement,
};

/// The complete mutable state of one game.
#[derive(Debug, Clone)]
pub struct GameState {
    pub territories: Vec<Territory>,
    /// The human player's faction. Fixed for the whole game.
    pub player: Faction,
    /// Current round, starting at 1.
    pub turn: u32,
    pub mission: Mission,
    pub rules: RulesConfig,
}

impl GameState {
    /// Starts a game on turn 1 and draws the player's mission.
    pub fn new(
        territories: Vec<Territory>,
        player: Faction,
        rules: RulesConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let mission = mission::generate(&territories, &player, &rules, rng);
        Self::with_mission(territories, player, mission, rules)
    }

    /// Starts a game on turn 1 with a fixed mission.
    pub fn with_mission(
        territories: Vec<Territory>,
        player: Faction,
        mission: Mission,
        rules: RulesConfig,
    ) -> Self {
        GameState {
            territories,
            player,
            turn: 1,
            mission,
            rules,
        }
    }

    /// Starts a game from position notation, drawing a mission.
    pub fn from_position(
        position: &str,
        player: Faction,
        rules: RulesConfig,
        rng: &mut impl Rng,
    ) -> Result<Self, PositionError> {
        let pos = parse_position(position)?;
        let mut state = Self::new(pos.territories, player, rules, rng);
        state.turn = pos.turn;
        Ok(state)
    }

    /// Encodes the current turn and territories as position notation.
    pub fn position(&self) -> String {
        encode_position(self.turn, &self.territories)
    }

    /// Hands out this round's reinforcements, if the turn allows them.
    pub fn reinforce(&mut self) -> Vec<Reinforcement> {
        if !reinforces_on(self.turn, &self.rules) {
            return Vec::new();
        }
        allocate(&mut self.territories, self.rules.min_reinforcement)
    }

    /// Resolves one combat round between two territories by index.
    ///
    /// Out-of-range indices are rejected with `OutOfRange`; a territory
    /// attacking itself is rejected with `SameFaction`.
    pub fn attack(&mut self, attacker: usize, defender: usize, rng: &mut impl Rng) -> CombatRound {
        let tier = self.rules.dice_tier;
        match pair_mut(&mut self.territories, attacker, defender) {
            Ok((a, d)) => resolve_round(a, d, tier, rng),
            Err(reason) => {
                debug!(attacker, defender, %reason, "attack rejected");
                CombatRound::rejected(reason)
            }
        }
    }

    /// Checks the mission and records a fresh completion.
    pub fn check_mission(&mut self) -> bool {
        self.mission
            .check(&self.territories, &self.player, self.turn)
    }

    /// Decides whether the game is over.
    ///
    /// A turn past `max_turns` is never played, so the turn limit is checked
    /// first. Then the mission, then domination.
    pub fn status(&mut self) -> GameStatus {
        if past_turn_limit(self.turn, &self.rules) {
            return GameStatus::TurnLimit;
        }
        if self.check_mission() {
            return GameStatus::MissionComplete;
        }
        if let Some(owner) = dominant_faction(&self.territories) {
            return GameStatus::Dominated(owner.clone());
        }
        GameStatus::InProgress
    }

    /// Closes the current round.
    pub fn end_round(&mut self) {
        self.turn += 1;
    }
}

/// Borrows two distinct territories mutably.
fn pair_mut(
    territories: &mut [Territory],
    a: usize,
    b: usize,
) -> Result<(&mut Territory, &mut Territory), RejectReason> {
    let len = territories.len();
    if a >= len || b >= len {
        return Err(RejectReason::OutOfRange);
    }
    if a == b {
        return Err(RejectReason::SameFaction);
    }
    if a < b {
        let (left, right) = territories.split_at_mut(b);
        Ok((&mut left[a], &mut right[0]))
    } else {
        let (left, right) = territories.split_at_mut(a);
        Ok((&mut right[0], &mut left[b]))
    }
}
