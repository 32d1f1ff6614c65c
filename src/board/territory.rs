//! Territories and queries over the territory list.
//!
//! The map is an ordered `[Territory]`. Order matters: reinforcement
//! remainders and faction ordering follow list position.

use serde::{Deserialize, Serialize};

use super::faction::Faction;

/// Minimum troops a territory needs before it may launch an attack.
pub const MIN_ATTACK_TROOPS: u32 = 2;

/// A map cell with exactly one owner and a troop count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Territory {
    pub name: String,
    pub owner: Faction,
    pub troops: u32,
}

impl Territory {
    /// Creates a territory.
    pub fn new(name: impl Into<String>, owner: impl Into<Faction>, troops: u32) -> Self {
        Territory {
            name: name.into(),
            owner: owner.into(),
            troops,
        }
    }

    /// Returns true if this territory holds enough troops to attack.
    pub fn can_attack(&self) -> bool {
        self.troops >= MIN_ATTACK_TROOPS
    }

    /// Returns true if the territory is owned by `faction`.
    pub fn is_owned_by(&self, faction: &Faction) -> bool {
        self.owner == *faction
    }
}

/// Returns the distinct owners in first-seen order.
pub fn factions_in_order(territories: &[Territory]) -> Vec<&Faction> {
    let mut seen: Vec<&Faction> = Vec::new();
    for t in territories {
        if !seen.contains(&&t.owner) {
            seen.push(&t.owner);
        }
    }
    seen
}

/// Counts the territories owned by `faction`.
pub fn count_owned(territories: &[Territory], faction: &Faction) -> usize {
    territories.iter().filter(|t| t.is_owned_by(faction)).count()
}

/// Returns the single owner of every territory, if there is one.
///
/// An empty map has no dominant faction.
pub fn dominant_faction(territories: &[Territory]) -> Option<&Faction> {
    let first = &territories.first()?.owner;
    if territories.iter().all(|t| t.owner == *first) {
        Some(first)
    } else {
        None
    }
}

/// Total troops on the map.
pub fn total_troops(territories: &[Territory]) -> u64 {
    territories.iter().map(|t| u64::from(t.troops)).sum()
}
