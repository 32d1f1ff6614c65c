//! Start-of-round reinforcement.
//!
//! Each faction receives troops proportional to the territories it holds,
//! never fewer than the configured floor, spread as evenly as possible over
//! its territories in list order.

use serde::Serialize;
use tracing::debug;

use crate::board::{Faction, Territory};

/// What one faction received in a reinforcement phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reinforcement {
    pub faction: Faction,
    /// Territories the faction held when troops were handed out.
    pub territories: usize,
    /// Total troops granted.
    pub total: u32,
    /// `(territory index, troops added)` in list order.
    pub grants: Vec<(usize, u32)>,
}

/// Troops a faction holding `territories` territories receives.
pub fn reinforcement_for(territories: usize, min_reinforcement: u32) -> u32 {
    u32::try_from(territories)
        .unwrap_or(u32::MAX)
        .max(min_reinforcement)
}

/// Splits `total` over `slots` territories: everyone gets the quotient and
/// the first `total % slots` get one more.
pub fn distribute(total: u32, slots: usize) -> Vec<u32> {
    if slots == 0 {
        return Vec::new();
    }
    let n = u32::try_from(slots).unwrap_or(u32::MAX);
    let base = total / n;
    let remainder = (total % n) as usize;
    (0..slots)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

/// Reinforces every faction on the map in place.
///
/// Factions are processed in first-seen order. Returns one record per faction.
pub fn allocate(territories: &mut [Territory], min_reinforcement: u32) -> Vec<Reinforcement> {
    // Group territory indices by owner, preserving first-seen order.
    let mut groups: Vec<(Faction, Vec<usize>)> = Vec::new();
    for (idx, t) in territories.iter().enumerate() {
        match groups.iter_mut().find(|(f, _)| *f == t.owner) {
            Some((_, indices)) => indices.push(idx),
            None => groups.push((t.owner.clone(), vec![idx])),
        }
    }

    let mut results = Vec::with_capacity(groups.len());
    for (faction, indices) in groups {
        let total = reinforcement_for(indices.len(), min_reinforcement);
        let shares = distribute(total, indices.len());
        let grants: Vec<(usize, u32)> = indices.iter().copied().zip(shares).collect();
        for &(idx, amount) in &grants {
            territories[idx].troops = territories[idx].troops.saturating_add(amount);
        }
        debug!(%faction, territories = indices.len(), total, "reinforced");
        results.push(Reinforcement {
            faction,
            territories: indices.len(),
            total,
            grants,
        });
    }
    results
}
