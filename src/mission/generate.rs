//! Random mission generation.

use rand::Rng;
use tracing::debug;

use super::{Mission, MissionKind, Objective, ALL_KINDS};
use crate::board::{count_owned, factions_in_order, Faction, Territory};
use crate::config::RulesConfig;

/// `ceil(count * percent / 100)`.
fn percent_of(count: usize, percent: u32) -> u32 {
    let count = u32::try_from(count).unwrap_or(u32::MAX);
    count.saturating_mul(percent).div_ceil(100)
}

/// Draws a mission for `player` from the current territory layout.
///
/// The kind is uniform over the four families. Conquer and eliminate draws
/// that find no suitable target fall back to a control mission over
/// `conquer_fallback_percent` of the map.
pub fn generate(
    territories: &[Territory],
    player: &Faction,
    config: &RulesConfig,
    rng: &mut impl Rng,
) -> Mission {
    let kind = ALL_KINDS[rng.gen_range(0..ALL_KINDS.len())];
    let objective = match kind {
        MissionKind::ConquerFaction => conquer_target(territories, player, config, rng)
            .unwrap_or_else(|| fallback(territories, config)),
        MissionKind::EliminateFaction => {
            let rivals: Vec<&Faction> = factions_in_order(territories)
                .into_iter()
                .filter(|f| *f != player)
                .collect();
            if rivals.is_empty() {
                fallback(territories, config)
            } else {
                let target = rivals[rng.gen_range(0..rivals.len())].clone();
                Objective::EliminateFaction { target }
            }
        }
        MissionKind::ControlCount => Objective::ControlCount {
            territories: percent_of(territories.len(), config.control_percent)
                .max(config.control_floor),
        },
        MissionKind::SurviveTurns => {
            let lo = config.survive_min.min(config.survive_max);
            let hi = config.survive_min.max(config.survive_max);
            Objective::SurviveTurns {
                turns: rng.gen_range(lo..=hi),
            }
        }
    };

    let mission = Mission::new(objective);
    debug!(%player, ?kind, mission = %mission, "mission generated");
    mission
}

/// Tries up to `conquer_attempts` random territories for a rival faction that
/// holds enough of the map to be worth conquering.
fn conquer_target(
    territories: &[Territory],
    player: &Faction,
    config: &RulesConfig,
    rng: &mut impl Rng,
) -> Option<Objective> {
    if territories.is_empty() {
        return None;
    }
    for _ in 0..config.conquer_attempts {
        let candidate = &territories[rng.gen_range(0..territories.len())].owner;
        if candidate == player {
            continue;
        }
        if count_owned(territories, candidate) >= config.conquer_min_territories {
            let region = territories
                .iter()
                .enumerate()
                .filter(|(_, t)| t.owner == *candidate)
                .map(|(i, _)| i)
                .collect();
            return Some(Objective::ConquerFaction {
                target: candidate.clone(),
                region,
            });
        }
    }
    None
}

fn fallback(territories: &[Territory], config: &RulesConfig) -> Objective {
    Objective::ControlCount {
        territories: percent_of(territories.len(), config.conquer_fallback_percent),
    }
}
