//! Board representation.
//!
//! Contains factions, territories, and the read-only queries over the
//! territory list that the resolvers and mission engine share.

pub mod faction;
pub mod territory;

pub use faction::Faction;
pub use territory::{
    count_owned, dominant_faction, factions_in_order, total_troops, Territory, MIN_ATTACK_TROOPS,
};
