//! Warlord engine library.
//!
//! Territorial conquest for one player against passive rival factions:
//! dice combat, start-of-round reinforcements, and randomly drawn missions.
//! Exposes the board model, rule resolvers, mission engine, game state, and
//! self-play driver for use by integration tests and the binary entry point.

pub mod board;
pub mod config;
pub mod game;
pub mod mission;
pub mod protocol;
pub mod resolve;
pub mod selfplay;
