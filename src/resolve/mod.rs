//! Rule resolution.
//!
//! Resolves combat rounds, start-of-round reinforcements, and end-of-game
//! conditions against the territory list.

pub mod combat;
pub mod phase;
pub mod reinforce;

pub use combat::{
    dice_counts, resolve, resolve_round, resolve_with_rolls, roll_dice, validate, CombatRound,
    Outcome, RejectReason,
};
pub use phase::{is_dominated, past_turn_limit, reinforces_on, GameStatus};
pub use reinforce::{allocate, distribute, reinforcement_for, Reinforcement};
