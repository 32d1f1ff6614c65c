//! Dice combat between two territories.
//!
//! One call resolves one combat round: both sides roll, dice are sorted
//! descending and compared pairwise, losses are applied together, and the
//! defender's territory changes hands if its garrison reaches zero.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::board::Territory;
use crate::config::{defender_dice, DiceTier};

/// Why a combat request was refused. A refused request never mutates state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
pub enum RejectReason {
    #[error("attacker needs at least 2 troops")]
    InvalidAttacker,

    #[error("defender has no troops")]
    InvalidDefender,

    #[error("attacker and defender belong to the same faction")]
    SameFaction,

    #[error("territory index out of range")]
    OutOfRange,
}

/// The result of one combat round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Outcome {
    /// Preconditions failed; nothing changed.
    Rejected(RejectReason),
    /// Both sides hold and the attacker may roll again.
    Continued,
    /// The attacker is down to one troop and cannot press this target.
    Repelled,
    /// The defender fell and now belongs to the attacker.
    Conquered,
}

impl Outcome {
    /// Returns true for `Rejected`.
    pub fn is_rejected(self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    /// Returns true when the attacker cannot continue against this target.
    pub fn ends_attack(self) -> bool {
        !matches!(self, Outcome::Continued)
    }
}

/// Full record of a combat round: dice (sorted descending), losses, outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatRound {
    pub attacker_dice: Vec<u8>,
    pub defender_dice: Vec<u8>,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    pub outcome: Outcome,
}

impl CombatRound {
    pub(crate) fn rejected(reason: RejectReason) -> Self {
        CombatRound {
            attacker_dice: Vec::new(),
            defender_dice: Vec::new(),
            attacker_losses: 0,
            defender_losses: 0,
            outcome: Outcome::Rejected(reason),
        }
    }

    /// Number of duels that were compared.
    pub fn duels(&self) -> usize {
        self.attacker_dice.len().min(self.defender_dice.len())
    }
}

/// Checks the combat preconditions without touching either territory.
pub fn validate(attacker: &Territory, defender: &Territory) -> Result<(), RejectReason> {
    if !attacker.can_attack() {
        return Err(RejectReason::InvalidAttacker);
    }
    if defender.troops == 0 {
        return Err(RejectReason::InvalidDefender);
    }
    if attacker.owner == defender.owner {
        return Err(RejectReason::SameFaction);
    }
    Ok(())
}

/// Returns `(attacker_dice, defender_dice)` for the current garrisons.
pub fn dice_counts(attacker: &Territory, defender: &Territory, tier: DiceTier) -> (usize, usize) {
    (tier.attacker_dice(attacker.troops), defender_dice(defender.troops))
}

/// Rolls `count` six-sided dice and sorts them highest first.
pub fn roll_dice(count: usize, rng: &mut impl Rng) -> Vec<u8> {
    let mut dice: Vec<u8> = (0..count).map(|_| rng.gen_range(1..=6)).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Resolves one combat round and returns only its outcome.
pub fn resolve(
    attacker: &mut Territory,
    defender: &mut Territory,
    tier: DiceTier,
    rng: &mut impl Rng,
) -> Outcome {
    resolve_round(attacker, defender, tier, rng).outcome
}

/// Resolves one combat round with freshly rolled dice.
pub fn resolve_round(
    attacker: &mut Territory,
    defender: &mut Territory,
    tier: DiceTier,
    rng: &mut impl Rng,
) -> CombatRound {
    if let Err(reason) = validate(attacker, defender) {
        debug!(attacker = %attacker.name, defender = %defender.name, %reason, "attack rejected");
        return CombatRound::rejected(reason);
    }
    let (a, d) = dice_counts(attacker, defender, tier);
    let attacker_dice = roll_dice(a, rng);
    let defender_dice = roll_dice(d, rng);
    apply_dice(attacker, defender, attacker_dice, defender_dice)
}

/// Resolves one combat round with the given dice instead of rolling.
///
/// Rolls are sorted descending and truncated to the dice counts the garrisons
/// allow, so surplus values are ignored. Used to replay recorded rounds.
pub fn resolve_with_rolls(
    attacker: &mut Territory,
    defender: &mut Territory,
    tier: DiceTier,
    attacker_rolls: &[u8],
    defender_rolls: &[u8],
) -> CombatRound {
    if let Err(reason) = validate(attacker, defender) {
        return CombatRound::rejected(reason);
    }
    let (a, d) = dice_counts(attacker, defender, tier);
    let attacker_dice = sorted_prefix(attacker_rolls, a);
    let defender_dice = sorted_prefix(defender_rolls, d);
    apply_dice(attacker, defender, attacker_dice, defender_dice)
}

fn sorted_prefix(rolls: &[u8], count: usize) -> Vec<u8> {
    let mut dice: Vec<u8> = rolls.iter().copied().take(count).collect();
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Compares sorted dice, applies both sides' losses at once, and settles
/// conquest. Preconditions must already hold.
fn apply_dice(
    attacker: &mut Territory,
    defender: &mut Territory,
    attacker_dice: Vec<u8>,
    defender_dice: Vec<u8>,
) -> CombatRound {
    let mut attacker_losses = 0u32;
    let mut defender_losses = 0u32;

    for (i, (a, d)) in attacker_dice.iter().zip(defender_dice.iter()).enumerate() {
        // Ties go to the defender.
        if a > d {
            defender_losses += 1;
        } else {
            attacker_losses += 1;
        }
        trace!(duel = i + 1, attacker = a, defender = d, "duel");
    }

    attacker.troops = attacker.troops.saturating_sub(attacker_losses);
    defender.troops = defender.troops.saturating_sub(defender_losses);

    let outcome = if defender.troops == 0 {
        defender.owner = attacker.owner.clone();
        defender.troops = attacker.troops.saturating_sub(1);
        attacker.troops = 1;
        Outcome::Conquered
    } else if attacker.troops <= 1 {
        Outcome::Repelled
    } else {
        Outcome::Continued
    };

    debug!(
        attacker = %attacker.name,
        defender = %defender.name,
        ?attacker_dice,
        ?defender_dice,
        attacker_losses,
        defender_losses,
        ?outcome,
        "combat round"
    );

    CombatRound {
        attacker_dice,
        defender_dice,
        attacker_losses,
        defender_losses,
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn pair(attacking: u32, defending: u32) -> (Territory, Territory) {
        (
            Territory::new("Brazil", "blue", attacking),
            Territory::new("Argentina", "red", defending),
        )
    }

    #[test]
    fn rejects_single_troop_attacker() {
        let (mut a, mut d) = pair(1, 3);
        let mut rng = SmallRng::seed_from_u64(1);
        let out = resolve(&mut a, &mut d, DiceTier::Extended, &mut rng);
        assert_eq!(out, Outcome::Rejected(RejectReason::InvalidAttacker));
        assert_eq!((a.troops, d.troops), (1, 3));
    }

    #[test]
    fn rejects_empty_defender() {
        let (mut a, mut d) = pair(4, 0);
        let mut rng = SmallRng::seed_from_u64(1);
        let out = resolve(&mut a, &mut d, DiceTier::Extended, &mut rng);
        assert_eq!(out, Outcome::Rejected(RejectReason::InvalidDefender));
        assert_eq!(d.owner.as_str(), "red");
    }

    #[test]
    fn rejects_same_faction() {
        let mut a = Territory::new("Brazil", "blue", 5);
        let mut d = Territory::new("Chile", "blue", 2);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Extended, &[6, 6, 6], &[1, 1]);
        assert_eq!(round.outcome, Outcome::Rejected(RejectReason::SameFaction));
        assert_eq!(round.duels(), 0);
        assert_eq!((a.troops, d.troops), (5, 2));
    }

    #[test]
    fn conquest_moves_all_but_one_troop() {
        // 5 troops roll three dice; defender with 1 troop rolls one.
        let (mut a, mut d) = pair(5, 1);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Extended, &[6, 4, 2], &[3]);
        assert_eq!(round.duels(), 1);
        assert_eq!(round.outcome, Outcome::Conquered);
        assert_eq!(d.owner.as_str(), "blue");
        assert_eq!(d.troops, 4);
        assert_eq!(a.troops, 1);
    }

    #[test]
    fn losing_last_spare_troop_repels() {
        let (mut a, mut d) = pair(2, 2);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Extended, &[3], &[5, 1]);
        assert_eq!(round.attacker_losses, 1);
        assert_eq!(round.defender_losses, 0);
        assert_eq!(round.outcome, Outcome::Repelled);
        assert_eq!((a.troops, d.troops), (1, 2));
    }

    #[test]
    fn ties_go_to_defender() {
        let (mut a, mut d) = pair(6, 5);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Extended, &[4, 4, 1], &[4, 4]);
        assert_eq!(round.attacker_losses, 2);
        assert_eq!(round.defender_losses, 0);
        assert_eq!(round.outcome, Outcome::Continued);
        assert_eq!((a.troops, d.troops), (4, 5));
    }

    #[test]
    fn split_duels_apply_both_losses() {
        let (mut a, mut d) = pair(4, 3);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Extended, &[2, 6, 5], &[5, 3]);
        assert_eq!(round.attacker_dice, vec![6, 5, 2]);
        assert_eq!(round.defender_dice, vec![5, 3]);
        assert_eq!(round.defender_losses, 2);
        assert_eq!(round.attacker_losses, 0);
        assert_eq!((a.troops, d.troops), (4, 1));
    }

    #[test]
    fn basic_tier_rolls_at_most_two() {
        let (a, d) = pair(10, 10);
        assert_eq!(dice_counts(&a, &d, DiceTier::Basic), (2, 2));
        assert_eq!(dice_counts(&a, &d, DiceTier::Extended), (3, 2));
    }

    #[test]
    fn surplus_rolls_are_ignored() {
        let (mut a, mut d) = pair(3, 1);
        let round = resolve_with_rolls(&mut a, &mut d, DiceTier::Basic, &[1, 2, 6, 6], &[5, 6]);
        assert_eq!(round.attacker_dice, vec![2, 1]);
        assert_eq!(round.defender_dice, vec![5]);
        assert_eq!(round.outcome, Outcome::Continued);
        assert_eq!((a.troops, d.troops), (2, 1));
    }

    #[test]
    fn rolled_dice_are_sorted_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..200 {
            let dice = roll_dice(3, &mut rng);
            assert_eq!(dice.len(), 3);
            assert!(dice.iter().all(|&v| (1..=6).contains(&v)));
            assert!(dice.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn same_seed_same_round() {
        let run = |seed| {
            let (mut a, mut d) = pair(7, 4);
            let mut rng = SmallRng::seed_from_u64(seed);
            resolve_round(&mut a, &mut d, DiceTier::Extended, &mut rng)
        };
        assert_eq!(run(9), run(9));
    }

    #[test]
    fn outcome_helpers() {
        assert!(Outcome::Rejected(RejectReason::OutOfRange).is_rejected());
        assert!(!Outcome::Continued.ends_attack());
        assert!(Outcome::Repelled.ends_attack());
        assert!(Outcome::Conquered.ends_attack());
    }
}
