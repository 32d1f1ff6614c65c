//! Property tests for the rule invariants.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use warlord::board::{factions_in_order, Faction, Territory};
use warlord::config::{DiceTier, RulesConfig};
use warlord::mission::{evaluate, generate, Mission, Objective};
use warlord::resolve::{allocate, is_dominated, resolve_round, Outcome};

fn tier() -> impl Strategy<Value = DiceTier> {
    prop_oneof![Just(DiceTier::Basic), Just(DiceTier::Extended)]
}

fn map_strategy() -> impl Strategy<Value = Vec<Territory>> {
    prop::collection::vec((0usize..4, 0u32..12), 1..12).prop_map(|cells| {
        let colors = ["blue", "red", "green", "yellow"];
        cells
            .into_iter()
            .enumerate()
            .map(|(i, (c, troops))| Territory::new(format!("T{}", i), colors[c], troops))
            .collect()
    })
}

proptest! {
    #[test]
    fn losses_equal_duels_without_conquest(
        a in 2u32..40,
        d in 1u32..40,
        seed in any::<u64>(),
        tier in tier(),
    ) {
        let mut attacker = Territory::new("A", "blue", a);
        let mut defender = Territory::new("D", "red", d);
        let mut rng = SmallRng::seed_from_u64(seed);
        let round = resolve_round(&mut attacker, &mut defender, tier, &mut rng);

        prop_assert!(!round.outcome.is_rejected());
        prop_assert_eq!(
            (round.attacker_losses + round.defender_losses) as usize,
            round.duels()
        );
        if round.outcome != Outcome::Conquered {
            prop_assert_eq!(attacker.troops + defender.troops + round.duels() as u32, a + d);
            prop_assert_eq!(defender.owner.as_str(), "red");
        }
    }

    #[test]
    fn conquest_leaves_one_behind(
        a in 2u32..40,
        d in 1u32..3,
        seed in any::<u64>(),
        tier in tier(),
    ) {
        let mut attacker = Territory::new("A", "blue", a);
        let mut defender = Territory::new("D", "red", d);
        let mut rng = SmallRng::seed_from_u64(seed);
        let round = resolve_round(&mut attacker, &mut defender, tier, &mut rng);

        if round.outcome == Outcome::Conquered {
            prop_assert_eq!(attacker.troops, 1);
            prop_assert_eq!(defender.troops, a - round.attacker_losses - 1);
            prop_assert_eq!(defender.owner.as_str(), "blue");
        }
    }

    #[test]
    fn rejected_rounds_change_nothing(
        a in 0u32..6,
        d in 0u32..6,
        same in any::<bool>(),
        seed in any::<u64>(),
    ) {
        let mut attacker = Territory::new("A", "blue", a);
        let mut defender = Territory::new("D", if same { "blue" } else { "red" }, d);
        let before = (attacker.clone(), defender.clone());
        let mut rng = SmallRng::seed_from_u64(seed);
        let round = resolve_round(&mut attacker, &mut defender, DiceTier::Extended, &mut rng);

        let legal = a >= 2 && d >= 1 && !same;
        prop_assert_eq!(round.outcome.is_rejected(), !legal);
        if !legal {
            prop_assert_eq!((attacker, defender), before);
        }
    }

    #[test]
    fn reinforcement_sum_matches_holdings(map in map_strategy(), floor in 1u32..5) {
        let mut after = map.clone();
        let granted = allocate(&mut after, floor);

        for r in &granted {
            let held = map.iter().filter(|t| t.owner == r.faction).count();
            prop_assert_eq!(r.total, (held as u32).max(floor));
            prop_assert_eq!(r.grants.iter().map(|&(_, n)| n).sum::<u32>(), r.total);

            let shares: Vec<u32> = r.grants.iter().map(|&(_, n)| n).collect();
            let max = shares.iter().copied().max().unwrap_or(0);
            let min = shares.iter().copied().min().unwrap_or(0);
            prop_assert!(max - min <= 1);
            prop_assert!(shares.windows(2).all(|w| w[0] >= w[1]));
        }
        let order: Vec<&Faction> = granted.iter().map(|r| &r.faction).collect();
        prop_assert_eq!(order, factions_in_order(&map));
        for (before, now) in map.iter().zip(after.iter()) {
            prop_assert!(now.troops > before.troops || floor == 0);
        }
    }

    #[test]
    fn domination_iff_one_owner(map in map_strategy()) {
        prop_assert_eq!(is_dominated(&map), factions_in_order(&map).len() == 1);
    }

    #[test]
    fn completion_is_monotonic(
        map in map_strategy(),
        later in map_strategy(),
        seed in any::<u64>(),
        turn in 1u32..20,
    ) {
        let player = Faction::from("blue");
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut mission = generate(&map, &player, &RulesConfig::default(), &mut rng);
        if mission.check(&map, &player, turn) {
            prop_assert!(mission.check(&later, &player, 1));
            prop_assert!(evaluate(&mission, &later, &player, 1));
        }
    }

    #[test]
    fn survive_depends_only_on_turn(map in map_strategy(), target in 8u32..13, turn in 0u32..20) {
        let mission = Mission::new(Objective::SurviveTurns { turns: target });
        prop_assert_eq!(evaluate(&mission, &map, &Faction::from("blue"), turn), turn >= target);
    }
}
