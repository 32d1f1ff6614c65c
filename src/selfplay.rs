//! Self-play simulation.
//!
//! Plays whole games from a starting position with a random attack policy for
//! the player's faction. Opposing factions are passive: they only receive
//! reinforcements and defend. Each game is recorded round by round and can be
//! written out as JSONL.

use std::io::Write;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::board::{count_owned, Faction, Territory};
use crate::config::RulesConfig;
use crate::game::GameState;
use crate::mission::Mission;
use crate::protocol::position::{parse_position, Position, PositionError, DEFAULT_POSITION};
use crate::resolve::{validate, GameStatus, Outcome};

/// Errors that stop a self-play run before any game is played.
#[derive(Debug, thiserror::Error)]
pub enum SelfPlayError {
    #[error("invalid starting position: {0}")]
    Position(#[from] PositionError),

    #[error("player faction '{0}' holds no territory in the starting position")]
    UnknownPlayer(Faction),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Configuration for self-play game generation.
#[derive(Debug, Clone)]
pub struct SelfPlayConfig {
    /// Number of games to play.
    pub num_games: usize,
    /// Starting position in position notation.
    pub position: String,
    /// Faction driven by the random policy.
    pub player: Faction,
    /// Rules shared by every game.
    pub rules: RulesConfig,
    /// Distinct targets the player presses per round.
    pub attacks_per_round: usize,
    /// Number of parallel threads for concurrent games.
    pub threads: usize,
    /// Random seed (0 = use entropy). Game `i` is seeded with `seed + i`.
    pub seed: u64,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        SelfPlayConfig {
            num_games: 10,
            position: DEFAULT_POSITION.to_string(),
            player: Faction::from("blue"),
            rules: RulesConfig::default(),
            attacks_per_round: 3,
            threads: 4,
            seed: 0,
        }
    }
}

/// One recorded round.
#[derive(Debug, Clone, Serialize)]
pub struct RoundRecord {
    pub turn: u32,
    /// Position after reinforcements, before any attack.
    pub position: String,
    /// Troops granted to the player this round.
    pub reinforcements: u32,
    /// Combat rounds fought.
    pub combats: usize,
    /// Territories the player took.
    pub conquests: usize,
}

/// A complete self-play game record.
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub game_id: usize,
    pub mission: Mission,
    pub status: GameStatus,
    pub final_turn: u32,
    pub final_position: String,
    /// Territories the player holds at the end.
    pub player_territories: usize,
    pub rounds: Vec<RoundRecord>,
}

/// Aggregate results over a batch of games.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Summary {
    pub games: usize,
    pub mission_complete: usize,
    pub dominated_by_player: usize,
    pub dominated_by_rival: usize,
    pub turn_limit: usize,
    pub avg_turns: f64,
}

/// Picks a random legal `(attacker, defender)` pair for `player`.
fn pick_attack(
    territories: &[Territory],
    player: &Faction,
    rng: &mut impl Rng,
) -> Option<(usize, usize)> {
    let mut legal = Vec::new();
    for (i, a) in territories.iter().enumerate() {
        if a.owner != *player {
            continue;
        }
        for (j, d) in territories.iter().enumerate() {
            if validate(a, d).is_ok() {
                legal.push((i, j));
            }
        }
    }
    if legal.is_empty() {
        return None;
    }
    Some(legal[rng.gen_range(0..legal.len())])
}

/// Plays a single game from `start` and returns its record.
pub fn play_game(
    config: &SelfPlayConfig,
    start: &Position,
    game_id: usize,
    rng: &mut impl Rng,
) -> GameRecord {
    let mut state = GameState::new(
        start.territories.clone(),
        config.player.clone(),
        config.rules.clone(),
        rng,
    );
    state.turn = start.turn;
    let mut rounds = Vec::new();

    let status = loop {
        let status = state.status();
        if status.is_over() {
            break status;
        }

        let reinforcements: u32 = state
            .reinforce()
            .iter()
            .filter(|r| r.faction == state.player)
            .map(|r| r.total)
            .sum();
        let position = state.position();

        let mut combats = 0;
        let mut conquests = 0;
        for _ in 0..config.attacks_per_round {
            let Some((a, d)) = pick_attack(&state.territories, &state.player, rng) else {
                break;
            };
            // Press the same target until it falls or the attacker is spent.
            loop {
                let round = state.attack(a, d, rng);
                combats += 1;
                if round.outcome == Outcome::Conquered {
                    conquests += 1;
                }
                if round.outcome.ends_attack() {
                    break;
                }
            }
        }

        rounds.push(RoundRecord {
            turn: state.turn,
            position,
            reinforcements,
            combats,
            conquests,
        });

        // Settle the round on its own turn before the counter moves on.
        let status = state.status();
        if status.is_over() {
            break status;
        }
        state.end_round();
    };

    GameRecord {
        game_id,
        mission: state.mission.clone(),
        status,
        final_turn: state.turn,
        final_position: state.position(),
        player_territories: count_owned(&state.territories, &state.player),
        rounds,
    }
}

fn game_rng(seed: u64, game_id: usize) -> SmallRng {
    if seed != 0 {
        SmallRng::seed_from_u64(seed.wrapping_add(game_id as u64))
    } else {
        SmallRng::from_entropy()
    }
}

fn log_game(game: &GameRecord, total: usize, started: Instant) {
    info!(
        game = game.game_id + 1,
        total,
        status = ?game.status,
        turn = game.final_turn,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "game finished"
    );
}

/// Runs self-play generation and returns the records in game order.
///
/// When `config.threads > 1`, games are played concurrently using rayon.
pub fn run_self_play(config: &SelfPlayConfig) -> Result<Vec<GameRecord>, SelfPlayError> {
    let start = parse_position(&config.position)?;
    if count_owned(&start.territories, &config.player) == 0 {
        return Err(SelfPlayError::UnknownPlayer(config.player.clone()));
    }

    if config.threads > 1 {
        run_parallel(config, &start)
    } else {
        Ok(run_sequential(config, &start))
    }
}

fn run_sequential(config: &SelfPlayConfig, start: &Position) -> Vec<GameRecord> {
    (0..config.num_games)
        .map(|i| {
            let started = Instant::now();
            let mut rng = game_rng(config.seed, i);
            let game = play_game(config, start, i, &mut rng);
            log_game(&game, config.num_games, started);
            game
        })
        .collect()
}

fn run_parallel(config: &SelfPlayConfig, start: &Position) -> Result<Vec<GameRecord>, SelfPlayError> {
    use rayon::prelude::*;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()?;

    Ok(pool.install(|| {
        (0..config.num_games)
            .into_par_iter()
            .map(|i| {
                let started = Instant::now();
                let mut rng = game_rng(config.seed, i);
                let game = play_game(config, start, i, &mut rng);
                log_game(&game, config.num_games, started);
                game
            })
            .collect()
    }))
}

/// Writes game records as JSONL (one JSON object per game, one per line).
pub fn write_jsonl<W: Write>(games: &[GameRecord], out: &mut W) -> std::io::Result<()> {
    for game in games {
        serde_json::to_writer(&mut *out, game)?;
        writeln!(out)?;
    }
    out.flush()
}

/// Tallies how a batch of games ended.
pub fn summarize(games: &[GameRecord], player: &Faction) -> Summary {
    let mut summary = Summary {
        games: games.len(),
        ..Summary::default()
    };
    let mut turns = 0u64;
    for game in games {
        turns += u64::from(game.final_turn);
        match &game.status {
            GameStatus::MissionComplete => summary.mission_complete += 1,
            GameStatus::Dominated(f) if f == player => summary.dominated_by_player += 1,
            GameStatus::Dominated(_) => summary.dominated_by_rival += 1,
            GameStatus::TurnLimit => summary.turn_limit += 1,
            GameStatus::InProgress => {}
        }
    }
    summary.avg_turns = turns as f64 / games.len().max(1) as f64;
    summary
}
