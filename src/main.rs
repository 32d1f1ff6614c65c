//! Warlord -- self-play simulator for the conquest engine.
//!
//! Plays seeded games from a starting position with a random attack policy for
//! the player's faction and writes one JSON record per game to stdout or a
//! file. Logs go to stderr; set `RUST_LOG` to adjust verbosity.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use warlord::board::Faction;
use warlord::config::{DiceTier, RulesConfig};
use warlord::protocol::DEFAULT_POSITION;
use warlord::selfplay::{self, SelfPlayConfig};

#[derive(Debug, Parser)]
#[command(name = "warlord", version, about = "Simulate dice-based territorial conquest games")]
struct Args {
    /// Number of games to play.
    #[arg(long, default_value_t = 10)]
    games: usize,

    /// Random seed, 0 for entropy.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of parallel threads.
    #[arg(long, default_value_t = 4)]
    threads: usize,

    /// Starting position, e.g. `1/Brazil@blue:4,Argentina@red:3`.
    #[arg(long, default_value = DEFAULT_POSITION)]
    position: String,

    /// Faction played by the simulated player.
    #[arg(long, default_value = "blue")]
    player: String,

    /// Targets pressed per round.
    #[arg(long, default_value_t = 3)]
    attacks: usize,

    /// JSON rules file; unspecified fields keep their defaults.
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Attacker dice tiering: `basic` or `extended`. Overrides the rules file.
    #[arg(long, value_parser = parse_tier)]
    dice: Option<DiceTier>,

    /// Output file path (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Only log warnings and errors.
    #[arg(long)]
    quiet: bool,
}

fn parse_tier(s: &str) -> Result<DiceTier, String> {
    DiceTier::from_name(s).ok_or_else(|| format!("unknown dice tier '{}'", s))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.quiet { "warlord=warn" } else { "warlord=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut rules = match &args.rules {
        Some(path) => RulesConfig::load(path)?,
        None => RulesConfig::default(),
    };
    if let Some(tier) = args.dice {
        rules.dice_tier = tier;
    }

    let config = SelfPlayConfig {
        num_games: args.games,
        position: args.position,
        player: Faction::new(args.player),
        rules,
        attacks_per_round: args.attacks,
        threads: args.threads,
        seed: args.seed,
    };

    info!(
        games = config.num_games,
        threads = config.threads,
        seed = config.seed,
        dice = ?config.rules.dice_tier,
        "self-play starting"
    );

    let start = Instant::now();
    let games = selfplay::run_self_play(&config)?;
    let summary = selfplay::summarize(&games, &config.player);
    info!(
        elapsed_s = start.elapsed().as_secs_f64(),
        games = summary.games,
        mission_complete = summary.mission_complete,
        dominated_by_player = summary.dominated_by_player,
        dominated_by_rival = summary.dominated_by_rival,
        turn_limit = summary.turn_limit,
        avg_turns = summary.avg_turns,
        "self-play finished"
    );

    match args.output {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(&path)?);
            selfplay::write_jsonl(&games, &mut writer)?;
            info!(path = %path.display(), "wrote {} games", games.len());
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            selfplay::write_jsonl(&games, &mut writer)?;
        }
    }
    Ok(())
}
