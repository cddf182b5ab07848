//! Headless match runner.
//!
//! Usage: cargo run --bin rally-sim -- [--config match.toml] [--map board.json] [--rounds 30]
//!
//! Human-controlled robots in the config are driven by the greedy policy so
//! the match can run unattended. Set `RUST_LOG=robot_rally=debug` for
//! per-move tracing.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use robot_rally::ai::{CardPolicy, GreedyPolicy};
use robot_rally::core::{GameRng, MatchConfig};
use robot_rally::rules::Match;

/// Run a Robot Rally match between computer players
#[derive(Parser, Debug)]
#[command(name = "rally-sim")]
#[command(about = "Simulate a Robot Rally match and print the event log", long_about = None)]
struct Args {
    /// TOML match configuration (defaults are used if missing or invalid)
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON map, overriding the one named in the config
    #[arg(long)]
    map: Option<PathBuf>,

    /// Seed override
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many rounds
    #[arg(long, default_value_t = 30)]
    rounds: u32,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> MatchConfig {
    let Some(path) = path else {
        return MatchConfig::default();
    };
    match MatchConfig::load(path) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load config, using defaults");
            MatchConfig::default()
        }
    }
}

/// Fill registers for robots that are still waiting on a human.
fn autopilot(game: &mut Match, rng: &mut GameRng) -> anyhow::Result<()> {
    for robot in game.pending_robots() {
        let (Some(state), Some(program)) = (game.robot(robot), game.program(robot)) else {
            continue;
        };
        let picks = GreedyPolicy.choose(game.board(), state, program.hand(), rng);
        for index in picks {
            game.select_card(robot, index)
                .with_context(|| format!("autopilot pick {index} for {robot}"))?;
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let mut config = load_config(args.config.as_ref());
    if let Some(map) = args.map {
        config.map = Some(map);
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let mut game = Match::new(&config).context("failed to set up match")?;
    let mut rng = GameRng::new(config.seed).for_context("autopilot");

    while !game.is_over() && game.round() <= args.rounds {
        autopilot(&mut game, &mut rng)?;
        game.request_execute_phase()
            .context("execution refused after autopilot")?;

        for event in game.drain_events() {
            if args.json {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                println!("{event}");
            }
        }
    }

    match game.result() {
        Some(result) => tracing::info!(?result, rounds = game.round(), "match finished"),
        None => tracing::info!(rounds = args.rounds, "round limit reached"),
    }
    Ok(())
}
