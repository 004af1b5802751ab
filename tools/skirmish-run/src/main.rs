//! Headless skirmish runner: plays the canned carrier-vs-raiders scenario
//! for a fixed number of simulated seconds and prints a JSON summary.
//!
//! Usage:
//!   cargo run --release -p skirmish-run -- --seed 7 --seconds 60
//!   RUST_LOG=skirmish_ai=debug cargo run -p skirmish-run -- --tuning tuning.json

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use skirmish_ai::weapons::WeaponCatalog;
use skirmish_core::config::AiTuning;
use skirmish_core::constants::TICK_RATE;
use skirmish_core::events::CombatEvent;
use skirmish_sim::{SimConfig, SkirmishEngine};

#[derive(Parser, Debug)]
#[command(name = "skirmish-run")]
#[command(about = "Run a headless space-combat skirmish and summarize the outcome")]
struct Args {
    /// RNG seed; the same seed replays the same fight
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,

    /// JSON file overriding AI tuning values
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// JSON weapon catalog replacing the built-in table
    #[arg(long)]
    weapons: Option<PathBuf>,

    /// Print the final snapshot instead of the summary
    #[arg(long)]
    full: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => AiTuning::from_path(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => AiTuning::default(),
    };
    let catalog = match &args.weapons {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading weapon catalog {}", path.display()))?;
            WeaponCatalog::from_json_str(&text)
                .with_context(|| format!("parsing weapon catalog {}", path.display()))?
        }
        None => WeaponCatalog::standard(),
    };
    anyhow::ensure!(
        args.seconds.is_finite() && args.seconds > 0.0,
        "--seconds must be positive, got {}",
        args.seconds
    );

    let mut engine = SkirmishEngine::new(SimConfig {
        seed: args.seed,
        tuning,
        catalog,
    });
    engine.setup_skirmish();
    tracing::info!(seed = args.seed, seconds = args.seconds, "starting skirmish");

    let ticks = (args.seconds * TICK_RATE as f64).ceil() as u64;
    let mut acquisitions = 0u32;
    let mut state_changes = 0u32;
    let mut last = None;

    for tick in 0..ticks {
        let snapshot = engine.tick();
        for event in &snapshot.events {
            match event {
                CombatEvent::TargetAcquired { .. } => acquisitions += 1,
                CombatEvent::StateChanged { .. } => state_changes += 1,
                _ => {}
            }
        }
        if tick % TICK_RATE as u64 == 0 {
            tracing::debug!(
                tick,
                friendly = snapshot.score.friendly_alive,
                hostile = snapshot.score.hostile_alive,
                "progress"
            );
        }
        let done = snapshot.score.friendly_alive == 0 || snapshot.score.hostile_alive == 0;
        last = Some(snapshot);
        if done {
            tracing::info!(tick, "one side eliminated");
            break;
        }
    }

    let snapshot = last.context("no ticks were simulated")?;
    let output = if args.full {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        let summary = json!({
            "seed": args.seed,
            "elapsed_secs": snapshot.time.elapsed_secs,
            "ticks": snapshot.time.tick,
            "friendly_alive": snapshot.score.friendly_alive,
            "hostile_alive": snapshot.score.hostile_alive,
            "rounds_fired": snapshot.score.rounds_fired,
            "missiles_launched": snapshot.score.missiles_launched,
            "target_acquisitions": acquisitions,
            "state_changes": state_changes,
            "combatants": snapshot.combatants.iter().map(|c| json!({
                "id": c.id,
                "faction": c.faction,
                "kind": c.kind,
                "state": c.state,
                "sub_state": c.sub_state,
                "hit_points": c.hit_points,
            })).collect::<Vec<_>>(),
        });
        serde_json::to_string_pretty(&summary)?
    };
    println!("{output}");
    Ok(())
}
