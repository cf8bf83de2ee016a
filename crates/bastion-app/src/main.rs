use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bastion_app::autopilot::{Autogunner, Autopilot};
use bastion_app::game_loop::TICK_DURATION;
use bastion_app::state::AppState;
use bastion_core::commands::PlayerCommand;
use bastion_core::config::GameConfig;
use bastion_core::constants::{MAX_TIME_SCALE, TICK_RATE};
use bastion_core::state::{GameStateSnapshot, ScoreView};
use bastion_sim::{SimConfig, SimulationEngine};

/// Simulated minutes per requested wave after which a run is abandoned.
const MAX_MINUTES_PER_WAVE: u64 = 15;

#[derive(Parser)]
#[command(author, version, about = "Bastion wave simulation", long_about = None)]
struct Args {
    /// RNG seed for the simulation
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// JSON config file; missing sections use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Waves to clear before stopping
    #[arg(short, long, default_value_t = 3)]
    waves: u32,

    /// Probability that an autogunner shot hits
    #[arg(long, default_value_t = 0.6, value_parser = parse_probability)]
    hit_chance: f64,

    /// Seconds between autogunner shots
    #[arg(long, default_value_t = 0.5)]
    fire_interval: f64,

    /// Run on the game loop thread at wall-clock speed instead of fast-forwarding
    #[arg(long, default_value_t = false)]
    realtime: bool,

    /// Simulation speed multiplier in realtime mode (0 to 4)
    #[arg(long, default_value_t = 1.0, value_parser = parse_time_scale)]
    time_scale: f64,

    /// Print the final score as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let game = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Err(err) = game.validate() {
        warn!(error = %err, "config failed validation, affected spawners will be disabled");
    }

    let cadence_ticks = (args.fire_interval * TICK_RATE as f64).round().max(1.0) as u64;
    let gunner = Autogunner::new(args.seed ^ 0x9e37_79b9, args.hit_chance, cadence_ticks);
    let mut pilot = Autopilot::new(gunner, args.waves);
    let sim = SimConfig {
        seed: args.seed,
        time_scale: args.time_scale,
        game,
    };

    info!(seed = args.seed, waves = args.waves, realtime = args.realtime, "starting run");
    let last = if args.realtime {
        run_realtime(sim, &mut pilot, args.waves)?
    } else {
        run_fast_forward(sim, &mut pilot, args.waves)?
    };

    report(&last.score, last.time.elapsed_secs, args.json)
}

/// Tick the engine directly, as fast as possible.
fn run_fast_forward(
    sim: SimConfig,
    pilot: &mut Autopilot,
    waves: u32,
) -> Result<GameStateSnapshot> {
    let max_ticks = time_limit_secs(waves) * TICK_RATE as u64;
    let mut engine = SimulationEngine::new(sim);
    engine.queue_command(PlayerCommand::StartGame);

    let mut snapshot = engine.tick();
    for _ in 0..max_ticks {
        engine.queue_commands(pilot.observe(&snapshot));
        if pilot.is_finished() {
            return Ok(snapshot);
        }
        snapshot = engine.tick();
    }
    bail!(
        "gave up after {} simulated seconds with {} wave(s) cleared",
        snapshot.time.elapsed_secs as u64,
        pilot.cleared().len()
    )
}

/// Drive the threaded game loop at wall-clock speed, polling snapshots.
fn run_realtime(sim: SimConfig, pilot: &mut Autopilot, waves: u32) -> Result<GameStateSnapshot> {
    let limit = realtime_limit(waves, sim.time_scale);
    let deadline = Instant::now() + limit;
    let state = AppState::new();
    state.start(sim)?;
    state.send(PlayerCommand::StartGame)?;

    let result = loop {
        if Instant::now() > deadline {
            break Err(anyhow::anyhow!(
                "gave up with {} wave(s) cleared",
                pilot.cleared().len()
            ));
        }
        std::thread::sleep(TICK_DURATION / 2);
        let Some(snapshot) = state.snapshot() else {
            continue;
        };
        for command in pilot.observe(&snapshot) {
            state.send(command)?;
        }
        if pilot.is_finished() {
            break Ok(snapshot);
        }
    };

    state.shutdown()?;
    result
}

fn time_limit_secs(waves: u32) -> u64 {
    MAX_MINUTES_PER_WAVE * 60 * u64::from(waves.max(1))
}

/// Wall-clock budget for a realtime run. The engine caps the time scale,
/// so the budget uses the same cap.
fn realtime_limit(waves: u32, time_scale: f64) -> Duration {
    let time_scale = time_scale.clamp(0.001, MAX_TIME_SCALE);
    Duration::from_secs(time_limit_secs(waves)).div_f64(time_scale)
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{raw} is not a probability between 0 and 1"))
    }
}

fn parse_time_scale(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(format!("{raw} is not a non-negative finite speed"))
    }
}

fn report(score: &ScoreView, elapsed_secs: f64, json: bool) -> Result<()> {
    info!(
        elapsed_secs,
        tanks = score.tanks_destroyed,
        helicopters = score.helicopters_destroyed,
        tanks_reached_base = score.tanks_reached_base,
        helicopters_reached_base = score.helicopters_reached_base,
        shots = score.shots_fired,
        accuracy = score.accuracy,
        longest_kill = score.longest_kill,
        "run finished"
    );
    if json {
        println!("{}", serde_json::to_string_pretty(score)?);
    }
    Ok(())
}
