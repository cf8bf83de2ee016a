//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the wave director, both spawn
//! controllers and the score ledger. It processes player commands at the
//! tick boundary, runs all systems, and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use bastion_core::commands::PlayerCommand;
use bastion_core::components::{Lifecycle, Unit};
use bastion_core::config::GameConfig;
use bastion_core::constants::{DT, MAX_TIME_SCALE};
use bastion_core::enums::{GamePhase, ResolutionCause, UnitKind, WavePhase};
use bastion_core::events::GameEvent;
use bastion_core::state::GameStateSnapshot;
use bastion_core::types::{SimTime, UnitId};

use crate::score::ScoreLedger;
use crate::spawner::SpawnController;
use crate::systems;
use crate::systems::resolution::ResolutionContext;
use crate::wave_director::WaveDirector;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    config: GameConfig,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    arrival_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,

    director: WaveDirector,
    tank_spawner: SpawnController,
    helicopter_spawner: SpawnController,
    /// Scoring is optional; every path skips it when absent.
    score: Option<ScoreLedger>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    ///
    /// An invalid spawn policy disables that kind's spawner rather than
    /// failing; the rest of the simulation runs normally.
    pub fn new(config: SimConfig) -> Self {
        let game = config.game;
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.clamp(0.0, MAX_TIME_SCALE),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            arrival_buffer: Vec::new(),
            events: Vec::new(),
            director: WaveDirector::from_config(&game),
            tank_spawner: SpawnController::new(UnitKind::Tank, &game.tank),
            helicopter_spawner: SpawnController::new(UnitKind::Helicopter, &game.helicopter),
            score: Some(ScoreLedger::default()),
            config: game,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.director,
            self.score.as_ref(),
            self.config.base_position,
            events,
        )
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn director(&self) -> &WaveDirector {
        &self.director
    }

    pub fn spawner(&self, kind: UnitKind) -> &SpawnController {
        match kind {
            UnitKind::Tank => &self.tank_spawner,
            UnitKind::Helicopter => &self.helicopter_spawner,
        }
    }

    pub fn score(&self) -> Option<&ScoreLedger> {
        self.score.as_ref()
    }

    /// Remove the score ledger. The simulation keeps running without scoring.
    pub fn detach_score_ledger(&mut self) -> Option<ScoreLedger> {
        self.score.take()
    }

    pub fn attach_score_ledger(&mut self, ledger: ScoreLedger) {
        self.score = Some(ledger);
    }

    /// Number of unresolved units of `kind` in the world.
    pub fn live_unit_count(&self, kind: UnitKind) -> usize {
        self.world
            .query::<(&Unit, &Lifecycle)>()
            .iter()
            .filter(|(_, (unit, lifecycle))| unit.kind == kind && lifecycle.resolved.is_none())
            .count()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command. Commands that do not apply in the
    /// current state are logged and dropped.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartGame => {
                if self.phase == GamePhase::MainMenu {
                    self.phase = GamePhase::Active;
                    self.time = SimTime::default();
                    self.begin_first_wave();
                } else {
                    debug!(phase = ?self.phase, "StartGame ignored, game already running");
                }
            }
            PlayerCommand::Restart => {
                info!(tick = self.time.tick, "restarting run");
                systems::cleanup::despawn_all(&mut self.world, &mut self.despawn_buffer);
                self.tank_spawner.reset();
                self.helicopter_spawner.reset();
                self.director = WaveDirector::from_config(&self.config);
                if self.score.is_some() {
                    self.score = Some(ScoreLedger::default());
                }
                self.time = SimTime::default();
                self.phase = GamePhase::Active;
                self.begin_first_wave();
            }
            PlayerCommand::AdvanceWave => {
                if self.phase != GamePhase::Active {
                    warn!(phase = ?self.phase, "AdvanceWave ignored, game not active");
                    return;
                }
                let now = self.time.elapsed_secs;
                match self.director.advance(now, &mut self.events) {
                    Ok(_) => self.notify_wave_started(now),
                    Err(err) => warn!(error = %err, "AdvanceWave ignored"),
                }
            }
            PlayerCommand::SkipWave => {
                if self.phase != GamePhase::Active
                    || self.director.phase() != WavePhase::InProgress
                {
                    warn!(
                        phase = ?self.phase,
                        wave_phase = ?self.director.phase(),
                        "SkipWave ignored, no wave in progress"
                    );
                    return;
                }
                let mut ctx = ResolutionContext {
                    director: &mut self.director,
                    score: self.score.as_mut(),
                    base: self.config.base_position,
                    events: &mut self.events,
                };
                let removed = systems::resolution::skip_wave(&mut self.world, &mut ctx);
                info!(wave = self.director.wave_number(), removed, "wave skipped");
            }
            PlayerCommand::FireShot => {
                if self.phase != GamePhase::Active {
                    debug!(phase = ?self.phase, "shot ignored, game not active");
                    return;
                }
                if let Some(score) = self.score.as_mut() {
                    score.record_shot();
                }
                self.events.push(GameEvent::ShotFired);
            }
            PlayerCommand::UnitHit { unit_id } => self.handle_hit(unit_id),
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = scale.clamp(0.0, MAX_TIME_SCALE);
            }
        }
    }

    fn handle_hit(&mut self, unit_id: UnitId) {
        if self.phase != GamePhase::Active {
            warn!(?unit_id, phase = ?self.phase, "hit ignored, game not active");
            return;
        }
        let Some(entity) = world_setup::entity_for(unit_id) else {
            warn!(?unit_id, "hit on malformed unit id ignored");
            return;
        };
        let mut ctx = ResolutionContext {
            director: &mut self.director,
            score: self.score.as_mut(),
            base: self.config.base_position,
            events: &mut self.events,
        };
        systems::resolution::resolve_unit(
            &mut self.world,
            entity,
            ResolutionCause::PlayerKill,
            &mut ctx,
        );
    }

    fn begin_first_wave(&mut self) {
        let now = self.time.elapsed_secs;
        match self.director.start_first_wave(now, &mut self.events) {
            Ok(_) => self.notify_wave_started(now),
            Err(err) => warn!(error = %err, "first wave not started"),
        }
    }

    fn notify_wave_started(&mut self, now: f64) {
        self.tank_spawner.on_wave_started(now);
        self.helicopter_spawner.on_wave_started(now);
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let now = self.time.elapsed_secs;
        let base = self.config.base_position;

        // 1. Spawning
        for spawner in [&mut self.tank_spawner, &mut self.helicopter_spawner] {
            spawner.tick(
                &mut self.world,
                &mut self.director,
                &mut self.rng,
                now,
                base,
                &mut self.events,
            );
        }
        // 2. Movement
        systems::movement::run(
            &mut self.world,
            &mut self.rng,
            &self.config,
            now,
            DT as f32,
            &mut self.arrival_buffer,
        );
        // 3. Arrivals
        let mut ctx = ResolutionContext {
            director: &mut self.director,
            score: self.score.as_mut(),
            base,
            events: &mut self.events,
        };
        for &entity in &self.arrival_buffer {
            systems::resolution::resolve_unit(
                &mut self.world,
                entity,
                ResolutionCause::ReachedBase,
                &mut ctx,
            );
        }
        // 4. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
        // 5. Wave completion, after every registration this tick
        self.director.evaluate(now, &mut self.events);
    }
}
