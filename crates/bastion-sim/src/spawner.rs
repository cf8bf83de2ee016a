//! Spawn controllers: one per unit kind.
//!
//! A controller spawns when all of these hold: its interval has elapsed,
//! its own population cap has room, and the wave director grants
//! permission. It tracks the units it spawned so the cap reflects live
//! units only.

use glam::Vec3;
use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use bastion_core::components::{Kinematics, Lifecycle};
use bastion_core::config::SpawnPolicy;
use bastion_core::enums::UnitKind;
use bastion_core::events::GameEvent;

use crate::wave_director::SpawnGate;
use crate::world_setup;

#[derive(Debug, Clone)]
pub struct SpawnController {
    kind: UnitKind,
    /// `None` when the configured policy was rejected; the controller then never spawns.
    policy: Option<SpawnPolicy>,
    alive: Vec<Entity>,
    next_spawn_secs: f64,
}

impl SpawnController {
    /// Build a controller. An invalid policy disables it instead of failing.
    pub fn new(kind: UnitKind, policy: &SpawnPolicy) -> Self {
        let policy = match policy.validate(kind) {
            Ok(()) => Some(policy.clone()),
            Err(err) => {
                error!(%kind, error = %err, "spawn policy rejected, spawner disabled");
                None
            }
        };
        Self {
            kind,
            policy,
            alive: Vec::new(),
            next_spawn_secs: 0.0,
        }
    }

    pub fn kind(&self) -> UnitKind {
        self.kind
    }

    pub fn is_enabled(&self) -> bool {
        self.policy.is_some()
    }

    /// Units spawned by this controller that are still in play (as of the last tick).
    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }

    pub fn next_spawn_secs(&self) -> f64 {
        self.next_spawn_secs
    }

    /// A new wave may spawn immediately.
    pub fn on_wave_started(&mut self, now: f64) {
        self.next_spawn_secs = now;
    }

    /// Forget every tracked unit. Used when the world is rebuilt.
    pub fn reset(&mut self) {
        self.alive.clear();
        self.next_spawn_secs = 0.0;
    }

    /// Spawn at most one unit this tick.
    pub fn tick(
        &mut self,
        world: &mut World,
        gate: &mut dyn SpawnGate,
        rng: &mut ChaCha8Rng,
        now: f64,
        base: Vec3,
        events: &mut Vec<GameEvent>,
    ) -> Option<Entity> {
        self.prune(world);

        let policy = self.policy.as_ref()?;
        if now < self.next_spawn_secs
            || self.alive.len() >= policy.max_concurrent as usize
            || !gate.can_spawn(self.kind)
        {
            return None;
        }

        let entity = world_setup::spawn_unit(world, rng, self.kind, policy, base, now);
        gate.register_spawned(self.kind);
        self.alive.push(entity);
        self.next_spawn_secs = now + policy.spawn_interval_secs;

        let position = world
            .get::<&Kinematics>(entity)
            .map(|k| k.position)
            .unwrap_or(base);
        debug!(kind = %self.kind, alive = self.alive.len(), ?position, "unit spawned");
        events.push(GameEvent::UnitSpawned {
            unit_id: world_setup::unit_id(entity),
            kind: self.kind,
            position,
        });
        Some(entity)
    }

    /// Drop tracked units that were resolved or despawned.
    fn prune(&mut self, world: &World) {
        self.alive.retain(|&entity| {
            world
                .get::<&Lifecycle>(entity)
                .map(|lifecycle| lifecycle.resolved.is_none())
                .unwrap_or(false)
        });
    }
}
