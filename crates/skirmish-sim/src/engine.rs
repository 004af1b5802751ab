//! Simulation engine: the headless host for the combat AI.
//!
//! `SkirmishEngine` owns the hecs world, runs every system once per tick,
//! and produces `SkirmishSnapshot`s. No rendering or input dependency, so
//! runs are deterministic for a given seed.

use glam::DVec2;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Combatant, PlayerControlled};
use skirmish_core::config::AiTuning;
use skirmish_core::enums::{Faction, UnitKind};
use skirmish_core::events::CombatEvent;
use skirmish_core::state::SkirmishSnapshot;
use skirmish_core::types::{EntityId, SimTime};

use skirmish_ai::services::Launch;
use skirmish_ai::weapons::WeaponCatalog;

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: AiTuning,
    pub catalog: WeaponCatalog,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: AiTuning::default(),
            catalog: WeaponCatalog::standard(),
        }
    }
}

/// Running totals across the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreState {
    pub rounds_fired: u32,
    pub missiles_launched: u32,
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SkirmishEngine {
    world: World,
    time: SimTime,
    rng: ChaCha8Rng,
    tuning: AiTuning,
    catalog: WeaponCatalog,
    next_id: u64,
    launches: Vec<Launch>,
    events: Vec<CombatEvent>,
    despawn_buffer: Vec<hecs::Entity>,
    score: ScoreState,
}

impl SkirmishEngine {
    pub fn new(config: SimConfig) -> Self {
        if let Err(err) = config.tuning.validate() {
            tracing::warn!(%err, "AI tuning failed validation; running with it anyway");
        }
        if let Err(err) = config.catalog.validate() {
            tracing::warn!(%err, "weapon catalog failed validation; bad entries will hold fire");
        }
        Self {
            world: World::new(),
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            tuning: config.tuning,
            catalog: config.catalog,
            next_id: 0,
            launches: Vec::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            score: ScoreState::default(),
        }
    }

    /// Populate the world with the canned carrier-vs-raiders skirmish.
    pub fn setup_skirmish(&mut self) {
        world_setup::setup_skirmish(&mut self.world, &mut self.next_id, &mut self.rng);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SkirmishSnapshot {
        self.run_systems();
        self.time.advance();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, events, &self.score)
    }

    fn run_systems(&mut self) {
        systems::combat_ai::run(
            &mut self.world,
            &self.catalog,
            &self.tuning,
            &mut self.rng,
            &mut self.launches,
            &mut self.events,
        );
        systems::projectiles::launch(&mut self.world, &mut self.launches, &mut self.score);
        systems::projectiles::guide(&mut self.world);
        systems::movement::run(&mut self.world);
        systems::impacts::run(&mut self.world);
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    pub fn spawn_combatant(
        &mut self,
        faction: Faction,
        kind: UnitKind,
        position: DVec2,
        facing: f64,
    ) -> EntityId {
        world_setup::spawn_combatant(
            &mut self.world,
            &mut self.next_id,
            faction,
            kind,
            position,
            facing,
        )
    }

    pub fn spawn_squad(
        &mut self,
        faction: Faction,
        kind: UnitKind,
        position: DVec2,
        facing: f64,
        offsets: &[DVec2],
    ) -> Vec<EntityId> {
        world_setup::spawn_squad(
            &mut self.world,
            &mut self.next_id,
            faction,
            kind,
            position,
            facing,
            offsets,
        )
    }

    /// Spawn a craft guarding `station`. Returns `None` if the station does not exist.
    pub fn spawn_guard(
        &mut self,
        kind: UnitKind,
        station: EntityId,
        orbit_radius: f64,
        angular_speed: f64,
        phase: f64,
    ) -> Option<EntityId> {
        let host = self.combatant(station)?;
        Some(world_setup::spawn_guard(
            &mut self.world,
            &mut self.next_id,
            host.faction,
            kind,
            station,
            host.position,
            orbit_radius,
            angular_speed,
            phase,
        ))
    }

    /// Have squad leader `leader` keep station on `commander` at `offset`.
    pub fn assign_commander(
        &mut self,
        leader: EntityId,
        commander: EntityId,
        offset: DVec2,
    ) -> bool {
        world_setup::assign_commander(&mut self.world, leader, commander, offset)
    }

    pub fn spawn_obstacle(&mut self, position: DVec2, radius: f64) {
        world_setup::spawn_obstacle(&mut self.world, position, radius);
    }

    /// Hand a combatant to the player: the AI stops flying it.
    pub fn set_player_controlled(&mut self, id: EntityId) -> bool {
        match self.find(id) {
            Some(entity) => self.world.insert_one(entity, PlayerControlled).is_ok(),
            None => false,
        }
    }

    /// Kill a combatant outright. Returns false if it does not exist.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(entity) = self.find(id) else {
            return false;
        };
        match self.world.get::<&mut Combatant>(entity) {
            Ok(mut combatant) => {
                combatant.hit_points = 0.0;
                combatant.alive = false;
                true
            }
            Err(_) => false,
        }
    }

    /// Copy of a combatant's current state.
    pub fn combatant(&self, id: EntityId) -> Option<Combatant> {
        self.world
            .query::<&Combatant>()
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(_, c)| c.clone())
    }

    /// Apply `edit` to a combatant in place. Returns false if it does not exist.
    pub fn edit_combatant(&mut self, id: EntityId, edit: impl FnOnce(&mut Combatant)) -> bool {
        let found = self
            .world
            .query_mut::<&mut Combatant>()
            .into_iter()
            .find(|(_, c)| c.id == id);
        match found {
            Some((_, combatant)) => {
                edit(combatant);
                true
            }
            None => false,
        }
    }

    fn find(&self, id: EntityId) -> Option<hecs::Entity> {
        self.world
            .query::<&Combatant>()
            .iter()
            .find(|(_, c)| c.id == id)
            .map(|(entity, _)| entity)
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &AiTuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &WeaponCatalog {
        &self.catalog
    }

    pub fn score(&self) -> ScoreState {
        self.score
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }
}
