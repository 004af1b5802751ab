//! Entity spawn factories for setting up the skirmish world.
//!
//! Every combatant gets an `EntityId` from the caller's counter so handles
//! stay stable and deterministic across runs with the same seed.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::*;
use skirmish_core::enums::*;
use skirmish_core::types::EntityId;

use skirmish_ai::profiles::{airframe_for, loadout_for};

fn allocate(next_id: &mut u64) -> EntityId {
    *next_id += 1;
    EntityId(*next_id)
}

/// Spawn one combatant with its hull's default airframe and loadout.
pub fn spawn_combatant(
    world: &mut World,
    next_id: &mut u64,
    faction: Faction,
    kind: UnitKind,
    position: DVec2,
    facing: f64,
) -> EntityId {
    let id = allocate(next_id);
    let combatant = Combatant::new(
        id,
        faction,
        kind,
        airframe_for(kind),
        loadout_for(kind),
        position,
        facing,
    );
    world.spawn((combatant,));
    id
}

/// Spawn a leader and one wingman per offset. Offsets are in the leader's
/// local frame (+x = nose). Returns the leader first.
pub fn spawn_squad(
    world: &mut World,
    next_id: &mut u64,
    faction: Faction,
    kind: UnitKind,
    position: DVec2,
    facing: f64,
    offsets: &[DVec2],
) -> Vec<EntityId> {
    let leader = spawn_combatant(world, next_id, faction, kind, position, facing);
    let mut members = vec![leader];

    for &offset in offsets {
        let slot = position + DVec2::from_angle(facing).rotate(offset);
        let id = allocate(next_id);
        let mut wingman = Combatant::new(
            id,
            faction,
            kind,
            airframe_for(kind),
            loadout_for(kind),
            slot,
            facing,
        );
        wingman.squad = Some(SquadLink {
            leader,
            offset,
            role: SquadRole::Wingman,
        });
        world.spawn((wingman,));
        members.push(id);
    }
    members
}

/// Put a squad leader in formation on `commander` at `offset` (commander frame).
///
/// Returns false if `leader` does not exist.
pub fn assign_commander(
    world: &mut World,
    leader: EntityId,
    commander: EntityId,
    offset: DVec2,
) -> bool {
    for (_entity, combatant) in world.query_mut::<&mut Combatant>() {
        if combatant.id == leader {
            combatant.squad = Some(SquadLink {
                leader: commander,
                offset,
                role: SquadRole::Leader,
            });
            return true;
        }
    }
    false
}

/// Spawn a craft orbiting `station` at `orbit_radius`, starting at `phase`.
#[allow(clippy::too_many_arguments)]
pub fn spawn_guard(
    world: &mut World,
    next_id: &mut u64,
    faction: Faction,
    kind: UnitKind,
    station: EntityId,
    station_position: DVec2,
    orbit_radius: f64,
    angular_speed: f64,
    phase: f64,
) -> EntityId {
    let id = allocate(next_id);
    let position = station_position + DVec2::from_angle(phase) * orbit_radius;
    let mut combatant = Combatant::new(
        id,
        faction,
        kind,
        airframe_for(kind),
        loadout_for(kind),
        position,
        phase + angular_speed.signum() * std::f64::consts::FRAC_PI_2,
    );
    combatant.guard = Some(GuardPost {
        station,
        orbit_radius,
        angular_speed,
        phase,
    });
    world.spawn((combatant,));
    id
}

/// Spawn a static body that blocks fire.
pub fn spawn_obstacle(world: &mut World, position: DVec2, radius: f64) -> hecs::Entity {
    world.spawn((Obstacle { position, radius },))
}

/// The canned two-sided skirmish: a friendly carrier group against a
/// hostile raiding party, with a few asteroids in between.
pub fn setup_skirmish(world: &mut World, next_id: &mut u64, rng: &mut ChaCha8Rng) {
    let carrier_pos = DVec2::ZERO;
    let carrier = spawn_combatant(
        world,
        next_id,
        Faction::Friendly,
        UnitKind::Capital,
        carrier_pos,
        0.0,
    );
    for i in 0..2 {
        spawn_guard(
            world,
            next_id,
            Faction::Friendly,
            UnitKind::Fighter,
            carrier,
            carrier_pos,
            400.0,
            0.6,
            i as f64 * TAU / 2.0,
        );
    }
    let escort_offset = DVec2::new(600.0, 800.0);
    let escort = spawn_squad(
        world,
        next_id,
        Faction::Friendly,
        UnitKind::Interceptor,
        carrier_pos + escort_offset,
        0.0,
        &[DVec2::new(-90.0, 70.0), DVec2::new(-90.0, -70.0)],
    );
    assign_commander(world, escort[0], carrier, escort_offset);

    let raider_pos = DVec2::new(5200.0, 1200.0);
    spawn_squad(
        world,
        next_id,
        Faction::Hostile,
        UnitKind::Fighter,
        raider_pos,
        std::f64::consts::PI,
        &[
            DVec2::new(-100.0, 80.0),
            DVec2::new(-100.0, -80.0),
            DVec2::new(-200.0, 0.0),
        ],
    );
    spawn_combatant(
        world,
        next_id,
        Faction::Hostile,
        UnitKind::Capital,
        DVec2::new(6500.0, -900.0),
        std::f64::consts::PI,
    );

    for _ in 0..3 {
        let position = DVec2::new(rng.gen_range(2000.0..3500.0), rng.gen_range(-1500.0..1500.0));
        let radius = rng.gen_range(80.0..180.0);
        spawn_obstacle(world, position, radius);
    }

    tracing::info!(combatants = *next_id, "skirmish world set up");
}
