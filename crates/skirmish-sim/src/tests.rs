//! Tests for the simulation engine, projectile systems, and the AI host loop.

use std::f64::consts::PI;

use glam::DVec2;
use hecs::World;

use skirmish_core::components::*;
use skirmish_core::constants::*;
use skirmish_core::enums::*;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::{CombatantView, SkirmishSnapshot};
use skirmish_core::types::{heading_of, wrap_angle, EntityId};

use crate::engine::{SimConfig, SkirmishEngine};
use crate::systems::{cleanup, impacts, projectiles};

fn view(snapshot: &SkirmishSnapshot, id: EntityId) -> &CombatantView {
    snapshot
        .combatants
        .iter()
        .find(|c| c.id == id)
        .expect("combatant missing from snapshot")
}

/// A stationary, effectively indestructible hostile the AI can chase.
fn spawn_dummy(engine: &mut SkirmishEngine, position: DVec2) -> EntityId {
    let id = engine.spawn_combatant(Faction::Hostile, UnitKind::Fighter, position, PI);
    assert!(engine.set_player_controlled(id));
    engine.edit_combatant(id, |c| c.hit_points = 1.0e9);
    id
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SkirmishEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SkirmishEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    engine_a.setup_skirmish();
    engine_b.setup_skirmish();

    for _ in 0..300 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SkirmishEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SkirmishEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });
    engine_a.setup_skirmish();
    engine_b.setup_skirmish();

    let mut diverged = false;
    for _ in 0..1200 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Engagement through the host ----

#[test]
fn test_fighter_engages_stationary_hostile() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    let hunter = engine.spawn_combatant(Faction::Friendly, UnitKind::Fighter, DVec2::ZERO, 0.0);
    engine.edit_combatant(hunter, |c| {
        c.airframe.max_speed = 650.0;
        c.airframe.max_turn_rate_deg = 7.0f64.to_degrees();
    });
    let dummy = spawn_dummy(&mut engine, DVec2::new(500.0, 0.0));

    let snapshot = engine.tick();
    let me = view(&snapshot, hunter);
    assert_eq!(me.target, Some(dummy), "should acquire on the first retarget cycle");
    assert_eq!(me.state, "dogfight");
    assert_eq!(me.sub_state.as_deref(), Some("merge"));

    let max_step = 7.0 * DT + 1e-9;
    let mut facing = me.facing;
    let mut velocity = me.velocity;
    let mut min_distance = f64::MAX;
    for tick in 0..(3 * TICK_RATE) {
        let snapshot = engine.tick();
        let me = view(&snapshot, hunter);
        let target = view(&snapshot, dummy);

        let facing_step = wrap_angle(me.facing - facing).abs();
        assert!(facing_step <= max_step, "tick {tick}: facing turned {facing_step}");
        if velocity.length() > 1e-6 && me.velocity.length() > 1e-6 {
            let heading_step = wrap_angle(heading_of(me.velocity) - heading_of(velocity)).abs();
            assert!(heading_step <= max_step, "tick {tick}: velocity turned {heading_step}");
        }
        facing = me.facing;
        velocity = me.velocity;
        min_distance = min_distance.min(me.position.distance(target.position));
    }

    assert!(
        min_distance < DOGFIGHT_ENTER_RANGE,
        "closest approach {min_distance}"
    );
    assert!(engine.score().rounds_fired > 0, "hunter should have opened fire");
}

#[test]
fn test_player_controlled_is_not_flown() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    let player = engine.spawn_combatant(Faction::Friendly, UnitKind::Fighter, DVec2::ZERO, 0.0);
    assert!(engine.set_player_controlled(player));
    spawn_dummy(&mut engine, DVec2::new(400.0, 0.0));

    for _ in 0..30 {
        engine.tick();
    }
    let me = engine.combatant(player).unwrap();
    assert_eq!(me.target, None);
    assert_eq!(me.engagement, Engagement::Guard);
    assert_eq!(me.position, DVec2::ZERO);
}

#[test]
fn test_destroyed_target_is_replaced() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    let hunter = engine.spawn_combatant(Faction::Friendly, UnitKind::Fighter, DVec2::ZERO, 0.0);
    let near = spawn_dummy(&mut engine, DVec2::new(800.0, 0.0));
    let far = spawn_dummy(&mut engine, DVec2::new(0.0, 3000.0));

    let snapshot = engine.tick();
    assert_eq!(view(&snapshot, hunter).target, Some(near));

    assert!(engine.destroy(near));
    let snapshot = engine.tick();
    assert!(
        snapshot.events.contains(&CombatEvent::TargetLost {
            entity: hunter,
            target: near,
        }),
        "losing the target should be reported"
    );
    assert!(
        snapshot.combatants.iter().all(|c| c.id != near),
        "destroyed combatant should be cleaned up"
    );

    let mut reacquired = false;
    for _ in 0..(2 * TICK_RATE) {
        let snapshot = engine.tick();
        if view(&snapshot, hunter).target == Some(far) {
            reacquired = true;
            break;
        }
    }
    assert!(reacquired, "next retarget cycle should pick the remaining hostile");
}

#[test]
fn test_guard_holds_orbit() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    let carrier = engine.spawn_combatant(Faction::Friendly, UnitKind::Capital, DVec2::ZERO, 0.0);
    let guard = engine
        .spawn_guard(UnitKind::Fighter, carrier, 400.0, 0.6, 0.0)
        .expect("carrier exists");

    for _ in 0..(4 * TICK_RATE) {
        let snapshot = engine.tick();
        let g = view(&snapshot, guard);
        let radius = g.position.length();
        assert!(
            (radius - 400.0).abs() < 100.0,
            "guard drifted to radius {radius}"
        );
        assert_eq!(g.state, "guard");
    }
    let post = engine.combatant(guard).unwrap().guard.unwrap();
    assert!(post.phase > 2.0, "orbit phase should advance, got {}", post.phase);
}

#[test]
fn test_escort_leader_keeps_station_on_commander() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    let carrier = engine.spawn_combatant(Faction::Friendly, UnitKind::Capital, DVec2::ZERO, 0.0);
    let squad = engine.spawn_squad(
        Faction::Friendly,
        UnitKind::Interceptor,
        DVec2::new(-2000.0, 0.0),
        0.0,
        &[DVec2::new(-90.0, 70.0)],
    );
    let offset = DVec2::new(300.0, 0.0);
    assert!(engine.assign_commander(squad[0], carrier, offset));
    assert!(!engine.assign_commander(EntityId(999), carrier, offset));

    let interceptor = skirmish_ai::profiles::airframe_for(UnitKind::Interceptor);
    let cap = LEADER_SPEED_CAP * interceptor.max_speed;
    let mut start = None;
    for _ in 0..(2 * TICK_RATE) {
        let snapshot = engine.tick();
        let leader = view(&snapshot, squad[0]);
        assert_eq!(leader.state, "guard");
        assert!(
            leader.velocity.length() <= cap + 1e-9,
            "leader speed {} over cap {cap}",
            leader.velocity.length()
        );
        start.get_or_insert(leader.position.distance(offset));
    }
    let leader = engine.combatant(squad[0]).unwrap();
    let link = leader.squad.unwrap();
    assert_eq!(link.role, SquadRole::Leader);
    assert!(
        leader.position.distance(offset) < start.unwrap() - 500.0,
        "leader should be closing on its station"
    );
}

#[test]
fn test_snapshot_counts_sides() {
    let mut engine = SkirmishEngine::new(SimConfig::default());
    engine.setup_skirmish();
    let snapshot = engine.tick();
    assert_eq!(snapshot.score.friendly_alive, 6);
    assert_eq!(snapshot.score.hostile_alive, 5);
    assert!(snapshot.time.tick == 1);
    for c in &snapshot.combatants {
        assert!(
            ["guard", "engage_formation", "dogfight", "bombing"].contains(&c.state.as_str()),
            "unexpected state {}",
            c.state
        );
    }
}

// ---- Projectile systems ----

fn target_at(id: u64, faction: Faction, position: DVec2) -> Combatant {
    Combatant::new(
        EntityId(id),
        faction,
        UnitKind::Fighter,
        skirmish_ai::profiles::airframe_for(UnitKind::Fighter),
        Loadout::default(),
        position,
        0.0,
    )
}

fn missile(position: DVec2, velocity: DVec2, target: EntityId, arm_delay_secs: f64) -> Projectile {
    Projectile {
        owner: EntityId(1),
        faction: Faction::Friendly,
        position,
        velocity,
        damage: 60.0,
        lifetime_secs: 4.0,
        homing: Some(Homing {
            target: Some(target),
            turn_rate: 3.0,
            explosion_radius: 40.0,
            arm_delay_secs,
        }),
    }
}

fn only_projectile(world: &World) -> Projectile {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| p.clone())
        .next()
        .expect("projectile missing")
}

#[test]
fn test_armed_missile_turns_toward_target() {
    let mut world = World::new();
    world.spawn((target_at(2, Faction::Hostile, DVec2::new(0.0, 1000.0)),));
    world.spawn((missile(DVec2::ZERO, DVec2::new(900.0, 0.0), EntityId(2), 0.0),));

    projectiles::guide(&mut world);

    let p = only_projectile(&world);
    assert!((heading_of(p.velocity) - 3.0 * DT).abs() < 1e-9, "heading {}", heading_of(p.velocity));
    assert!((p.velocity.length() - 900.0).abs() < 1e-9, "missiles keep their speed");
    assert!((p.lifetime_secs - (4.0 - DT)).abs() < 1e-12);
}

#[test]
fn test_unarmed_missile_flies_straight() {
    let mut world = World::new();
    world.spawn((target_at(2, Faction::Hostile, DVec2::new(0.0, 1000.0)),));
    world.spawn((missile(DVec2::ZERO, DVec2::new(900.0, 0.0), EntityId(2), 0.25),));

    projectiles::guide(&mut world);

    let p = only_projectile(&world);
    assert_eq!(p.velocity, DVec2::new(900.0, 0.0));
    let homing = p.homing.unwrap();
    assert!((homing.arm_delay_secs - (0.25 - DT)).abs() < 1e-12);
}

#[test]
fn test_round_hit_damages_opponent_only() {
    let mut world = World::new();
    world.spawn((target_at(2, Faction::Hostile, DVec2::new(100.0, 0.0)),));
    world.spawn((target_at(3, Faction::Friendly, DVec2::new(100.0, 5.0)),));
    world.spawn((Projectile {
        owner: EntityId(1),
        faction: Faction::Friendly,
        position: DVec2::new(105.0, 0.0),
        velocity: DVec2::new(1800.0, 0.0),
        damage: 8.0,
        lifetime_secs: 0.5,
        homing: None,
    },));

    impacts::run(&mut world);

    for (_, c) in world.query::<&Combatant>().iter() {
        match c.id {
            EntityId(2) => assert_eq!(c.hit_points, 92.0),
            _ => assert_eq!(c.hit_points, 100.0, "no friendly fire"),
        }
    }
    assert_eq!(only_projectile(&world).lifetime_secs, 0.0, "spent round expires");
}

#[test]
fn test_obstacle_absorbs_rounds() {
    let mut world = World::new();
    world.spawn((Obstacle {
        position: DVec2::new(100.0, 0.0),
        radius: 50.0,
    },));
    world.spawn((Projectile {
        owner: EntityId(1),
        faction: Faction::Friendly,
        position: DVec2::new(80.0, 0.0),
        velocity: DVec2::new(1800.0, 0.0),
        damage: 8.0,
        lifetime_secs: 0.5,
        homing: None,
    },));

    impacts::run(&mut world);
    assert_eq!(only_projectile(&world).lifetime_secs, 0.0);
}

#[test]
fn test_lethal_hit_kills_and_cleanup_removes() {
    let mut world = World::new();
    world.spawn((target_at(2, Faction::Hostile, DVec2::ZERO),));
    world.spawn((missile(DVec2::new(10.0, 0.0), DVec2::new(-900.0, 0.0), EntityId(2), 0.0),));
    world.spawn((Projectile {
        owner: EntityId(1),
        faction: Faction::Friendly,
        position: DVec2::new(10.0, 10.0),
        velocity: DVec2::new(-900.0, 0.0),
        damage: 60.0,
        lifetime_secs: 1.0,
        homing: None,
    },));

    impacts::run(&mut world);
    let dead = world
        .query::<&Combatant>()
        .iter()
        .all(|(_, c)| !c.is_alive());
    assert!(dead, "two 60-damage hits should kill a 100 hp fighter");

    let mut buffer = Vec::new();
    cleanup::run(&mut world, &mut buffer);
    assert_eq!(world.len(), 0, "dead combatant and spent projectiles removed");
}
