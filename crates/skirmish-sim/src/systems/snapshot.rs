//! Snapshot system: builds a `SkirmishSnapshot` from the world.
//!
//! Read-only; never modifies the world.

use hecs::World;

use skirmish_core::components::{Combatant, Projectile};
use skirmish_core::enums::Faction;
use skirmish_core::events::CombatEvent;
use skirmish_core::state::*;
use skirmish_core::types::SimTime;

use crate::engine::ScoreState;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    events: Vec<CombatEvent>,
    score: &ScoreState,
) -> SkirmishSnapshot {
    let combatants = build_combatants(world);
    let count_alive = |faction: Faction| {
        combatants
            .iter()
            .filter(|c| c.alive && c.faction == faction)
            .count() as u32
    };

    SkirmishSnapshot {
        time: *time,
        projectiles: build_projectiles(world),
        events,
        score: ScoreView {
            rounds_fired: score.rounds_fired,
            missiles_launched: score.missiles_launched,
            friendly_alive: count_alive(Faction::Friendly),
            hostile_alive: count_alive(Faction::Hostile),
        },
        combatants,
    }
}

fn build_combatants(world: &World) -> Vec<CombatantView> {
    let mut views: Vec<CombatantView> = world
        .query::<&Combatant>()
        .iter()
        .map(|(_, c)| CombatantView {
            id: c.id,
            faction: c.faction,
            kind: c.kind,
            position: c.position,
            velocity: c.velocity,
            facing: c.facing,
            alive: c.is_alive(),
            hit_points: c.hit_points,
            state: c.engagement.state_name().to_string(),
            sub_state: c.engagement.sub_state_name().map(str::to_string),
            target: c.target,
            gun_cooldown: c.gun_cooldown,
            missile_cooldown: c.missile_cooldown,
            missile_ammo: c.loadout.missile_ammo,
        })
        .collect();
    views.sort_by_key(|v| v.id);
    views
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            owner: p.owner,
            position: p.position,
            velocity: p.velocity,
            homing: p.homing.is_some(),
        })
        .collect()
}
