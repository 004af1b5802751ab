//! Impact system: resolves projectile hits against combatants and obstacles.

use glam::DVec2;
use hecs::World;

use skirmish_core::components::{Combatant, Obstacle, Projectile};
use skirmish_core::constants::ROUND_HIT_RADIUS;
use skirmish_core::enums::Faction;
use skirmish_core::types::EntityId;

/// Apply damage from projectiles that reached something this tick.
///
/// Spent projectiles are marked expired; the cleanup system removes them.
pub fn run(world: &mut World) {
    let obstacles: Vec<Obstacle> = world.query::<&Obstacle>().iter().map(|(_, o)| *o).collect();
    let targets: Vec<(EntityId, Faction, DVec2)> = world
        .query::<&Combatant>()
        .iter()
        .filter(|(_, c)| c.is_alive())
        .map(|(_, c)| (c.id, c.faction, c.position))
        .collect();

    let mut hits: Vec<(EntityId, f64)> = Vec::new();
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.lifetime_secs <= 0.0 {
            continue;
        }
        if obstacles
            .iter()
            .any(|o| projectile.position.distance_squared(o.position) <= o.radius * o.radius)
        {
            projectile.lifetime_secs = 0.0;
            continue;
        }

        // Unarmed missiles pass through.
        let radius = match projectile.homing {
            Some(homing) if homing.arm_delay_secs > 0.0 => continue,
            Some(homing) => homing.explosion_radius,
            None => ROUND_HIT_RADIUS,
        };
        let struck = targets.iter().find(|(_, faction, position)| {
            *faction != projectile.faction
                && position.distance_squared(projectile.position) <= radius * radius
        });
        if let Some(&(id, _, _)) = struck {
            hits.push((id, projectile.damage));
            projectile.lifetime_secs = 0.0;
        }
    }

    if hits.is_empty() {
        return;
    }
    for (_entity, combatant) in world.query_mut::<&mut Combatant>() {
        for &(id, damage) in &hits {
            if id == combatant.id {
                combatant.hit_points -= damage;
            }
        }
        if combatant.alive && combatant.hit_points <= 0.0 {
            combatant.alive = false;
            tracing::info!(
                entity = %combatant.id,
                faction = ?combatant.faction,
                "combatant destroyed"
            );
        }
    }
}
