//! Cleanup system: removes spent projectiles, destroyed combatants, and
//! anything that has left the arena.

use hecs::{Entity, World};

use skirmish_core::components::{Combatant, Projectile};
use skirmish_core::constants::WORLD_RADIUS;

/// Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    let radius_sq = WORLD_RADIUS * WORLD_RADIUS;

    for (entity, projectile) in world.query_mut::<&Projectile>() {
        if projectile.lifetime_secs <= 0.0 || projectile.position.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    for (entity, combatant) in world.query_mut::<&Combatant>() {
        if !combatant.is_alive() || combatant.position.length_squared() > radius_sq {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
