//! Kinematic integration: position += velocity * dt.

use hecs::World;

use skirmish_core::components::{Combatant, Projectile};
use skirmish_core::constants::DT;

pub fn run(world: &mut World) {
    for (_entity, combatant) in world.query_mut::<&mut Combatant>() {
        if combatant.is_alive() {
            combatant.position += combatant.velocity * DT;
        }
    }
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.position += projectile.velocity * DT;
    }
}
