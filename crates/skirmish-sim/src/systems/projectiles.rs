//! Projectile systems: puts buffered launches in flight and steers homing
//! missiles.

use std::collections::HashMap;

use glam::DVec2;
use hecs::World;

use skirmish_core::components::{Combatant, Projectile};
use skirmish_core::constants::{DT, INTERCEPT_MAX_LEAD_SECS};
use skirmish_core::types::{heading_of, EntityId};

use skirmish_ai::intercept::lead_point;
use skirmish_ai::services::Launch;
use skirmish_ai::steering::turn_limited;

use crate::engine::ScoreState;

/// Spawn a projectile entity for every buffered launch.
pub fn launch(world: &mut World, launches: &mut Vec<Launch>, score: &mut ScoreState) {
    for launch in launches.drain(..) {
        match launch {
            Launch::Round(round) => {
                world.spawn((Projectile {
                    owner: round.owner,
                    faction: round.faction,
                    position: round.origin,
                    velocity: round.velocity,
                    damage: round.damage,
                    lifetime_secs: round.lifetime_secs,
                    homing: None,
                },));
                score.rounds_fired += 1;
            }
            Launch::Missile(missile) => {
                world.spawn((Projectile {
                    owner: missile.owner,
                    faction: missile.faction,
                    position: missile.origin,
                    velocity: missile.velocity,
                    damage: missile.damage,
                    lifetime_secs: missile.lifetime_secs,
                    homing: Some(missile.homing),
                },));
                score.missiles_launched += 1;
            }
        }
    }
}

/// Age every projectile and turn armed missiles onto an intercept course.
///
/// A missile whose target has died keeps flying straight until it expires.
pub fn guide(world: &mut World) {
    let targets: HashMap<EntityId, (DVec2, DVec2)> = world
        .query::<&Combatant>()
        .iter()
        .filter(|(_, c)| c.is_alive())
        .map(|(_, c)| (c.id, (c.position, c.velocity)))
        .collect();

    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.lifetime_secs -= DT;

        let Some(homing) = projectile.homing.as_mut() else {
            continue;
        };
        if homing.arm_delay_secs > 0.0 {
            homing.arm_delay_secs -= DT;
            continue;
        }
        let turn_rate = homing.turn_rate;
        let Some(&(target_pos, target_vel)) = homing.target.and_then(|id| targets.get(&id)) else {
            continue;
        };

        let speed = projectile.velocity.length();
        if speed <= 0.0 {
            continue;
        }
        let aim = lead_point(
            projectile.position,
            DVec2::ZERO,
            target_pos,
            target_vel,
            speed,
            INTERCEPT_MAX_LEAD_SECS,
        );
        let desired = (aim - projectile.position).normalize_or_zero() * speed;
        projectile.velocity = turn_limited(
            projectile.velocity,
            desired,
            heading_of(projectile.velocity),
            turn_rate,
            DT,
        );
    }
}
