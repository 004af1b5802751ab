//! Weapon fire control: gates gun and missile discharge on cooldown,
//! range, boresight, obstruction, and ammunition.
//!
//! The controller only decides. Spawned rounds are handed to the host's
//! [`ProjectileSpawner`]; hit resolution is none of our business.

use std::sync::Once;

use rand::Rng;

use skirmish_core::components::{Combatant, Homing};
use skirmish_core::config::AiTuning;
use skirmish_core::enums::HoldReason;
use skirmish_core::types::{finite_or, heading_of, unit_from_heading, wrap_angle};

use crate::intercept::lead_point;
use crate::services::{Contact, LineOfFire, MissileLaunch, ProjectileSpawner, RoundLaunch};
use crate::weapons::WeaponCatalog;

/// Result of one fire attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired,
    Held(HoldReason),
}

impl FireOutcome {
    pub fn fired(self) -> bool {
        matches!(self, FireOutcome::Fired)
    }
}

static UNKNOWN_GUN: Once = Once::new();
static UNKNOWN_MISSILE: Once = Once::new();

/// Angle between the shooter's nose and the bearing to `target`.
fn boresight_error(shooter: &Combatant, target: &Contact) -> f64 {
    let bearing = heading_of(target.position - shooter.position);
    wrap_angle(bearing - shooter.facing).abs()
}

/// Fire the gun at `target` if every gate passes.
///
/// On a shot the round is aimed at the lead point and the gun cooldown is
/// reset to one refire interval.
pub fn try_fire_gun(
    shooter: &mut Combatant,
    target: Option<&Contact>,
    catalog: &WeaponCatalog,
    tuning: &AiTuning,
    line_of_fire: &dyn LineOfFire,
    spawner: &mut dyn ProjectileSpawner,
) -> FireOutcome {
    let Some(target) = target.filter(|t| t.alive) else {
        return FireOutcome::Held(HoldReason::NoTarget);
    };
    let Some(gun) = catalog.gun(&shooter.loadout.gun).filter(|g| g.is_usable()) else {
        UNKNOWN_GUN.call_once(|| {
            tracing::warn!(
                gun = %shooter.loadout.gun,
                entity = %shooter.id,
                "unknown or unusable gun; holding fire"
            );
        });
        return FireOutcome::Held(HoldReason::UnknownWeapon);
    };
    if shooter.gun_cooldown > 0.0 {
        return FireOutcome::Held(HoldReason::Cooldown);
    }
    let distance = shooter.position.distance(target.position);
    if distance > gun.range {
        return FireOutcome::Held(HoldReason::OutOfRange);
    }
    if boresight_error(shooter, target) >= tuning.gun_boresight_tolerance {
        return FireOutcome::Held(HoldReason::OffBoresight);
    }
    if line_of_fire.blocked(shooter.position, target.position, gun.range) {
        return FireOutcome::Held(HoldReason::Obstructed);
    }

    let aim = lead_point(
        shooter.position,
        shooter.velocity,
        target.position,
        target.velocity,
        gun.projectile_speed,
        tuning.max_lead_secs,
    );
    let to_aim = aim - shooter.position;
    let direction = if to_aim.length_squared() > 1e-12 {
        to_aim.normalize()
    } else {
        unit_from_heading(shooter.facing)
    };

    spawner.spawn_round(RoundLaunch {
        owner: shooter.id,
        faction: shooter.faction,
        target: target.id,
        origin: shooter.position,
        velocity: shooter.velocity + direction * gun.projectile_speed,
        damage: gun.damage,
        lifetime_secs: gun.lifetime_secs,
    });
    shooter.gun_cooldown = gun.refire_secs();
    tracing::trace!(entity = %shooter.id, target = %target.id, distance, "gun fired");
    FireOutcome::Fired
}

/// Launch a homing missile at `target` if every gate passes, including a
/// per-call probability roll.
pub fn try_launch_missile<R: Rng + ?Sized>(
    shooter: &mut Combatant,
    target: Option<&Contact>,
    catalog: &WeaponCatalog,
    tuning: &AiTuning,
    rng: &mut R,
    spawner: &mut dyn ProjectileSpawner,
) -> FireOutcome {
    let Some(target) = target.filter(|t| t.alive) else {
        return FireOutcome::Held(HoldReason::NoTarget);
    };
    let Some(missile_id) = shooter.loadout.missile.as_deref() else {
        return FireOutcome::Held(HoldReason::NoAmmo);
    };
    let Some(missile) = catalog.missile(missile_id) else {
        UNKNOWN_MISSILE.call_once(|| {
            tracing::warn!(
                missile = %missile_id,
                entity = %shooter.id,
                "unknown missile; holding launch"
            );
        });
        return FireOutcome::Held(HoldReason::UnknownWeapon);
    };
    if shooter.loadout.missile_ammo == 0 {
        return FireOutcome::Held(HoldReason::NoAmmo);
    }
    if shooter.missile_cooldown > 0.0 {
        return FireOutcome::Held(HoldReason::Cooldown);
    }
    if shooter.position.distance(target.position) >= tuning.missile_launch_range {
        return FireOutcome::Held(HoldReason::OutOfRange);
    }
    if boresight_error(shooter, target) >= tuning.missile_boresight_tolerance {
        return FireOutcome::Held(HoldReason::OffBoresight);
    }
    // Rolled once per call, so the effective launch rate scales with the tick rate.
    let chance = finite_or(tuning.missile_launch_chance, 0.0).clamp(0.0, 1.0);
    if !rng.gen_bool(chance) {
        return FireOutcome::Held(HoldReason::Gated);
    }

    spawner.spawn_missile(MissileLaunch {
        owner: shooter.id,
        faction: shooter.faction,
        origin: shooter.position,
        velocity: unit_from_heading(shooter.facing) * missile.speed,
        lifetime_secs: missile.lifetime_secs,
        damage: missile.damage,
        homing: Homing {
            target: Some(target.id),
            turn_rate: missile.turn_rate,
            explosion_radius: missile.explosion_radius,
            arm_delay_secs: missile.arm_delay_secs,
        },
    });
    shooter.loadout.missile_ammo -= 1;
    shooter.missile_cooldown = missile.cooldown_secs;
    tracing::trace!(
        entity = %shooter.id,
        target = %target.id,
        ammo_left = shooter.loadout.missile_ammo,
        "missile launched"
    );
    FireOutcome::Fired
}
