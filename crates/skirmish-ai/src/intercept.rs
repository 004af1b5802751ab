//! Lead-aim point calculation.
//!
//! Solves for the earliest time at which a projectile fired now at constant
//! speed meets a target moving at constant velocity. Both velocities are
//! taken into account so a moving shooter's rounds inherit its motion.

use glam::DVec2;

use skirmish_core::constants::INTERCEPT_EPSILON;
use skirmish_core::types::finite_or_zero;

/// Time until a projectile of speed `projectile_speed` meets the target.
///
/// Returns the smallest non-negative root of
/// `(|v|² - s²)t² + 2(r·v)t + |r|² = 0`, clamped to `[0, max_lead_secs]`.
/// No solution yields 0 (aim at the target's current position).
pub fn intercept_time(
    shooter: DVec2,
    shooter_vel: DVec2,
    target: DVec2,
    target_vel: DVec2,
    projectile_speed: f64,
    max_lead_secs: f64,
) -> f64 {
    debug_assert!(
        projectile_speed.is_finite() && projectile_speed > 0.0,
        "projectile speed must be positive, got {projectile_speed}"
    );
    if !(projectile_speed.is_finite() && projectile_speed > 0.0) {
        return 0.0;
    }

    let r = finite_or_zero(target) - finite_or_zero(shooter);
    let v = finite_or_zero(target_vel) - finite_or_zero(shooter_vel);
    let s2 = projectile_speed * projectile_speed;

    let a = v.length_squared() - s2;
    let b = 2.0 * r.dot(v);
    let c = r.length_squared();

    let t = if a.abs() <= INTERCEPT_EPSILON * s2.max(1.0) {
        // Target speed equals projectile speed: the equation is linear.
        if b.abs() > INTERCEPT_EPSILON {
            let t = -c / b;
            if t > 0.0 {
                t
            } else {
                0.0
            }
        } else {
            0.0
        }
    } else {
        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            0.0
        } else {
            let sqrt_disc = disc.sqrt();
            let t1 = (-b - sqrt_disc) / (2.0 * a);
            let t2 = (-b + sqrt_disc) / (2.0 * a);
            let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
            if lo >= 0.0 {
                lo
            } else if hi >= 0.0 {
                hi
            } else {
                0.0
            }
        }
    };

    let upper = if max_lead_secs.is_finite() {
        max_lead_secs.max(0.0)
    } else {
        0.0
    };
    if t.is_finite() {
        t.clamp(0.0, upper)
    } else {
        0.0
    }
}

/// Aim point for a projectile fired now: the target extrapolated by the
/// intercept time.
pub fn lead_point(
    shooter: DVec2,
    shooter_vel: DVec2,
    target: DVec2,
    target_vel: DVec2,
    projectile_speed: f64,
    max_lead_secs: f64,
) -> DVec2 {
    let target = finite_or_zero(target);
    let target_vel = finite_or_zero(target_vel);
    let t = intercept_time(
        shooter,
        shooter_vel,
        target,
        target_vel,
        projectile_speed,
        max_lead_secs,
    );
    target + target_vel * t
}
