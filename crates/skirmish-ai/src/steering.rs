//! Rate-limited steering.
//!
//! Every place a desired velocity becomes an actual velocity goes through
//! [`turn_limited`], so no craft ever turns faster than its airframe allows.

use glam::DVec2;

use skirmish_core::types::{finite_or, heading_of, unit_from_heading, wrap_angle};

const MIN_SPEED: f64 = 1e-6;

/// Rotate `current` toward `target` by at most `max_step` radians.
pub fn turn_toward_angle(current: f64, target: f64, max_turn_rate: f64, dt: f64) -> f64 {
    let max_step = (max_turn_rate * dt).max(0.0);
    let delta = wrap_angle(target - current);
    wrap_angle(current + delta.clamp(-max_step, max_step))
}

/// Velocity with the desired speed along a heading no more than
/// `max_turn_rate * dt` away from the current one.
///
/// A (near) stationary craft turns from `facing` instead of its velocity.
pub fn turn_limited(
    current: DVec2,
    desired: DVec2,
    facing: f64,
    max_turn_rate: f64,
    dt: f64,
) -> DVec2 {
    let speed = desired.length();
    if speed < MIN_SPEED {
        return DVec2::ZERO;
    }
    let from = if current.length() < MIN_SPEED {
        facing
    } else {
        heading_of(current)
    };
    let heading = turn_toward_angle(from, heading_of(desired), max_turn_rate, dt);
    unit_from_heading(heading) * speed
}

/// Scale `v` down to at most `max` magnitude. Non-finite input yields zero.
pub fn clamp_speed(v: DVec2, max: f64) -> DVec2 {
    if !v.is_finite() {
        return DVec2::ZERO;
    }
    let max = finite_or(max, 0.0).max(0.0);
    let len = v.length();
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

/// Turn the nose toward `target_point`, then accelerate along the new heading.
///
/// Returns the new `(velocity, facing)`. The velocity is capped at `max_speed`.
#[allow(clippy::too_many_arguments)]
pub fn point_and_accelerate(
    position: DVec2,
    velocity: DVec2,
    facing: f64,
    target_point: DVec2,
    max_turn_rate: f64,
    acceleration: f64,
    max_speed: f64,
    dt: f64,
) -> (DVec2, f64) {
    let to_target = target_point - position;
    let facing = if to_target.length_squared() > MIN_SPEED {
        turn_toward_angle(facing, heading_of(to_target), max_turn_rate, dt)
    } else {
        facing
    };
    let velocity = velocity + unit_from_heading(facing) * acceleration.max(0.0) * dt;
    (clamp_speed(velocity, max_speed), facing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_turn_is_clamped_per_call() {
        let rate = 2.0;
        let v = turn_limited(DVec2::new(100.0, 0.0), DVec2::new(0.0, 300.0), 0.0, rate, DT);
        let turned = heading_of(v);
        assert!(
            (turned - rate * DT).abs() < 1e-12,
            "turned {turned} rad, limit is {}",
            rate * DT
        );
        assert!((v.length() - 300.0).abs() < 1e-9, "speed should follow the desired velocity");
    }

    #[test]
    fn test_small_turn_reaches_desired_heading() {
        let desired = unit_from_heading(0.01) * 200.0;
        let v = turn_limited(DVec2::new(200.0, 0.0), desired, 0.0, 5.0, DT);
        assert!(v.distance(desired) < 1e-9, "got {v}, wanted {desired}");
    }

    #[test]
    fn test_heading_converges_monotonically() {
        let desired = DVec2::new(-1.0, 0.2) * 400.0;
        let target_heading = heading_of(desired);
        let mut v = DVec2::new(400.0, 0.0);
        let mut last_error = wrap_angle(target_heading - heading_of(v)).abs();
        for step in 0..200 {
            v = turn_limited(v, desired, 0.0, 3.0, DT);
            let error = wrap_angle(target_heading - heading_of(v)).abs();
            assert!(
                error <= last_error + 1e-12,
                "step {step}: error grew from {last_error} to {error}"
            );
            last_error = error;
        }
        assert!(last_error < 1e-9, "should have converged, error {last_error}");
    }

    #[test]
    fn test_stationary_craft_turns_from_facing() {
        let v = turn_limited(DVec2::ZERO, DVec2::new(0.0, 100.0), 0.0, 1.0, DT);
        assert!((heading_of(v) - DT).abs() < 1e-12, "got heading {}", heading_of(v));
    }

    #[test]
    fn test_zero_desired_is_zero() {
        assert_eq!(
            turn_limited(DVec2::new(10.0, 0.0), DVec2::ZERO, 0.0, 1.0, DT),
            DVec2::ZERO
        );
    }

    #[test]
    fn test_turn_toward_angle_takes_short_way_across_pi() {
        let next = turn_toward_angle(PI - 0.05, -PI + 0.05, 1.0, 1.0);
        assert!(
            (next - (-PI + 0.05)).abs() < 1e-9,
            "should cross the seam, got {next}"
        );
    }

    #[test]
    fn test_clamp_speed_preserves_direction() {
        let v = clamp_speed(DVec2::new(300.0, 400.0), 100.0);
        assert!((v.length() - 100.0).abs() < 1e-9);
        assert!((heading_of(v) - heading_of(DVec2::new(3.0, 4.0))).abs() < 1e-12);
        let slow = DVec2::new(1.0, 1.0);
        assert_eq!(clamp_speed(slow, 100.0), slow);
    }

    #[test]
    fn test_clamp_speed_rejects_non_finite() {
        assert_eq!(clamp_speed(DVec2::new(f64::NAN, 1.0), 100.0), DVec2::ZERO);
        assert_eq!(clamp_speed(DVec2::new(30.0, 40.0), f64::NAN), DVec2::ZERO);
        let v = DVec2::new(30.0, 40.0);
        assert_eq!(clamp_speed(v, f64::INFINITY), DVec2::ZERO);
    }

    #[test]
    fn test_point_and_accelerate_respects_rate_and_cap() {
        let (v, facing) = point_and_accelerate(
            DVec2::ZERO,
            DVec2::new(640.0, 0.0),
            0.0,
            DVec2::new(0.0, 1000.0),
            FRAC_PI_2,
            500.0,
            650.0,
            DT,
        );
        assert!((facing - FRAC_PI_2 * DT).abs() < 1e-12, "facing {facing}");
        assert!(v.length() <= 650.0 + 1e-9, "speed {} over cap", v.length());
    }
}
