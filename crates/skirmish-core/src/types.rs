//! Fundamental handle, time, and numeric-hygiene types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to an entity in the host's registry.
///
/// A handle is a relation, never ownership: the entity behind it may have
/// died since the handle was taken, so it must be resolved on every use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Replace a non-finite scalar with `fallback`.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Replace a vector with any non-finite component by zero.
pub fn finite_or_zero(v: DVec2) -> DVec2 {
    if v.is_finite() {
        v
    } else {
        DVec2::ZERO
    }
}

/// Wrap an angle into (-PI, PI].
pub fn wrap_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Heading of a vector in radians (0 = +x, counter-clockwise).
pub fn heading_of(v: DVec2) -> f64 {
    v.y.atan2(v.x)
}

/// Unit vector for a heading in radians.
pub fn unit_from_heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}
