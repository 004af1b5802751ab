//! Formation keeping, guard orbits, and passive drag for craft without a target.

use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

use skirmish_core::components::{Combatant, GuardPost};
use skirmish_core::config::AiTuning;
use skirmish_core::enums::SquadRole;
use skirmish_core::types::{heading_of, unit_from_heading};

use crate::services::Contact;
use crate::steering::{clamp_speed, turn_limited};

/// World-space slot for a squad member: the local offset rotated into the
/// leader's frame.
pub fn squad_anchor(leader: &Contact, offset: DVec2) -> DVec2 {
    leader.position + unit_from_heading(leader.facing).rotate(offset)
}

fn gain_and_cap(role: SquadRole, tuning: &AiTuning) -> (f64, f64) {
    match role {
        SquadRole::Wingman => (tuning.wingman_gain, tuning.wingman_speed_cap),
        SquadRole::Leader => (tuning.leader_gain, tuning.leader_speed_cap),
    }
}

/// Blend toward `desired` at the formation rate, then apply the turn limit.
fn blend_velocity(c: &Combatant, desired: DVec2, tuning: &AiTuning, dt: f64) -> DVec2 {
    let t = (tuning.formation_blend_rate * dt).clamp(0.0, 1.0);
    let blended = c.velocity + (desired - c.velocity) * t;
    turn_limited(c.velocity, blended, c.facing, c.turn_rate(), dt)
}

/// Fly toward the slot at `anchor` with proportional control.
pub fn follow_anchor(
    c: &mut Combatant,
    leader: &Contact,
    anchor: DVec2,
    role: SquadRole,
    tuning: &AiTuning,
    dt: f64,
) {
    let (gain, cap) = gain_and_cap(role, tuning);
    let desired = clamp_speed((anchor - c.position) * gain, c.max_speed() * cap);
    c.velocity = blend_velocity(c, desired, tuning, dt);
    // Settled in the slot: match the leader's nose.
    c.desired_facing = if c.velocity.length() > 1.0 {
        heading_of(c.velocity)
    } else {
        leader.facing
    };
}

/// Point on the orbit for the post's current phase.
pub fn orbit_point(station: DVec2, post: &GuardPost) -> DVec2 {
    station + unit_from_heading(post.phase) * post.orbit_radius
}

/// Circle `station`, advancing the post's phase by one tick.
///
/// A guard flies as its own squad leader, so the leader gain and speed cap apply.
pub fn orbit_station(
    c: &mut Combatant,
    station: DVec2,
    post: &mut GuardPost,
    tuning: &AiTuning,
    dt: f64,
) {
    post.phase += post.angular_speed * dt;
    let anchor = orbit_point(station, post);

    let direction = if post.angular_speed >= 0.0 { 1.0 } else { -1.0 };
    let tangent_heading = post.phase + direction * FRAC_PI_2;
    let tangent = unit_from_heading(tangent_heading) * post.angular_speed.abs() * post.orbit_radius;

    let (gain, cap) = gain_and_cap(SquadRole::Leader, tuning);
    let desired = clamp_speed(tangent + (anchor - c.position) * gain, c.max_speed() * cap);
    c.velocity = blend_velocity(c, desired, tuning, dt);
    c.desired_facing = tangent_heading;
}

/// Velocity after one tick of exponential-ish decay.
pub fn passive_drag(velocity: DVec2, rate: f64, dt: f64) -> DVec2 {
    velocity * (1.0 - rate * dt).max(0.0)
}
