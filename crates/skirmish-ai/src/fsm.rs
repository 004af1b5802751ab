//! Engagement state machine.
//!
//! One [`CombatBrain`] is built per frame from the host's collaborators and
//! advanced once per AI-controlled combatant. It validates the held target,
//! retargets on a cadence, picks an engagement state from distance and target
//! class, flies that state, and fires. No ECS dependency: the combatant is
//! plain data and everything else is reached through the service traits.

use std::f64::consts::TAU;

use glam::DVec2;
use rand::Rng;

use skirmish_core::components::{BombingRun, Combatant, DogfightPhase, Engagement};
use skirmish_core::config::AiTuning;
use skirmish_core::enums::SquadRole;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{finite_or, finite_or_zero, heading_of, unit_from_heading};

use crate::fire_control::{try_fire_gun, try_launch_missile};
use crate::formation::{follow_anchor, orbit_station, passive_drag, squad_anchor};
use crate::intercept::lead_point;
use crate::services::{
    Contact, EntityRegistry, LineOfFire, OpenSpace, ProjectileSpawner, SeparationField,
};
use crate::steering::{clamp_speed, point_and_accelerate, turn_limited, turn_toward_angle};
use crate::targeting::select_target;
use crate::weapons::WeaponCatalog;

static OPEN_SPACE: OpenSpace = OpenSpace;

/// "state" or "state/sub_state", as reported in events and snapshots.
pub fn engagement_label(engagement: &Engagement) -> String {
    match engagement.sub_state_name() {
        Some(sub) => format!("{}/{}", engagement.state_name(), sub),
        None => engagement.state_name().to_string(),
    }
}

/// Per-frame decision maker wired to the host's collaborators.
pub struct CombatBrain<'a> {
    catalog: &'a WeaponCatalog,
    registry: &'a dyn EntityRegistry,
    tuning: &'a AiTuning,
    line_of_fire: &'a dyn LineOfFire,
    separation: &'a dyn SeparationField,
}

impl<'a> CombatBrain<'a> {
    /// A brain in open space: nothing obstructs fire and there is no separation push.
    pub fn new(
        catalog: &'a WeaponCatalog,
        registry: &'a dyn EntityRegistry,
        tuning: &'a AiTuning,
    ) -> Self {
        Self {
            catalog,
            registry,
            tuning,
            line_of_fire: &OPEN_SPACE,
            separation: &OPEN_SPACE,
        }
    }

    pub fn with_line_of_fire(mut self, line_of_fire: &'a dyn LineOfFire) -> Self {
        self.line_of_fire = line_of_fire;
        self
    }

    pub fn with_separation(mut self, separation: &'a dyn SeparationField) -> Self {
        self.separation = separation;
        self
    }

    pub fn tuning(&self) -> &AiTuning {
        self.tuning
    }

    /// Advance one combatant by `dt` seconds.
    ///
    /// Dead combatants are left untouched. Velocity is updated but not
    /// integrated into position; that is the host's job.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        c: &mut Combatant,
        dt: f64,
        rng: &mut R,
        spawner: &mut dyn ProjectileSpawner,
        events: &mut Vec<CombatEvent>,
    ) {
        if !c.is_alive() {
            return;
        }
        if !(dt.is_finite() && dt > 0.0) {
            tracing::warn!(entity = %c.id, dt, "ignoring non-positive frame step");
            return;
        }
        sanitize(c);

        c.gun_cooldown = (c.gun_cooldown - dt).max(0.0);
        c.missile_cooldown = (c.missile_cooldown - dt).max(0.0);
        c.retarget_timer = (c.retarget_timer - dt).max(0.0);

        let target = self.validate_target(c, events);
        let target = match target {
            Some(t) => Some(t),
            None if c.retarget_timer <= 0.0 => self.acquire_target(c, rng, events),
            None => None,
        };

        let next = self.next_engagement(c, target.as_ref(), rng);
        set_engagement(c, next, events);

        match (c.engagement, target) {
            (Engagement::Guard, _) | (_, None) => self.fly_guard(c, dt),
            (Engagement::EngageFormation, Some(t)) => {
                self.fly_engage(c, &t, dt);
                if c.position.distance(t.position) < self.tuning.engage_fire_range {
                    self.fire(c, &t, rng, spawner, events);
                }
            }
            (Engagement::Dogfight(phase), Some(t)) => {
                self.fly_dogfight(c, phase, &t, dt, rng, events);
                self.fire(c, &t, rng, spawner, events);
            }
            (Engagement::Bombing(run), Some(t)) => {
                self.fly_bombing(c, run, &t, dt);
                self.fire(c, &t, rng, spawner, events);
            }
        }

        c.facing = turn_toward_angle(c.facing, c.desired_facing, c.turn_rate(), dt);
    }

    /// Resolve the held target; drop it if it is gone or dead.
    fn validate_target(&self, c: &mut Combatant, events: &mut Vec<CombatEvent>) -> Option<Contact> {
        let held = c.target?;
        match self.registry.resolve(held) {
            Some(contact) if contact.alive => Some(*contact),
            _ => {
                c.target = None;
                tracing::debug!(entity = %c.id, target = %held, "target lost");
                events.push(CombatEvent::TargetLost {
                    entity: c.id,
                    target: held,
                });
                None
            }
        }
    }

    fn acquire_target<R: Rng + ?Sized>(
        &self,
        c: &mut Combatant,
        rng: &mut R,
        events: &mut Vec<CombatEvent>,
    ) -> Option<Contact> {
        let me = Contact::from_combatant(c);
        let picked = select_target(&me, self.tuning.search_range, self.registry, self.tuning, rng);
        c.retarget_timer = roll_between(
            rng,
            self.tuning.retarget_min_secs,
            self.tuning.retarget_max_secs,
        );

        let contact = *self.registry.resolve(picked?)?;
        c.target = Some(contact.id);
        tracing::debug!(
            entity = %c.id,
            target = %contact.id,
            kind = ?contact.kind,
            "target acquired"
        );
        events.push(CombatEvent::TargetAcquired {
            entity: c.id,
            target: contact.id,
        });
        Some(contact)
    }

    /// Engagement state for this tick given the validated target.
    fn next_engagement<R: Rng + ?Sized>(
        &self,
        c: &Combatant,
        target: Option<&Contact>,
        rng: &mut R,
    ) -> Engagement {
        let Some(t) = target else {
            return Engagement::Guard;
        };
        let tuning = self.tuning;
        let dist = c.position.distance(t.position);

        match c.engagement {
            Engagement::Dogfight(phase)
                if t.kind.is_fighter_class() && dist <= tuning.dogfight_exit_range =>
            {
                return Engagement::Dogfight(phase);
            }
            Engagement::Bombing(run)
                if run.target == t.id && t.kind.is_capital() && dist <= tuning.bombing_exit_range =>
            {
                return Engagement::Bombing(run);
            }
            _ => {}
        }

        if t.kind.is_fighter_class() && dist <= tuning.dogfight_enter_range {
            Engagement::Dogfight(DogfightPhase::Merge {
                timer: self.merge_duration(rng),
            })
        } else if t.kind.is_capital() && dist <= tuning.bombing_enter_range {
            let axis = unit_from_heading(rng.gen_range(0.0..TAU));
            let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
            Engagement::Bombing(BombingRun {
                axis,
                side,
                target: t.id,
            })
        } else {
            Engagement::EngageFormation
        }
    }

    fn merge_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        roll_between(rng, self.tuning.merge_min_secs, self.tuning.merge_max_secs)
    }

    /// Direct intercept at full speed, pushed apart from nearby friendlies.
    fn fly_engage(&self, c: &mut Combatant, t: &Contact, dt: f64) {
        let aim = if c.max_speed() > 0.0 {
            lead_point(
                c.position,
                DVec2::ZERO,
                t.position,
                t.velocity,
                c.max_speed(),
                self.tuning.max_lead_secs,
            )
        } else {
            t.position
        };

        let me = Contact::from_combatant(c);
        let push = finite_or_zero(self.separation.separation(
            &me,
            self.tuning.separation_radius,
            self.tuning.separation_strength,
        )) * dt;

        if c.kind.is_capital() {
            // Heavy hulls swing the nose first and thrust along it.
            let (thrust, facing) = point_and_accelerate(
                c.position,
                c.velocity,
                c.facing,
                aim,
                c.turn_rate(),
                c.airframe.acceleration,
                c.max_speed(),
                dt,
            );
            let velocity = turn_limited(c.velocity, thrust + push, c.facing, c.turn_rate(), dt);
            c.velocity = clamp_speed(velocity, c.max_speed());
            c.facing = facing;
            c.desired_facing = facing;
        } else {
            let desired = (aim - c.position).normalize_or_zero() * c.max_speed() + push;
            let velocity = turn_limited(c.velocity, desired, c.facing, c.turn_rate(), dt);
            c.velocity = clamp_speed(velocity, c.max_speed());
            c.desired_facing = heading_of(aim - c.position);
        }
    }

    fn fly_dogfight<R: Rng + ?Sized>(
        &self,
        c: &mut Combatant,
        phase: DogfightPhase,
        t: &Contact,
        dt: f64,
        rng: &mut R,
        events: &mut Vec<CombatEvent>,
    ) {
        let tuning = self.tuning;
        let dist = c.position.distance(t.position);

        let phase = match phase {
            DogfightPhase::Merge { timer } => {
                let timer = timer - dt;
                if timer <= 0.0 || dist < tuning.merge_break_range {
                    let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                    DogfightPhase::Slash {
                        timer: tuning.slash_duration_secs,
                        sign,
                    }
                } else {
                    DogfightPhase::Merge { timer }
                }
            }
            DogfightPhase::Slash { timer, sign } => {
                let timer = timer - dt;
                if timer <= 0.0 {
                    DogfightPhase::Merge {
                        timer: self.merge_duration(rng),
                    }
                } else {
                    DogfightPhase::Slash { timer, sign }
                }
            }
        };
        set_engagement(c, Engagement::Dogfight(phase), events);

        match phase {
            DogfightPhase::Merge { .. } => {
                let projectile_speed = self
                    .catalog
                    .gun(&c.loadout.gun)
                    .map(|gun| gun.projectile_speed)
                    .unwrap_or(0.0);
                let aim = if projectile_speed > 0.0 {
                    lead_point(
                        c.position,
                        c.velocity,
                        t.position,
                        t.velocity,
                        projectile_speed,
                        tuning.max_lead_secs,
                    )
                } else {
                    t.position
                };
                let top = c.max_speed() * tuning.merge_speed_factor;
                let desired = (aim - c.position).normalize_or_zero() * top;
                let velocity = turn_limited(c.velocity, desired, c.facing, c.turn_rate(), dt);
                c.velocity = clamp_speed(velocity, top);
                c.desired_facing = heading_of(aim - c.position);
            }
            DogfightPhase::Slash { sign, .. } => {
                let dir = (t.position - c.position).normalize_or_zero();
                let desired = (dir * tuning.slash_direct_weight
                    + dir.perp() * sign * tuning.slash_lateral_weight)
                    * c.max_speed();
                let velocity = turn_limited(c.velocity, desired, c.facing, c.turn_rate(), dt);
                c.velocity = clamp_speed(velocity, c.max_speed());
                if c.velocity.length_squared() > 1e-12 {
                    c.desired_facing = heading_of(c.velocity);
                }
            }
        }
    }

    /// Repeating passes along a line through the target.
    fn fly_bombing(&self, c: &mut Combatant, mut run: BombingRun, t: &Contact, dt: f64) {
        let tuning = self.tuning;
        let waypoint_of =
            |run: &BombingRun| t.position + run.axis * run.side * tuning.bombing_run_overshoot;

        let mut waypoint = waypoint_of(&run);
        if c.position.distance(waypoint) <= tuning.bombing_waypoint_radius {
            run.side = -run.side;
            waypoint = waypoint_of(&run);
            tracing::trace!(
                entity = %c.id,
                target = %t.id,
                side = run.side,
                "bombing run reversed"
            );
        }
        c.engagement = Engagement::Bombing(run);

        let desired = (waypoint - c.position).normalize_or_zero() * c.max_speed();
        let velocity = turn_limited(c.velocity, desired, c.facing, c.turn_rate(), dt);
        c.velocity = clamp_speed(velocity, c.max_speed());

        if c.position.distance(t.position) <= tuning.bombing_face_target_range {
            c.desired_facing = heading_of(t.position - c.position);
        } else if c.velocity.length_squared() > 1e-12 {
            c.desired_facing = heading_of(c.velocity);
        }
    }

    /// No target: guard orbit, squad slot, or drift.
    fn fly_guard(&self, c: &mut Combatant, dt: f64) {
        let tuning = self.tuning;

        let leads_or_alone = c.squad.map_or(true, |s| s.role == SquadRole::Leader);
        if let Some(mut post) = c.guard.filter(|_| leads_or_alone) {
            if let Some(station) = self.registry.resolve(post.station).filter(|s| s.alive) {
                let station = station.position;
                orbit_station(c, station, &mut post, tuning, dt);
                c.guard = Some(post);
                return;
            }
        }

        if let Some(link) = c.squad.filter(|s| s.leader != c.id) {
            if let Some(leader) = self.registry.resolve(link.leader).filter(|l| l.alive) {
                let leader = *leader;
                let anchor = squad_anchor(&leader, link.offset);
                follow_anchor(c, &leader, anchor, link.role, tuning, dt);
                return;
            }
        }

        c.velocity = passive_drag(c.velocity, tuning.passive_drag_rate, dt);
    }

    fn fire<R: Rng + ?Sized>(
        &self,
        c: &mut Combatant,
        t: &Contact,
        rng: &mut R,
        spawner: &mut dyn ProjectileSpawner,
        events: &mut Vec<CombatEvent>,
    ) {
        let gun = try_fire_gun(
            c,
            Some(t),
            self.catalog,
            self.tuning,
            self.line_of_fire,
            spawner,
        );
        if gun.fired() {
            events.push(CombatEvent::GunFired {
                entity: c.id,
                target: t.id,
            });
        }

        let missile = try_launch_missile(c, Some(t), self.catalog, self.tuning, rng, spawner);
        if missile.fired() {
            events.push(CombatEvent::MissileLaunched {
                entity: c.id,
                target: t.id,
                ammo_left: c.loadout.missile_ammo,
            });
        }
    }
}

/// Replace the engagement, reporting label changes.
fn set_engagement(c: &mut Combatant, next: Engagement, events: &mut Vec<CombatEvent>) {
    let from = engagement_label(&c.engagement);
    let to = engagement_label(&next);
    c.engagement = next;
    if from != to {
        tracing::debug!(entity = %c.id, %from, %to, "engagement changed");
        events.push(CombatEvent::StateChanged {
            entity: c.id,
            from,
            to,
        });
    }
}

/// Coerce non-finite kinematics so one bad entity cannot poison the frame.
fn sanitize(c: &mut Combatant) {
    let finite = c.position.is_finite()
        && c.velocity.is_finite()
        && c.facing.is_finite()
        && c.desired_facing.is_finite();
    if !finite {
        tracing::warn!(entity = %c.id, "non-finite kinematics; coercing");
        c.position = finite_or_zero(c.position);
        c.velocity = finite_or_zero(c.velocity);
        c.facing = finite_or(c.facing, 0.0);
        c.desired_facing = finite_or(c.desired_facing, c.facing);
    }

    let airframe = &mut c.airframe;
    let envelope_ok = [
        airframe.max_speed,
        airframe.max_turn_rate_deg,
        airframe.acceleration,
    ]
    .iter()
    .all(|v| v.is_finite() && *v >= 0.0);
    if !envelope_ok {
        tracing::warn!(entity = %c.id, "invalid airframe envelope; coercing");
        airframe.max_speed = finite_or(airframe.max_speed, 0.0).max(0.0);
        airframe.max_turn_rate_deg = finite_or(airframe.max_turn_rate_deg, 0.0).max(0.0);
        airframe.acceleration = finite_or(airframe.acceleration, 0.0).max(0.0);
    }

    c.gun_cooldown = timer_or_hold(c.gun_cooldown);
    c.missile_cooldown = timer_or_hold(c.missile_cooldown);
    c.retarget_timer = timer_or_hold(c.retarget_timer);
}

/// NaN resets a timer; an unbounded one stays pending instead of reading as expired.
fn timer_or_hold(secs: f64) -> f64 {
    if secs.is_nan() {
        0.0
    } else {
        secs.clamp(0.0, f64::MAX)
    }
}

/// Uniform draw from `[lo, hi]` that tolerates inverted or non-finite bounds.
fn roll_between<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    let lo = finite_or(lo, 0.0).max(0.0);
    let hi = finite_or(hi, lo);
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}
