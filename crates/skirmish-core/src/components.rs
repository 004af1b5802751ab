//! ECS components for hecs entities.
//!
//! Components are plain data. The only methods here are constructors and
//! read-only accessors; decision logic lives in `skirmish-ai`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::EntityId;

/// Flight envelope of a hull.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Airframe {
    /// Top speed (units/s).
    pub max_speed: f64,
    /// Maximum turn rate (deg/s).
    pub max_turn_rate_deg: f64,
    /// Forward acceleration (units/s²).
    pub acceleration: f64,
    /// Starting hit points.
    pub hit_points: f64,
}

/// Weapons carried by a combatant, by catalog identifier.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    /// Gun identifier in the weapon catalog.
    pub gun: String,
    /// Missile identifier in the weapon catalog, if any are carried.
    pub missile: Option<String>,
    /// Missiles remaining.
    pub missile_ammo: u32,
}

/// Squad membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SquadLink {
    /// Entity whose frame the offset is expressed in.
    pub leader: EntityId,
    /// Slot in the leader's local frame (+x = leader's nose). Fixed at creation.
    pub offset: DVec2,
    pub role: SquadRole,
}

/// Guard assignment around a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuardPost {
    pub station: EntityId,
    pub orbit_radius: f64,
    /// Orbit angular speed (rad/s); sign selects direction.
    pub angular_speed: f64,
    /// Current orbit angle (rad); advanced every tick the post is flown.
    pub phase: f64,
}

/// Sub-state of a dogfight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DogfightPhase {
    /// Closing on the lead point; `timer` counts down the leg.
    Merge { timer: f64 },
    /// Lateral pass; `sign` picks the side of the perpendicular.
    Slash { timer: f64, sign: f64 },
}

/// Geometry of a repeating bombing run against one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BombingRun {
    /// Unit direction of the run line through the target.
    pub axis: DVec2,
    /// Which end of the line is the current waypoint (+1 or -1).
    pub side: f64,
    /// Target the line was chosen for; a new target gets a new line.
    pub target: EntityId,
}

/// Engagement state with its per-state data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Engagement {
    /// No target held: station-keeping, formation or drift.
    #[default]
    Guard,
    /// Direct intercept course toward the target.
    EngageFormation,
    Dogfight(DogfightPhase),
    Bombing(BombingRun),
}

impl Engagement {
    pub fn state_name(&self) -> &'static str {
        match self {
            Engagement::Guard => "guard",
            Engagement::EngageFormation => "engage_formation",
            Engagement::Dogfight(_) => "dogfight",
            Engagement::Bombing(_) => "bombing",
        }
    }

    pub fn sub_state_name(&self) -> Option<&'static str> {
        match self {
            Engagement::Dogfight(DogfightPhase::Merge { .. }) => Some("merge"),
            Engagement::Dogfight(DogfightPhase::Slash { .. }) => Some("slash"),
            _ => None,
        }
    }
}

/// An AI-controlled (or player) craft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: EntityId,
    pub position: DVec2,
    pub velocity: DVec2,
    /// Current facing (rad, 0 = +x).
    pub facing: f64,
    /// Facing the controller is turning toward.
    pub desired_facing: f64,
    pub airframe: Airframe,
    pub hit_points: f64,
    pub alive: bool,
    pub faction: Faction,
    pub kind: UnitKind,
    pub loadout: Loadout,
    /// Seconds until the gun may fire again.
    pub gun_cooldown: f64,
    /// Seconds until a missile may launch again.
    pub missile_cooldown: f64,
    pub engagement: Engagement,
    pub target: Option<EntityId>,
    /// Seconds until the next acquisition attempt.
    pub retarget_timer: f64,
    pub squad: Option<SquadLink>,
    pub guard: Option<GuardPost>,
}

impl Combatant {
    pub fn new(
        id: EntityId,
        faction: Faction,
        kind: UnitKind,
        airframe: Airframe,
        loadout: Loadout,
        position: DVec2,
        facing: f64,
    ) -> Self {
        Self {
            id,
            position,
            velocity: DVec2::ZERO,
            facing,
            desired_facing: facing,
            airframe,
            hit_points: airframe.hit_points,
            alive: true,
            faction,
            kind,
            loadout,
            gun_cooldown: 0.0,
            missile_cooldown: 0.0,
            engagement: Engagement::Guard,
            target: None,
            retarget_timer: 0.0,
            squad: None,
            guard: None,
        }
    }

    /// Maximum turn rate in rad/s.
    pub fn turn_rate(&self) -> f64 {
        self.airframe.max_turn_rate_deg.to_radians()
    }

    pub fn max_speed(&self) -> f64 {
        self.airframe.max_speed
    }

    pub fn is_alive(&self) -> bool {
        self.alive && self.hit_points > 0.0
    }
}

/// Homing guidance carried by a missile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Homing {
    pub target: Option<EntityId>,
    /// Max turn rate (rad/s).
    pub turn_rate: f64,
    pub explosion_radius: f64,
    /// Seconds of straight flight before the seeker steers.
    pub arm_delay_secs: f64,
}

/// A round or missile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: EntityId,
    pub faction: Faction,
    pub position: DVec2,
    pub velocity: DVec2,
    pub damage: f64,
    /// Remaining flight time.
    pub lifetime_secs: f64,
    pub homing: Option<Homing>,
}

/// A static body that blocks fire (asteroid, wreck).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: DVec2,
    pub radius: f64,
}

/// Marks a combatant flown by the player rather than the AI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerControlled;
