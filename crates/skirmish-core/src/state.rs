//! Simulation snapshot: the read-only state handed to renderers and UI each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::{Faction, UnitKind};
use crate::events::CombatEvent;
use crate::types::{EntityId, SimTime};

/// Complete visible state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkirmishSnapshot {
    pub time: SimTime,
    pub combatants: Vec<CombatantView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<CombatEvent>,
    pub score: ScoreView,
}

/// A combatant as seen by the renderer and the cooldown indicators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: EntityId,
    pub faction: Faction,
    pub kind: UnitKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub facing: f64,
    pub alive: bool,
    pub hit_points: f64,
    /// Engagement state name (`guard`, `engage_formation`, `dogfight`, `bombing`).
    pub state: String,
    /// Dogfight sub-state name (`merge`, `slash`).
    pub sub_state: Option<String>,
    pub target: Option<EntityId>,
    pub gun_cooldown: f64,
    pub missile_cooldown: f64,
    pub missile_ammo: u32,
}

/// A projectile in flight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub owner: EntityId,
    pub position: DVec2,
    pub velocity: DVec2,
    pub homing: bool,
}

/// Running totals for the session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub rounds_fired: u32,
    pub missiles_launched: u32,
    pub friendly_alive: u32,
    pub hostile_alive: u32,
}
