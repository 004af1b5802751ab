//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which side a craft fights for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Player side: the player's ship and friendly NPCs.
    Friendly,
    /// Pirates and other enemy craft.
    Hostile,
}

impl Faction {
    /// The faction this one fights against.
    pub fn opponent(self) -> Faction {
        match self {
            Faction::Friendly => Faction::Hostile,
            Faction::Hostile => Faction::Friendly,
        }
    }
}

/// Hull class of a craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    /// Light, agile dogfighter.
    Fighter,
    /// Fast fighter-class hunter with a longer gun.
    Interceptor,
    /// Capital-class hull: frigates, cruisers, stations.
    Capital,
}

impl UnitKind {
    /// Fighters and interceptors dogfight each other; capitals get bombed.
    pub fn is_fighter_class(self) -> bool {
        matches!(self, UnitKind::Fighter | UnitKind::Interceptor)
    }

    pub fn is_capital(self) -> bool {
        matches!(self, UnitKind::Capital)
    }
}

/// Role of a craft inside its squad.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquadRole {
    /// Leads the squad; follows its own anchor (e.g. the player's ship) loosely.
    Leader,
    /// Holds a fixed slot relative to the squad leader.
    #[default]
    Wingman,
}

/// Why a weapon discharge was held this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldReason {
    /// Target handle did not resolve to a live entity.
    NoTarget,
    /// Weapon identifier missing from the catalog.
    UnknownWeapon,
    /// Something sits between shooter and target.
    Obstructed,
    OutOfRange,
    /// Facing deviates too far from the target bearing.
    OffBoresight,
    Cooldown,
    NoAmmo,
    /// Eligible, but the per-tick launch roll failed.
    Gated,
}
