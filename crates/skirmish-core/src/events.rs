//! Events emitted by the combat AI for UI, audio, and logging.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Something a combatant decided this tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A target was picked by the selector.
    TargetAcquired { entity: EntityId, target: EntityId },
    /// The held target died or vanished.
    TargetLost { entity: EntityId, target: EntityId },
    /// Engagement state or sub-state changed.
    StateChanged {
        entity: EntityId,
        from: String,
        to: String,
    },
    /// Gun discharged.
    GunFired { entity: EntityId, target: EntityId },
    /// Missile launched.
    MissileLaunched {
        entity: EntityId,
        target: EntityId,
        ammo_left: u32,
    },
}
