//! Per-tick read-only view of the world handed to the combat AI.
//!
//! Built once at the start of the AI system, so every combatant decides
//! against the same frame regardless of update order.

use glam::DVec2;
use hecs::World;

use skirmish_core::components::{Combatant, Obstacle};
use skirmish_core::enums::Faction;
use skirmish_core::types::EntityId;

use skirmish_ai::services::{Contact, ContactList, EntityRegistry, LineOfFire, SeparationField};

/// Snapshot of combatants and obstacles.
#[derive(Debug, Clone, Default)]
pub struct WorldRegistry {
    contacts: ContactList,
    obstacles: Vec<Obstacle>,
}

impl WorldRegistry {
    pub fn from_world(world: &World) -> Self {
        let contacts = world
            .query::<&Combatant>()
            .iter()
            .map(|(_, c)| Contact::from_combatant(c))
            .collect();
        let obstacles = world
            .query::<&Obstacle>()
            .iter()
            .map(|(_, o)| *o)
            .collect();
        Self {
            contacts,
            obstacles,
        }
    }

    pub fn contacts(&self) -> &ContactList {
        &self.contacts
    }
}

impl EntityRegistry for WorldRegistry {
    fn resolve(&self, id: EntityId) -> Option<&Contact> {
        self.contacts.resolve(id)
    }

    fn live_contacts<'a>(&'a self, faction: Faction) -> Box<dyn Iterator<Item = &'a Contact> + 'a> {
        self.contacts.live_contacts(faction)
    }
}

impl SeparationField for WorldRegistry {
    fn separation(&self, who: &Contact, radius: f64, strength: f64) -> DVec2 {
        self.contacts.separation(who, radius, strength)
    }
}

impl LineOfFire for WorldRegistry {
    /// Blocked if any obstacle overlaps the shot line, out to `max_range`.
    fn blocked(&self, shooter: DVec2, target: DVec2, max_range: f64) -> bool {
        let to_target = target - shooter;
        let length = to_target.length().min(max_range.max(0.0));
        if length <= 0.0 {
            return false;
        }
        let dir = to_target.normalize_or_zero();
        self.obstacles
            .iter()
            .any(|o| segment_hits_circle(shooter, dir, length, o.position, o.radius))
    }
}

/// Whether the segment `origin + dir * [0, length]` passes within `radius` of `center`.
pub(crate) fn segment_hits_circle(
    origin: DVec2,
    dir: DVec2,
    length: f64,
    center: DVec2,
    radius: f64,
) -> bool {
    let along = (center - origin).dot(dir).clamp(0.0, length);
    let closest = origin + dir * along;
    closest.distance_squared(center) <= radius * radius
}
