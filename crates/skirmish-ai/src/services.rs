//! Collaborators the decision core consumes from its host.
//!
//! The AI never owns or mutates other entities. It reads them through an
//! [`EntityRegistry`] and hands fire decisions to a [`ProjectileSpawner`].
//! Registry contents may be one frame stale: entities are updated in host
//! order, so a contact's position can predate this frame's update.

use std::collections::HashMap;

use glam::DVec2;

use skirmish_core::components::{Combatant, Homing};
use skirmish_core::enums::{Faction, UnitKind};
use skirmish_core::types::EntityId;

/// Normalized view of an entity at the registry boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub id: EntityId,
    pub faction: Faction,
    pub kind: UnitKind,
    pub position: DVec2,
    pub velocity: DVec2,
    pub facing: f64,
    pub alive: bool,
}

impl Contact {
    pub fn from_combatant(c: &Combatant) -> Self {
        Self {
            id: c.id,
            faction: c.faction,
            kind: c.kind,
            position: c.position,
            velocity: c.velocity,
            facing: c.facing,
            alive: c.is_alive(),
        }
    }
}

/// Read-only lookup into the live-entity registry.
pub trait EntityRegistry {
    /// Resolve a handle. `None` if the entity no longer exists.
    fn resolve(&self, id: EntityId) -> Option<&Contact>;

    /// All live contacts of one faction.
    fn live_contacts<'a>(&'a self, faction: Faction) -> Box<dyn Iterator<Item = &'a Contact> + 'a>;
}

/// Whether something blocks fire between two points.
pub trait LineOfFire {
    fn blocked(&self, shooter: DVec2, target: DVec2, max_range: f64) -> bool;
}

/// Local avoidance acceleration against nearby friendlies.
pub trait SeparationField {
    fn separation(&self, who: &Contact, radius: f64, strength: f64) -> DVec2;
}

/// A gun round ready to be put in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundLaunch {
    pub owner: EntityId,
    pub faction: Faction,
    pub target: EntityId,
    pub origin: DVec2,
    pub velocity: DVec2,
    pub damage: f64,
    pub lifetime_secs: f64,
}

/// A homing missile ready to be put in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct MissileLaunch {
    pub owner: EntityId,
    pub faction: Faction,
    pub origin: DVec2,
    pub velocity: DVec2,
    pub lifetime_secs: f64,
    pub damage: f64,
    pub homing: Homing,
}

/// Receives fire decisions. Turning them into hits is the host's business.
pub trait ProjectileSpawner {
    fn spawn_round(&mut self, launch: RoundLaunch);
    fn spawn_missile(&mut self, launch: MissileLaunch);
}

/// A buffered fire decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    Round(RoundLaunch),
    Missile(MissileLaunch),
}

impl ProjectileSpawner for Vec<Launch> {
    fn spawn_round(&mut self, launch: RoundLaunch) {
        self.push(Launch::Round(launch));
    }

    fn spawn_missile(&mut self, launch: MissileLaunch) {
        self.push(Launch::Missile(launch));
    }
}

/// Empty space: nothing blocks fire and nobody pushes back.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenSpace;

impl LineOfFire for OpenSpace {
    fn blocked(&self, _shooter: DVec2, _target: DVec2, _max_range: f64) -> bool {
        false
    }
}

impl SeparationField for OpenSpace {
    fn separation(&self, _who: &Contact, _radius: f64, _strength: f64) -> DVec2 {
        DVec2::ZERO
    }
}

/// A flat registry built from a list of contacts.
///
/// Hosts without their own entity store (and tests) can snapshot their
/// combatants into one of these once per frame.
#[derive(Debug, Clone, Default)]
pub struct ContactList {
    contacts: Vec<Contact>,
    index: HashMap<EntityId, usize>,
}

impl ContactList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a contact.
    pub fn insert(&mut self, contact: Contact) {
        match self.index.get(&contact.id) {
            Some(&slot) => self.contacts[slot] = contact,
            None => {
                self.index.insert(contact.id, self.contacts.len());
                self.contacts.push(contact);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.iter()
    }
}

impl FromIterator<Contact> for ContactList {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        let mut list = ContactList::new();
        for contact in iter {
            list.insert(contact);
        }
        list
    }
}

impl EntityRegistry for ContactList {
    fn resolve(&self, id: EntityId) -> Option<&Contact> {
        self.index.get(&id).map(|&slot| &self.contacts[slot])
    }

    fn live_contacts<'a>(&'a self, faction: Faction) -> Box<dyn Iterator<Item = &'a Contact> + 'a> {
        Box::new(
            self.contacts
                .iter()
                .filter(move |c| c.alive && c.faction == faction),
        )
    }
}

impl SeparationField for ContactList {
    /// Linear falloff push away from every live same-faction contact inside `radius`.
    fn separation(&self, who: &Contact, radius: f64, strength: f64) -> DVec2 {
        if radius <= 0.0 {
            return DVec2::ZERO;
        }
        let mut push = DVec2::ZERO;
        for other in self.live_contacts(who.faction) {
            if other.id == who.id {
                continue;
            }
            let away = who.position - other.position;
            let dist = away.length();
            if dist >= radius {
                continue;
            }
            let dir = if dist > 1e-6 {
                away / dist
            } else {
                // Coincident: push along a stable per-pair axis.
                if who.id < other.id {
                    DVec2::X
                } else {
                    -DVec2::X
                }
            };
            push += dir * strength * (1.0 - dist / radius);
        }
        push
    }
}
