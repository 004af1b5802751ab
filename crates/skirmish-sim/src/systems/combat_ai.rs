//! Combat AI system: runs the engagement state machine for every
//! AI-controlled combatant.

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skirmish_core::components::{Combatant, PlayerControlled};
use skirmish_core::config::AiTuning;
use skirmish_core::constants::DT;
use skirmish_core::events::CombatEvent;

use skirmish_ai::fsm::CombatBrain;
use skirmish_ai::services::Launch;
use skirmish_ai::weapons::WeaponCatalog;

use crate::registry::WorldRegistry;

/// Advance every AI combatant by one tick. Fire decisions land in `launches`.
pub fn run(
    world: &mut World,
    catalog: &WeaponCatalog,
    tuning: &AiTuning,
    rng: &mut ChaCha8Rng,
    launches: &mut Vec<Launch>,
    events: &mut Vec<CombatEvent>,
) {
    let registry = WorldRegistry::from_world(world);
    let brain = CombatBrain::new(catalog, &registry, tuning)
        .with_line_of_fire(&registry)
        .with_separation(&registry);

    // Decide against the frozen registry, then write back.
    let mut updates: Vec<(hecs::Entity, Combatant)> = Vec::new();
    {
        let mut query = world.query::<(&Combatant, Option<&PlayerControlled>)>();
        for (entity, (combatant, player)) in query.iter() {
            if player.is_some() || !combatant.is_alive() {
                continue;
            }
            let mut next = combatant.clone();
            brain.advance(&mut next, DT, &mut *rng, &mut *launches, events);
            updates.push((entity, next));
        }
    }

    for (entity, next) in updates {
        if let Ok(mut combatant) = world.get::<&mut Combatant>(entity) {
            *combatant = next;
        }
    }
}
