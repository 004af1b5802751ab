//! Target selection by weighted scoring.

use rand::Rng;

use skirmish_core::config::AiTuning;
use skirmish_core::enums::UnitKind;
use skirmish_core::types::EntityId;

use crate::services::{Contact, EntityRegistry};

/// Score one candidate for `requester` at squared distance `dist_sq`,
/// before jitter. Higher is better.
pub fn base_score(
    requester: UnitKind,
    candidate: UnitKind,
    dist_sq: f64,
    tuning: &AiTuning,
) -> f64 {
    let mut score = -dist_sq * tuning.distance_penalty;

    if requester.is_fighter_class() {
        if candidate.is_fighter_class() {
            score += if dist_sq < tuning.fighter_close_range_sq {
                tuning.fighter_close_bonus
            } else {
                tuning.fighter_far_bonus
            };
        }
    } else if candidate.is_capital() {
        score += tuning.heavy_vs_capital_bonus;
    } else {
        score += tuning.heavy_vs_fighter_bonus;
    }

    // Anything this close is an immediate threat regardless of class.
    if dist_sq < tuning.proximity_override_range_sq {
        score += tuning.proximity_override_bonus;
    }
    score
}

/// Best live opponent of `requester` within `search_range`, or `None`.
///
/// Ties keep the first candidate in registry order.
pub fn select_target<R: Rng + ?Sized>(
    requester: &Contact,
    search_range: f64,
    registry: &dyn EntityRegistry,
    tuning: &AiTuning,
    rng: &mut R,
) -> Option<EntityId> {
    let range_sq = search_range * search_range;
    let mut best: Option<(EntityId, f64)> = None;

    for candidate in registry.live_contacts(requester.faction.opponent()) {
        if candidate.id == requester.id {
            continue;
        }
        let dist_sq = requester.position.distance_squared(candidate.position);
        if !dist_sq.is_finite() || dist_sq > range_sq {
            continue;
        }
        let mut score = base_score(requester.kind, candidate.kind, dist_sq, tuning);
        if tuning.score_jitter > 0.0 && tuning.score_jitter.is_finite() {
            score += rng.gen_range(0.0..tuning.score_jitter);
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((candidate.id, score)),
        }
    }

    best.map(|(id, _)| id)
}
