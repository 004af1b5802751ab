//! Hull-specific flight envelopes and default loadouts.

use skirmish_core::components::{Airframe, Loadout};
use skirmish_core::enums::UnitKind;

/// Flight envelope for a hull class.
pub fn airframe_for(kind: UnitKind) -> Airframe {
    match kind {
        UnitKind::Fighter => Airframe {
            max_speed: 650.0,
            max_turn_rate_deg: 240.0,
            acceleration: 500.0,
            hit_points: 100.0,
        },
        UnitKind::Interceptor => Airframe {
            max_speed: 780.0,
            max_turn_rate_deg: 200.0,
            acceleration: 620.0,
            hit_points: 80.0,
        },
        UnitKind::Capital => Airframe {
            max_speed: 160.0,
            max_turn_rate_deg: 25.0,
            acceleration: 60.0,
            hit_points: 2500.0,
        },
    }
}

/// Weapons a hull class launches with.
pub fn loadout_for(kind: UnitKind) -> Loadout {
    match kind {
        UnitKind::Fighter => Loadout {
            gun: "pulse_laser".into(),
            missile: Some("seeker".into()),
            missile_ammo: 4,
        },
        UnitKind::Interceptor => Loadout {
            gun: "mass_driver".into(),
            missile: Some("seeker".into()),
            missile_ammo: 2,
        },
        UnitKind::Capital => Loadout {
            gun: "flak_battery".into(),
            missile: None,
            missile_ammo: 0,
        },
    }
}
