//! Weapon and missile definition tables.
//!
//! Looked up by identifier from a combatant's loadout. The catalog is passed
//! into the state machine explicitly; there is no global table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use skirmish_core::config::ConfigError;
use skirmish_core::constants::MISSILE_COOLDOWN_SECS;

/// A gun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    /// Maximum engagement distance.
    pub range: f64,
    pub rounds_per_second: f64,
    pub damage: f64,
    pub projectile_speed: f64,
    pub lifetime_secs: f64,
}

impl WeaponDef {
    /// Seconds between rounds.
    pub fn refire_secs(&self) -> f64 {
        1.0 / self.rounds_per_second
    }

    /// Whether the gun can actually put a round downrange.
    pub fn is_usable(&self) -> bool {
        [self.range, self.rounds_per_second, self.projectile_speed]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }
}

/// A homing missile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissileDef {
    pub speed: f64,
    /// Seeker turn rate (rad/s).
    pub turn_rate: f64,
    pub lifetime_secs: f64,
    pub damage: f64,
    pub explosion_radius: f64,
    /// Straight-flight delay before homing engages.
    pub arm_delay_secs: f64,
    /// Launcher lockout after a launch.
    #[serde(default = "default_missile_cooldown")]
    pub cooldown_secs: f64,
}

fn default_missile_cooldown() -> f64 {
    MISSILE_COOLDOWN_SECS
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeaponCatalog {
    #[serde(default)]
    pub guns: HashMap<String, WeaponDef>,
    #[serde(default)]
    pub missiles: HashMap<String, MissileDef>,
}

impl WeaponCatalog {
    /// The built-in weapon table.
    pub fn standard() -> Self {
        let mut guns = HashMap::new();
        guns.insert(
            "pulse_laser".to_string(),
            WeaponDef {
                range: 1100.0,
                rounds_per_second: 6.0,
                damage: 8.0,
                projectile_speed: 1800.0,
                lifetime_secs: 0.8,
            },
        );
        guns.insert(
            "mass_driver".to_string(),
            WeaponDef {
                range: 1400.0,
                rounds_per_second: 4.0,
                damage: 12.0,
                projectile_speed: 2200.0,
                lifetime_secs: 0.9,
            },
        );
        guns.insert(
            "flak_battery".to_string(),
            WeaponDef {
                range: 1600.0,
                rounds_per_second: 2.0,
                damage: 30.0,
                projectile_speed: 1200.0,
                lifetime_secs: 1.6,
            },
        );

        let mut missiles = HashMap::new();
        missiles.insert(
            "seeker".to_string(),
            MissileDef {
                speed: 900.0,
                turn_rate: 3.0,
                lifetime_secs: 4.0,
                damage: 60.0,
                explosion_radius: 40.0,
                arm_delay_secs: 0.25,
                cooldown_secs: MISSILE_COOLDOWN_SECS,
            },
        );

        Self { guns, missiles }
    }

    /// Parse a catalog from JSON and validate every entry.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let catalog: WeaponCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn gun(&self, id: &str) -> Option<&WeaponDef> {
        self.guns.get(id)
    }

    pub fn missile(&self, id: &str) -> Option<&MissileDef> {
        self.missiles.get(id)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (id, gun) in &self.guns {
            let fields = [
                ("range", gun.range),
                ("rounds_per_second", gun.rounds_per_second),
                ("projectile_speed", gun.projectile_speed),
                ("lifetime_secs", gun.lifetime_secs),
            ];
            for (field, value) in fields {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::Invalid {
                        field,
                        reason: format!("gun `{id}` needs a positive value, got {value}"),
                    });
                }
            }
        }
        for (id, missile) in &self.missiles {
            let fields = [
                ("speed", missile.speed),
                ("turn_rate", missile.turn_rate),
                ("lifetime_secs", missile.lifetime_secs),
            ];
            for (field, value) in fields {
                if !(value.is_finite() && value > 0.0) {
                    return Err(ConfigError::Invalid {
                        field,
                        reason: format!("missile `{id}` needs a positive value, got {value}"),
                    });
                }
            }
        }
        Ok(())
    }
}
