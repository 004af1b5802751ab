//! Runtime tuning for the combat AI.
//!
//! Every field defaults to the matching constant, so a tuning file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable parameters of the engagement state machine and its components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    // Target selection
    pub search_range: f64,
    pub distance_penalty: f64,
    pub fighter_close_range_sq: f64,
    pub fighter_close_bonus: f64,
    pub fighter_far_bonus: f64,
    pub heavy_vs_capital_bonus: f64,
    pub heavy_vs_fighter_bonus: f64,
    pub proximity_override_range_sq: f64,
    pub proximity_override_bonus: f64,
    pub score_jitter: f64,
    pub retarget_min_secs: f64,
    pub retarget_max_secs: f64,

    // Intercept
    pub max_lead_secs: f64,

    // Engagement
    pub dogfight_enter_range: f64,
    pub dogfight_exit_range: f64,
    pub engage_fire_range: f64,
    pub merge_speed_factor: f64,
    pub merge_min_secs: f64,
    pub merge_max_secs: f64,
    pub merge_break_range: f64,
    pub slash_duration_secs: f64,
    pub slash_direct_weight: f64,
    pub slash_lateral_weight: f64,
    pub bombing_enter_range: f64,
    pub bombing_exit_range: f64,
    pub bombing_waypoint_radius: f64,
    pub bombing_run_overshoot: f64,
    pub bombing_face_target_range: f64,
    pub separation_radius: f64,
    pub separation_strength: f64,

    // Formation
    pub wingman_gain: f64,
    pub leader_gain: f64,
    pub wingman_speed_cap: f64,
    pub leader_speed_cap: f64,
    pub formation_blend_rate: f64,
    pub passive_drag_rate: f64,

    // Weapons
    pub gun_boresight_tolerance: f64,
    pub missile_boresight_tolerance: f64,
    pub missile_launch_range: f64,
    pub missile_launch_chance: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            search_range: DEFAULT_SEARCH_RANGE,
            distance_penalty: TARGET_DISTANCE_PENALTY,
            fighter_close_range_sq: FIGHTER_CLOSE_RANGE_SQ,
            fighter_close_bonus: FIGHTER_CLOSE_BONUS,
            fighter_far_bonus: FIGHTER_FAR_BONUS,
            heavy_vs_capital_bonus: HEAVY_VS_CAPITAL_BONUS,
            heavy_vs_fighter_bonus: HEAVY_VS_FIGHTER_BONUS,
            proximity_override_range_sq: PROXIMITY_OVERRIDE_RANGE_SQ,
            proximity_override_bonus: PROXIMITY_OVERRIDE_BONUS,
            score_jitter: TARGET_SCORE_JITTER,
            retarget_min_secs: RETARGET_MIN_SECS,
            retarget_max_secs: RETARGET_MAX_SECS,
            max_lead_secs: INTERCEPT_MAX_LEAD_SECS,
            dogfight_enter_range: DOGFIGHT_ENTER_RANGE,
            dogfight_exit_range: DOGFIGHT_EXIT_RANGE,
            engage_fire_range: ENGAGE_FIRE_RANGE,
            merge_speed_factor: MERGE_SPEED_FACTOR,
            merge_min_secs: MERGE_MIN_SECS,
            merge_max_secs: MERGE_MAX_SECS,
            merge_break_range: MERGE_BREAK_RANGE,
            slash_duration_secs: SLASH_DURATION_SECS,
            slash_direct_weight: SLASH_DIRECT_WEIGHT,
            slash_lateral_weight: SLASH_LATERAL_WEIGHT,
            bombing_enter_range: BOMBING_ENTER_RANGE,
            bombing_exit_range: BOMBING_EXIT_RANGE,
            bombing_waypoint_radius: BOMBING_WAYPOINT_RADIUS,
            bombing_run_overshoot: BOMBING_RUN_OVERSHOOT,
            bombing_face_target_range: BOMBING_FACE_TARGET_RANGE,
            separation_radius: SEPARATION_RADIUS,
            separation_strength: SEPARATION_STRENGTH,
            wingman_gain: WINGMAN_GAIN,
            leader_gain: LEADER_GAIN,
            wingman_speed_cap: WINGMAN_SPEED_CAP,
            leader_speed_cap: LEADER_SPEED_CAP,
            formation_blend_rate: FORMATION_BLEND_RATE,
            passive_drag_rate: PASSIVE_DRAG_RATE,
            gun_boresight_tolerance: GUN_BORESIGHT_TOLERANCE,
            missile_boresight_tolerance: MISSILE_BORESIGHT_TOLERANCE,
            missile_launch_range: MISSILE_LAUNCH_RANGE,
            missile_launch_chance: MISSILE_LAUNCH_CHANCE,
        }
    }
}

impl AiTuning {
    /// Parse a JSON tuning document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: AiTuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a JSON tuning file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values the state machine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("search_range", self.search_range),
            ("dogfight_enter_range", self.dogfight_enter_range),
            ("dogfight_exit_range", self.dogfight_exit_range),
            ("bombing_enter_range", self.bombing_enter_range),
            ("bombing_exit_range", self.bombing_exit_range),
            ("bombing_waypoint_radius", self.bombing_waypoint_radius),
            ("merge_min_secs", self.merge_min_secs),
            ("slash_duration_secs", self.slash_duration_secs),
            ("retarget_min_secs", self.retarget_min_secs),
            ("max_lead_secs", self.max_lead_secs),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive and finite, got {value}"),
                });
            }
        }

        if self.dogfight_exit_range < self.dogfight_enter_range {
            return Err(ConfigError::Invalid {
                field: "dogfight_exit_range",
                reason: "must not be below dogfight_enter_range".into(),
            });
        }
        if self.bombing_exit_range < self.bombing_enter_range {
            return Err(ConfigError::Invalid {
                field: "bombing_exit_range",
                reason: "must not be below bombing_enter_range".into(),
            });
        }
        if self.merge_max_secs < self.merge_min_secs {
            return Err(ConfigError::Invalid {
                field: "merge_max_secs",
                reason: "must not be below merge_min_secs".into(),
            });
        }
        if self.retarget_max_secs < self.retarget_min_secs {
            return Err(ConfigError::Invalid {
                field: "retarget_max_secs",
                reason: "must not be below retarget_min_secs".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.missile_launch_chance) {
            return Err(ConfigError::Invalid {
                field: "missile_launch_chance",
                reason: format!("must lie in [0, 1], got {}", self.missile_launch_chance),
            });
        }
        Ok(())
    }
}
