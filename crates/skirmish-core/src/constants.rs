//! Simulation constants and tuning parameters.
//!
//! Distances are in world units, times in seconds, angles in radians
//! unless a name says otherwise. `AiTuning::default()` is built from these.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Target selection ---

/// Default radius within which a combatant looks for targets.
pub const DEFAULT_SEARCH_RANGE: f64 = 6000.0;

/// Score penalty per squared unit of distance.
pub const TARGET_DISTANCE_PENALTY: f64 = 0.00008;

/// Squared distance under which a fighter strongly prefers fighter targets (~2500 units).
pub const FIGHTER_CLOSE_RANGE_SQ: f64 = 6_250_000.0;

/// Bonus for a fighter-class candidate close to a fighter-class requester.
pub const FIGHTER_CLOSE_BONUS: f64 = 40_000.0;

/// Bonus for any other fighter-class candidate of a fighter-class requester.
pub const FIGHTER_FAR_BONUS: f64 = 1_000.0;

/// Bonus for a capital candidate when the requester is capital-class.
pub const HEAVY_VS_CAPITAL_BONUS: f64 = 5_000.0;

/// Bonus for a fighter candidate when the requester is capital-class.
pub const HEAVY_VS_FIGHTER_BONUS: f64 = 2_000.0;

/// Squared distance under which anything is engaged first (~350 units).
pub const PROXIMITY_OVERRIDE_RANGE_SQ: f64 = 122_500.0;

/// Flat bonus inside the proximity override radius.
pub const PROXIMITY_OVERRIDE_BONUS: f64 = 50_000.0;

/// Upper bound of the random tie-break added to every score.
pub const TARGET_SCORE_JITTER: f64 = 500.0;

/// Minimum delay between target acquisition attempts.
pub const RETARGET_MIN_SECS: f64 = 1.0;

/// Maximum delay between target acquisition attempts.
pub const RETARGET_MAX_SECS: f64 = 1.5;

// --- Intercept ---

/// Longest lead time the intercept solver will extrapolate.
pub const INTERCEPT_MAX_LEAD_SECS: f64 = 4.0;

/// Threshold under which quadratic/linear coefficients are treated as zero.
pub const INTERCEPT_EPSILON: f64 = 1e-6;

// --- Engagement state machine ---

/// Distance under which a fighter-class target is dogfought.
pub const DOGFIGHT_ENTER_RANGE: f64 = 600.0;

/// Distance over which a dogfight falls back to an intercept course.
pub const DOGFIGHT_EXIT_RANGE: f64 = 1100.0;

/// Distance under which guns are tried while on an intercept course.
pub const ENGAGE_FIRE_RANGE: f64 = 1400.0;

/// Speed multiplier while merging.
pub const MERGE_SPEED_FACTOR: f64 = 1.15;

/// Shortest merge leg.
pub const MERGE_MIN_SECS: f64 = 0.7;

/// Longest merge leg.
pub const MERGE_MAX_SECS: f64 = 1.2;

/// Distance at which a merge breaks into a slash early.
pub const MERGE_BREAK_RANGE: f64 = 120.0;

/// Duration of a slashing pass.
pub const SLASH_DURATION_SECS: f64 = 0.6;

/// Weight of the direct-approach component during a slash.
pub const SLASH_DIRECT_WEIGHT: f64 = 0.3;

/// Weight of the lateral component during a slash.
pub const SLASH_LATERAL_WEIGHT: f64 = 1.2;

/// Distance under which a capital target is attacked with bombing runs.
pub const BOMBING_ENTER_RANGE: f64 = 1500.0;

/// Distance over which bombing runs are abandoned for an intercept course.
pub const BOMBING_EXIT_RANGE: f64 = 2500.0;

/// Distance from the run waypoint at which the run reverses.
pub const BOMBING_WAYPOINT_RADIUS: f64 = 250.0;

/// Distance from the target at which run waypoints are placed.
pub const BOMBING_RUN_OVERSHOOT: f64 = 700.0;

/// Distance under which a bomber faces its target instead of its velocity.
pub const BOMBING_FACE_TARGET_RANGE: f64 = 1000.0;

/// Radius within which friendlies push each other apart.
pub const SEPARATION_RADIUS: f64 = 140.0;

/// Peak separation acceleration at zero distance.
pub const SEPARATION_STRENGTH: f64 = 900.0;

// --- Formation / guard ---

/// Proportional gain toward a wingman's slot.
pub const WINGMAN_GAIN: f64 = 3.0;

/// Proportional gain toward a squad leader's anchor.
pub const LEADER_GAIN: f64 = 2.0;

/// Fraction of max speed a wingman may use to hold formation.
pub const WINGMAN_SPEED_CAP: f64 = 0.9;

/// Fraction of max speed a leader may use while following its anchor.
pub const LEADER_SPEED_CAP: f64 = 0.6;

/// Rate at which current velocity blends toward the formation velocity (per second).
pub const FORMATION_BLEND_RATE: f64 = 4.0;

/// Fraction of velocity lost per second when idle with no assignment.
pub const PASSIVE_DRAG_RATE: f64 = 0.8;

// --- Weapons ---

/// Max angle between facing and target bearing for guns.
pub const GUN_BORESIGHT_TOLERANCE: f64 = 0.5;

/// Max angle between facing and target bearing for missile launch.
pub const MISSILE_BORESIGHT_TOLERANCE: f64 = 0.6;

/// Distance under which missiles may be launched.
pub const MISSILE_LAUNCH_RANGE: f64 = 1200.0;

/// Probability per eligible tick that a missile is launched.
pub const MISSILE_LAUNCH_CHANCE: f64 = 0.02;

/// Cooldown after a missile launch.
pub const MISSILE_COOLDOWN_SECS: f64 = 4.0;

// --- Host simulation ---

/// Distance at which a gun round counts as a hit.
pub const ROUND_HIT_RADIUS: f64 = 18.0;

/// Entities beyond this distance from the origin are removed.
pub const WORLD_RADIUS: f64 = 50_000.0;
