//! Combat AI for SKIRMISH.
//!
//! Lead-aim solving, rate-limited steering, target selection, weapon fire
//! control, formation keeping, and the per-combatant engagement state
//! machine that ties them together.

pub mod fire_control;
pub mod formation;
pub mod fsm;
pub mod intercept;
pub mod profiles;
pub mod services;
pub mod steering;
pub mod targeting;
pub mod weapons;

pub use skirmish_core as core;
