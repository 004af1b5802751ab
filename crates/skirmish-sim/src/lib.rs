//! Simulation host for SKIRMISH.
//!
//! Owns the hecs ECS world, feeds the combat AI a per-tick registry
//! snapshot, flies the projectiles it launches, and produces
//! `SkirmishSnapshot`s at a fixed tick rate.

pub mod engine;
pub mod registry;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SkirmishEngine};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
