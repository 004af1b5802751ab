//! ECS systems that operate on the skirmish world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! They keep no state of their own; everything lives in components.

pub mod cleanup;
pub mod combat_ai;
pub mod impacts;
pub mod movement;
pub mod projectiles;
pub mod snapshot;
