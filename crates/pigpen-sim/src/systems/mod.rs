//! ECS systems that operate on the simulation world.
//!
//! Systems are plain functions over the `EntityStore` (or `&World` for read-only).
//! They do not own state. All state lives in components and the engine.

pub mod collision;
pub mod combat;
pub mod effects;
pub mod movement;
pub mod snapshot;
pub mod spawner;
