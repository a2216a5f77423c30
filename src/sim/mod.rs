//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, inputs and frame
//! deltas it produces the same run:
//! - Seeded, injectable RNG only
//! - Frame-rate independent motion (clamped step units)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{CollisionSummary, PaddleRect, catch_points, resolve_collisions};
pub use difficulty::difficulty_multiplier;
pub use motion::{advance_objects, prune_exited, step_units};
pub use spawn::{advance_spawner, random_object, spawn_interval_ms};
pub use state::{Category, EngineState, GameEvent, GameObject, RngState, Snapshot};
pub use tick::{TickReport, tick};
