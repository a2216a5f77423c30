//! Per-tick simulation pipeline
//!
//! Order is fixed: difficulty, motion, spawn, collision. Motion and collision
//! are separate passes that each rebuild the object list, so nothing is
//! removed while it is being iterated.

use rand::Rng;

use super::collision::{CollisionSummary, PaddleRect, resolve_collisions};
use super::difficulty::difficulty_multiplier;
use super::motion::{advance_objects, prune_exited};
use super::spawn::advance_spawner;
use super::state::{EngineState, GameEvent};
use crate::tuning::SessionConfig;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Id of the object spawned this tick
    pub spawned: Option<u32>,
    /// Objects that fell out of the playfield
    pub exited: usize,
    pub collisions: CollisionSummary,
}

/// Advance the simulation by `dt_ms` of wall-clock time
///
/// `paddle_fraction` is the estimator's current horizontal position in [0, 1].
/// Events produced by this tick are appended to `events`.
pub fn tick<R: Rng>(
    state: &mut EngineState,
    config: &SessionConfig,
    paddle_fraction: f32,
    dt_ms: f32,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> TickReport {
    let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

    state.time_ticks += 1;
    state.elapsed_ms += dt_ms as f64;

    state.difficulty_multiplier =
        difficulty_multiplier(state.score, state.elapsed_seconds(), &config.difficulty);

    let mut exited = advance_objects(
        &mut state.objects,
        dt_ms,
        config.theme.gravity_multiplier,
        state.difficulty_multiplier,
    );

    let spawned = advance_spawner(state, dt_ms, &config.theme, &config.difficulty, rng);

    let paddle = PaddleRect::from_fraction(paddle_fraction);
    let collisions = resolve_collisions(state, &paddle, &config.theme, &config.difficulty, events);
    exited += prune_exited(&mut state.objects);

    TickReport {
        spawned,
        exited,
        collisions,
    }
}
