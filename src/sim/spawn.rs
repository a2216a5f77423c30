//! Timer-driven object spawner
//!
//! All randomness comes from the caller's generator so a seeded run
//! reproduces the exact spawn sequence.

use glam::Vec2;
use rand::Rng;

use super::state::{Category, EngineState, GameObject};
use crate::consts::*;
use crate::tuning::{DifficultyConfig, ThemeConfig};

/// Milliseconds between spawns for the current score and difficulty
///
/// Shrinks linearly with score, is further divided by the difficulty
/// multiplier, and never drops below the tier's floor.
pub fn spawn_interval_ms(score: u64, difficulty_multiplier: f32, cfg: &DifficultyConfig) -> f32 {
    let linear = cfg.spawn_base_ms - score as f32 * cfg.spawn_decay_per_point;
    let scaled = linear / difficulty_multiplier.max(1.0);
    scaled.max(cfg.spawn_floor_ms)
}

/// Build one random object for the theme
pub fn random_object<R: Rng>(id: u32, theme: &ThemeConfig, rng: &mut R) -> GameObject {
    let category = if rng.random_bool(HAZARD_PROBABILITY) {
        Category::Bad
    } else {
        Category::Good
    };
    let variants = match category {
        Category::Good => &theme.good_variants,
        Category::Bad => &theme.bad_variants,
    };
    let variant = if variants.is_empty() {
        String::new()
    } else {
        variants[rng.random_range(0..variants.len())].clone()
    };
    let x = rng.random_range(SPAWN_MARGIN..PLAYFIELD_WIDTH - SPAWN_MARGIN);
    let speed = rng.random_range(SPEED_MIN..SPEED_MAX);

    GameObject {
        id,
        pos: Vec2::new(x, SPAWN_Y),
        prev_y: SPAWN_Y,
        radius: OBJECT_RADIUS,
        speed,
        category,
        variant,
    }
}

/// Accumulate `dt_ms` and emit at most one object once the interval passes
///
/// Returns the spawned object's id.
pub fn advance_spawner<R: Rng>(
    state: &mut EngineState,
    dt_ms: f32,
    theme: &ThemeConfig,
    cfg: &DifficultyConfig,
    rng: &mut R,
) -> Option<u32> {
    state.spawn_timer_ms += dt_ms.max(0.0);
    let interval = spawn_interval_ms(state.score, state.difficulty_multiplier, cfg);
    if state.spawn_timer_ms <= interval {
        return None;
    }

    state.spawn_timer_ms = 0.0;
    let id = state.next_entity_id();
    let object = random_object(id, theme, rng);
    log::trace!(
        "Spawned #{} {:?} '{}' at x={:.1} speed={:.2}",
        object.id,
        object.category,
        object.variant,
        object.pos.x,
        object.speed
    );
    state.objects.push(object);
    Some(id)
}
