//! Frame-rate independent falling motion

use super::state::GameObject;
use crate::consts::*;

/// Tick delta as a multiple of a 60 Hz frame, clamped so one slow frame
/// cannot carry an object through the paddle
#[inline]
pub fn step_units(dt_ms: f32) -> f32 {
    if !dt_ms.is_finite() {
        return 0.0;
    }
    dt_ms.clamp(0.0, MAX_FRAME_MS) / REFERENCE_FRAME_MS
}

/// Move every object down, then drop those below the playfield
///
/// An object whose path this step started above the paddle's lower edge is
/// kept even if it ended below the playfield, so the collision pass can still
/// see it; `prune_exited` clears it afterwards.
///
/// Returns how many objects left the playfield. Leaving is never scored.
pub fn advance_objects(
    objects: &mut Vec<GameObject>,
    dt_ms: f32,
    gravity_multiplier: f32,
    difficulty_multiplier: f32,
) -> usize {
    let scale = step_units(dt_ms) * gravity_multiplier.max(0.0) * difficulty_multiplier.max(1.0);

    for object in objects.iter_mut() {
        object.prev_y = object.pos.y;
        object.pos.y += object.speed.max(0.0) * scale;
    }

    let paddle_bottom = PADDLE_TOP + PADDLE_HEIGHT;
    let before = objects.len();
    objects.retain(|o| o.pos.y <= PLAYFIELD_HEIGHT || o.prev_y < paddle_bottom);
    before - objects.len()
}

/// Drop every object below the playfield; returns how many were dropped
pub fn prune_exited(objects: &mut Vec<GameObject>) -> usize {
    let before = objects.len();
    objects.retain(|o| o.pos.y <= PLAYFIELD_HEIGHT);
    before - objects.len()
}
