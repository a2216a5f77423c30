//! Difficulty ramp
//!
//! Grows without bound with both score and elapsed time, so stalling still
//! escalates.

use crate::tuning::DifficultyConfig;

/// `1 + score / score_divisor + elapsed / time_divisor`
pub fn difficulty_multiplier(score: u64, elapsed_seconds: f64, cfg: &DifficultyConfig) -> f32 {
    let from_score = if cfg.score_divisor > 0.0 {
        score as f64 / cfg.score_divisor as f64
    } else {
        0.0
    };
    let from_time = if cfg.time_divisor_secs > 0.0 {
        elapsed_seconds.max(0.0) / cfg.time_divisor_secs as f64
    } else {
        0.0
    };
    (1.0 + from_score + from_time) as f32
}
