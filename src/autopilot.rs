//! Scripted player and synthetic camera feed
//!
//! Headless runs have no mouse or webcam, so the autopilot decides where a
//! player would put their hand and `SyntheticCamera` turns that into the kind
//! of noisy, occasionally missing measurement a real camera produces.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::engine::ControlInput;
use crate::input::{SensorError, SensorSample, VisionMeasurement};
use crate::sim::{Category, EngineState};
use crate::{clamp_unit, playfield_x_to_fraction};

/// How far above the paddle a hazard starts to matter
const HAZARD_LOOKAHEAD: f32 = 140.0;
/// Extra clearance kept from a hazard's centre
const HAZARD_CLEARANCE: f32 = 14.0;

/// Picks a horizontal target for the paddle each frame and moves a
/// simulated hand toward it at a human-ish speed
#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Hand position in [0, 1]
    hand: f32,
    /// Maximum hand speed, playfield widths per second
    max_speed: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new()
    }
}

impl Autopilot {
    pub fn new() -> Self {
        Self {
            hand: 0.5,
            max_speed: 1.6,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self
    }

    pub fn hand(&self) -> f32 {
        self.hand
    }

    /// Move the hand toward the current target; returns the new hand position
    pub fn steer(&mut self, state: &EngineState, dt_ms: f32) -> f32 {
        let target = self.choose_target(state, self.hand);
        let max_delta = self.max_speed * dt_ms.max(0.0) / 1000.0;
        self.hand = clamp_unit(self.hand + (target - self.hand).clamp(-max_delta, max_delta));
        self.hand
    }

    /// Target position in [0, 1]; `current` is returned when nothing needs catching
    pub fn choose_target(&self, state: &EngineState, current: f32) -> f32 {
        let catch_line = PADDLE_TOP + PADDLE_HEIGHT;

        // Lowest beneficial object that can still be caught
        let target = state
            .objects
            .iter()
            .filter(|o| o.category == Category::Good && o.pos.y < catch_line)
            .max_by(|a, b| {
                a.pos
                    .y
                    .partial_cmp(&b.pos.y)
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let mut target_x = match target {
            Some(object) => object.pos.x,
            None => clamp_unit(current) * PLAYFIELD_WIDTH,
        };

        let keep_out = PADDLE_WIDTH / 2.0 + HAZARD_CLEARANCE;
        let threats = state.objects.iter().filter(|o| {
            o.category == Category::Bad
                && o.pos.y >= PADDLE_TOP - HAZARD_LOOKAHEAD
                && o.pos.y < catch_line
        });
        for hazard in threats {
            let offset = target_x - hazard.pos.x;
            if offset.abs() < keep_out {
                let left = hazard.pos.x - keep_out;
                let right = hazard.pos.x + keep_out;
                // Dodge toward whichever side keeps the paddle on the field and is closer
                target_x = if left < PADDLE_WIDTH / 2.0 {
                    right
                } else if right > PLAYFIELD_WIDTH - PADDLE_WIDTH / 2.0 {
                    left
                } else if offset < 0.0 {
                    left
                } else {
                    right
                };
            }
        }

        playfield_x_to_fraction(target_x)
    }
}

/// Pointer input for a paddle fraction over a full-width container
pub fn pointer_input(fraction: f32) -> ControlInput {
    ControlInput::Pointer {
        x: clamp_unit(fraction) * PLAYFIELD_WIDTH,
        container_left: 0.0,
        container_width: PLAYFIELD_WIDTH,
    }
}

/// Simulated webcam hand tracker
#[derive(Debug, Clone)]
pub struct SyntheticCamera {
    rng: Pcg32,
    /// Half-width of uniform measurement noise
    noise: f32,
    /// Probability that a frame yields too few qualifying samples
    dropout: f64,
    /// Framing margin the real camera has on each side
    edge_margin: f32,
    /// Samples needed for a detection
    min_samples: u32,
    /// Simulated time at which the camera disappears for good
    fails_at_ms: Option<f64>,
}

impl SyntheticCamera {
    pub fn new(seed: u64, noise: f32, dropout: f64, edge_margin: f32, min_samples: u32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            noise: noise.max(0.0),
            dropout: dropout.clamp(0.0, 1.0),
            edge_margin,
            min_samples: min_samples.max(1),
            fails_at_ms: None,
        }
    }

    /// Make the camera disconnect at `at_ms` and stay gone
    pub fn failing_at(mut self, at_ms: f64) -> Self {
        self.fails_at_ms = Some(at_ms);
        self
    }

    /// Measurement of a hand at `true_fraction` of the playfield
    pub fn sample(&mut self, true_fraction: f32, now_ms: f64) -> SensorSample {
        if self.fails_at_ms.is_some_and(|at| now_ms >= at) {
            return Err(SensorError::Disconnected);
        }

        if self.rng.random_bool(self.dropout) {
            let junk = self.rng.random::<f32>();
            let samples = self.rng.random_range(0..self.min_samples);
            return Ok(VisionMeasurement::new(junk, samples));
        }

        let framed = self.edge_margin + clamp_unit(true_fraction) * (1.0 - 2.0 * self.edge_margin);
        let jitter = if self.noise > 0.0 {
            self.rng.random_range(-self.noise..self.noise)
        } else {
            0.0
        };
        let samples = self
            .rng
            .random_range(self.min_samples..self.min_samples.saturating_mul(10).max(self.min_samples + 1));
        Ok(VisionMeasurement::new(framed + jitter, samples))
    }
}
