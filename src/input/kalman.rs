//! One-dimensional recursive filter for a slowly moving scalar
//!
//! Random-walk model: the true value drifts by process noise `q` between
//! updates and each measurement carries noise `r`.

use serde::{Deserialize, Serialize};

use crate::tuning::EstimatorTuning;

/// Estimate plus its variance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalarKalman {
    /// Current estimate
    x: f32,
    /// Estimate variance (always >= 0)
    p: f32,
    /// Process noise
    q: f32,
    /// Measurement noise
    r: f32,
}

impl ScalarKalman {
    pub fn new(x: f32, p: f32, q: f32, r: f32) -> Self {
        Self {
            x,
            p: p.max(0.0),
            q: q.max(0.0),
            r: r.max(0.0),
        }
    }

    pub fn from_tuning(tuning: &EstimatorTuning) -> Self {
        Self::new(
            tuning.initial_estimate,
            tuning.initial_variance,
            tuning.process_noise,
            tuning.measurement_noise,
        )
    }

    pub fn estimate(&self) -> f32 {
        self.x
    }

    pub fn variance(&self) -> f32 {
        self.p
    }

    pub fn process_noise(&self) -> f32 {
        self.q
    }

    pub fn measurement_noise(&self) -> f32 {
        self.r
    }

    /// Predict then correct with measurement `z`. Returns the new estimate.
    pub fn update(&mut self, z: f32) -> f32 {
        self.p += self.q;
        let denom = self.p + self.r;
        // q = r = p = 0 leaves nothing to weigh; keep the estimate.
        if denom <= 0.0 {
            return self.x;
        }
        let k = self.p / denom;
        self.x += k * (z - self.x);
        self.p *= 1.0 - k;
        self.x
    }

    /// Gain the next `update` would apply
    pub fn next_gain(&self) -> f32 {
        let p = self.p + self.q;
        let denom = p + self.r;
        if denom <= 0.0 { 0.0 } else { p / denom }
    }
}
