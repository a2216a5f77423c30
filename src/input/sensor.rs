//! Camera measurement boundary
//!
//! The vision collaborator hands over a raw horizontal fraction and the
//! number of qualifying samples it was computed from, or reports that the
//! camera is unavailable. This is the only fallible edge of the core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a measurement could not be used
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize, Deserialize)]
pub enum SensorError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("no camera device available")]
    NoDevice,
    #[error("camera stream disconnected")]
    Disconnected,
    #[error("measurement is not a finite number: {0}")]
    InvalidMeasurement(f32),
}

impl SensorError {
    /// Hardware/permission failures, as opposed to one bad sample
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, SensorError::InvalidMeasurement(_))
    }
}

/// One raw sample from the vision collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisionMeasurement {
    /// Horizontal position in camera-frame fraction, expected in [0, 1]
    pub position: f32,
    /// How many pixels/samples qualified for the estimate
    pub qualifying_samples: u32,
}

impl VisionMeasurement {
    pub fn new(position: f32, qualifying_samples: u32) -> Self {
        Self {
            position,
            qualifying_samples,
        }
    }

    /// Reject non-finite positions and clamp everything else into [0, 1]
    pub fn validated(self) -> Result<Self, SensorError> {
        if !self.position.is_finite() {
            return Err(SensorError::InvalidMeasurement(self.position));
        }
        Ok(Self {
            position: crate::clamp_unit(self.position),
            ..self
        })
    }
}

/// What the camera produced this frame
pub type SensorSample = Result<VisionMeasurement, SensorError>;

/// Stretch the usable centre of the camera frame over the full [0, 1] range
pub fn remap_edges(z: f32, edge_margin: f32) -> f32 {
    let span = 1.0 - 2.0 * edge_margin;
    if span <= 0.0 {
        return crate::clamp_unit(z);
    }
    crate::clamp_unit((z - edge_margin) / span)
}
