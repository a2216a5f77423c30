//! Paddle control estimation
//!
//! Two input modes, chosen once per session:
//! - `Pointer`: the pointer's fraction across the play container is used
//!   as-is, no smoothing, always detected
//! - `Vision`: a noisy camera measurement is gated on its sample count,
//!   remapped to compensate for framing, then smoothed by a scalar filter
//!
//! Missing or bad measurements never move the estimate; the paddle simply
//! holds its last position.

pub mod kalman;
pub mod sensor;

use serde::{Deserialize, Serialize};

pub use kalman::ScalarKalman;
pub use sensor::{SensorError, SensorSample, VisionMeasurement, remap_edges};

use crate::clamp_unit;
use crate::tuning::EstimatorTuning;

/// Where paddle control comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputMode {
    #[default]
    Pointer,
    Vision,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Pointer => "pointer",
            InputMode::Vision => "vision",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pointer" | "mouse" | "touch" => Some(InputMode::Pointer),
            "vision" | "camera" => Some(InputMode::Vision),
            _ => None,
        }
    }
}

/// Value read once per tick by the collision pass and any paddle renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorReading {
    /// Smoothed horizontal position in [0, 1]
    pub position: f32,
    /// Whether the latest input produced a usable detection
    pub detected: bool,
}

/// Session-long estimator state
#[derive(Debug, Clone)]
pub struct InputEstimator {
    mode: InputMode,
    tuning: EstimatorTuning,
    filter: ScalarKalman,
    position: f32,
    detected: bool,
    /// Last reported camera failure, kept so we only log transitions
    sensor_fault: Option<SensorError>,
    /// Consecutive rejected samples, warned about once per run
    rejected_run: u32,
}

impl InputEstimator {
    pub fn new(mode: InputMode, tuning: EstimatorTuning) -> Self {
        let filter = ScalarKalman::from_tuning(&tuning);
        Self {
            mode,
            tuning,
            filter,
            position: clamp_unit(filter.estimate()),
            detected: mode == InputMode::Pointer,
            sensor_fault: None,
            rejected_run: 0,
        }
    }

    pub fn mode(&self) -> InputMode {
        self.mode
    }

    pub fn tuning(&self) -> &EstimatorTuning {
        &self.tuning
    }

    pub fn reading(&self) -> EstimatorReading {
        EstimatorReading {
            position: self.position,
            detected: self.detected,
        }
    }

    pub fn position(&self) -> f32 {
        self.position
    }

    pub fn detected(&self) -> bool {
        self.detected
    }

    /// Filter variance (only meaningful in vision mode)
    pub fn variance(&self) -> f32 {
        self.filter.variance()
    }

    /// Invalid camera samples received since the last valid one
    pub fn rejected_run(&self) -> u32 {
        self.rejected_run
    }

    /// Camera failure currently in effect, if any
    pub fn sensor_fault(&self) -> Option<SensorError> {
        self.sensor_fault
    }

    /// Direct mode: map the pointer's x within its container straight to [0, 1]
    pub fn observe_pointer(
        &mut self,
        pointer_x: f32,
        container_left: f32,
        container_width: f32,
    ) -> EstimatorReading {
        if self.mode != InputMode::Pointer {
            log::debug!("Ignoring pointer input in {} mode", self.mode.as_str());
            return self.reading();
        }
        let usable = pointer_x.is_finite()
            && container_left.is_finite()
            && container_width.is_finite()
            && container_width > 0.0;
        if !usable {
            log::debug!(
                "Ignoring pointer input x={pointer_x} left={container_left} width={container_width}"
            );
            return self.reading();
        }

        self.position = clamp_unit((pointer_x - container_left) / container_width);
        self.detected = true;
        self.reading()
    }

    /// Filtered mode: consume whatever the camera has right now
    pub fn observe_vision(&mut self, sample: SensorSample) -> EstimatorReading {
        if self.mode != InputMode::Vision {
            log::debug!("Ignoring camera input in {} mode", self.mode.as_str());
            return self.reading();
        }

        match sample.and_then(VisionMeasurement::validated) {
            Err(err) if err.is_unavailable() => {
                if self.sensor_fault != Some(err) {
                    log::warn!("Camera unavailable ({err}), holding paddle at {:.3}", self.position);
                    self.sensor_fault = Some(err);
                }
                self.detected = false;
            }
            Err(err) => {
                if self.rejected_run == 0 {
                    log::warn!("Rejecting camera samples: {err}");
                } else {
                    log::debug!("Rejected camera sample: {err}");
                }
                self.rejected_run = self.rejected_run.saturating_add(1);
                self.detected = false;
            }
            Ok(measurement) => {
                if let Some(prev) = self.sensor_fault.take() {
                    log::info!("Camera feed restored after: {prev}");
                }
                if self.rejected_run > 0 {
                    log::info!("Camera samples valid again after {} rejected", self.rejected_run);
                    self.rejected_run = 0;
                }
                if measurement.qualifying_samples < self.tuning.min_qualifying_samples {
                    // Not detected: hold, no predict-only step
                    self.detected = false;
                } else {
                    let z = remap_edges(measurement.position, self.tuning.edge_margin);
                    self.position = clamp_unit(self.filter.update(z));
                    self.detected = true;
                }
            }
        }
        self.reading()
    }
}
