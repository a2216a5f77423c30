//! Catchfall - a falling-object catch arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, scoring, difficulty)
//! - `input`: Paddle position estimation from pointer or noisy camera measurements
//! - `engine`: Frame-driven loop driver (pause, snapshots, termination)
//! - `tuning`: Data-driven theme/difficulty/estimator balance
//! - `settings`: Persisted session selections

pub mod autopilot;
pub mod engine;
pub mod input;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use engine::{ControlInput, Engine, FrameReport, GamePhase};
pub use input::{InputEstimator, InputMode};
pub use settings::Settings;
pub use tuning::{DifficultyConfig, DifficultyTier, SessionConfig, Theme, ThemeConfig};

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults - anchored near the bottom of the playfield
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_HEIGHT: f32 = 24.0;
    pub const PADDLE_TOP: f32 = PLAYFIELD_HEIGHT - 60.0;

    /// Falling object defaults
    pub const OBJECT_RADIUS: f32 = 18.0;
    /// Spawn height, above the visible top
    pub const SPAWN_Y: f32 = -40.0;
    /// Horizontal spawn margin on each side
    pub const SPAWN_MARGIN: f32 = 40.0;
    /// Fall speed range (pixels per step unit)
    pub const SPEED_MIN: f32 = 2.0;
    pub const SPEED_MAX: f32 = 4.5;
    /// Chance that a spawned object is a hazard
    pub const HAZARD_PROBABILITY: f64 = 0.22;

    /// Reference frame length (60 Hz) used to normalize motion
    pub const REFERENCE_FRAME_MS: f32 = 16.67;
    /// Longest delta a single tick may apply to motion
    pub const MAX_FRAME_MS: f32 = 32.0;

    /// Combo bonus grows by one point every this many consecutive catches
    pub const COMBO_DIVISOR: u32 = 3;

    /// Snapshot cadence for display collaborators (~10 Hz)
    pub const SNAPSHOT_INTERVAL_MS: f64 = 100.0;
}

/// Clamp to the unit interval
#[inline]
pub fn clamp_unit(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

/// Convert a normalized horizontal position to playfield pixels
#[inline]
pub fn fraction_to_playfield_x(fraction: f32) -> f32 {
    clamp_unit(fraction) * consts::PLAYFIELD_WIDTH
}

/// Convert a playfield x coordinate to a normalized position
#[inline]
pub fn playfield_x_to_fraction(x: f32) -> f32 {
    clamp_unit(x / consts::PLAYFIELD_WIDTH)
}
