//! Session selections and preferences
//!
//! Persisted as JSON next to the binary (or wherever `--settings` points).
//! Resolved once into an immutable [`SessionConfig`] when a session starts.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::InputMode;
use crate::tuning::{DifficultyTier, EstimatorProfile, EstimatorTuning, SessionConfig, Theme};

/// Cosmetic player avatar (no effect on the simulation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Avatar {
    #[default]
    Basket,
    Bucket,
    Net,
    Mitt,
}

impl Avatar {
    pub fn as_str(&self) -> &'static str {
        match self {
            Avatar::Basket => "basket",
            Avatar::Bucket => "bucket",
            Avatar::Net => "net",
            Avatar::Mitt => "mitt",
        }
    }
}

/// Settings file errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read or write settings at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid estimator tuning: {0}")]
    InvalidTuning(String),
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub theme: Theme,
    pub difficulty: DifficultyTier,
    pub input_mode: InputMode,
    pub avatar: Avatar,
    /// Named estimator preset
    pub estimator_profile: EstimatorProfile,
    /// Full override of the preset, for experimenting with alternate filters
    pub estimator_override: Option<EstimatorTuning>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Orchard,
            difficulty: DifficultyTier::Medium,
            input_mode: InputMode::Pointer,
            avatar: Avatar::Basket,
            estimator_profile: EstimatorProfile::Standard,
            estimator_override: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.estimator_tuning()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load, falling back to defaults (and reporting why) when that fails
    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<ConfigError>) {
        match Self::load(&path) {
            Ok(settings) => (settings, None),
            Err(err) => {
                log::info!("Using default settings");
                (Self::default(), Some(err))
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Effective estimator tuning (override wins over the preset)
    pub fn estimator_tuning(&self) -> Result<EstimatorTuning, ConfigError> {
        let tuning = self
            .estimator_override
            .unwrap_or_else(|| self.estimator_profile.tuning());
        validate_tuning(&tuning)?;
        Ok(tuning)
    }

    /// Resolve into the immutable per-session configuration
    pub fn resolve(&self) -> Result<SessionConfig, ConfigError> {
        let estimator = self.estimator_tuning()?;
        log::debug!(
            "Resolved session: theme={} difficulty={} input={} avatar={}",
            self.theme.as_str(),
            self.difficulty.as_str(),
            self.input_mode.as_str(),
            self.avatar.as_str()
        );
        Ok(SessionConfig::new(self.theme, self.difficulty, self.input_mode).with_estimator(estimator))
    }
}

fn validate_tuning(t: &EstimatorTuning) -> Result<(), ConfigError> {
    let finite = [
        t.process_noise,
        t.measurement_noise,
        t.initial_estimate,
        t.initial_variance,
        t.edge_margin,
    ]
    .iter()
    .all(|v| v.is_finite());
    if !finite {
        return Err(ConfigError::InvalidTuning("non-finite value".into()));
    }
    if t.process_noise <= 0.0 || t.measurement_noise <= 0.0 {
        return Err(ConfigError::InvalidTuning(
            "process and measurement noise must be positive".into(),
        ));
    }
    if t.initial_variance < 0.0 {
        return Err(ConfigError::InvalidTuning("initial variance must be >= 0".into()));
    }
    if !(0.0..=1.0).contains(&t.initial_estimate) {
        return Err(ConfigError::InvalidTuning("initial estimate must be in [0, 1]".into()));
    }
    if !(0.0..0.5).contains(&t.edge_margin) {
        return Err(ConfigError::InvalidTuning("edge margin must be in [0, 0.5)".into()));
    }
    Ok(())
}
