//! Data-driven game balance
//!
//! Theme and difficulty tables are resolved once at session start into plain
//! immutable records. Nothing in the simulation looks a key up at runtime.

use serde::{Deserialize, Serialize};

use crate::input::InputMode;

/// Visual/physics theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Orchard,
    Cosmos,
    Abyss,
    Inferno,
}

impl Theme {
    pub const ALL: [Theme; 4] = [Theme::Orchard, Theme::Cosmos, Theme::Abyss, Theme::Inferno];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Orchard => "orchard",
            Theme::Cosmos => "cosmos",
            Theme::Abyss => "abyss",
            Theme::Inferno => "inferno",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }

    /// Resolve the immutable tuning record for this theme
    pub fn config(&self) -> ThemeConfig {
        let (gravity, good, bad): (f32, &[&str], &[&str]) = match self {
            Theme::Orchard => (1.0, &["apple", "pear", "cherry", "plum"], &["rock", "beehive"]),
            Theme::Cosmos => (0.75, &["star", "comet", "crystal"], &["meteor", "debris"]),
            Theme::Abyss => (0.6, &["pearl", "shell", "starfish"], &["urchin", "jellyfish"]),
            Theme::Inferno => (
                1.25,
                &["ember", "ruby", "phoenix-feather"],
                &["lava-bomb", "skull"],
            ),
        };
        ThemeConfig {
            id: *self,
            gravity_multiplier: gravity,
            good_variants: good.iter().map(|s| s.to_string()).collect(),
            bad_variants: bad.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Theme tuning, read-only for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub id: Theme,
    /// Scales every object's fall speed
    pub gravity_multiplier: f32,
    /// Visual variants for beneficial objects (never empty)
    pub good_variants: Vec<String>,
    /// Visual variants for hazards (never empty)
    pub bad_variants: Vec<String>,
}

/// Difficulty tier selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl DifficultyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyTier::Easy => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(DifficultyTier::Easy),
            "medium" | "med" | "normal" => Some(DifficultyTier::Medium),
            "hard" => Some(DifficultyTier::Hard),
            _ => None,
        }
    }

    /// Resolve the immutable tuning record for this tier
    pub fn config(&self) -> DifficultyConfig {
        match self {
            DifficultyTier::Easy => DifficultyConfig {
                initial_lives: 7,
                hazard_penalty: 1,
                points_per_catch: 8,
                spawn_base_ms: 1200.0,
                spawn_decay_per_point: 3.0,
                spawn_floor_ms: 300.0,
                score_divisor: 600.0,
                time_divisor_secs: 150.0,
            },
            DifficultyTier::Medium => DifficultyConfig {
                initial_lives: 5,
                hazard_penalty: 1,
                points_per_catch: 10,
                spawn_base_ms: 1000.0,
                spawn_decay_per_point: 4.0,
                spawn_floor_ms: 200.0,
                score_divisor: 500.0,
                time_divisor_secs: 120.0,
            },
            DifficultyTier::Hard => DifficultyConfig {
                initial_lives: 4,
                hazard_penalty: 2,
                points_per_catch: 12,
                spawn_base_ms: 800.0,
                spawn_decay_per_point: 5.0,
                spawn_floor_ms: 180.0,
                score_divisor: 400.0,
                time_divisor_secs: 90.0,
            },
        }
    }
}

/// Difficulty tuning, read-only for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub initial_lives: u32,
    /// Lives lost per hazard hit
    pub hazard_penalty: u32,
    /// Base points for a catch, before combo bonus
    pub points_per_catch: u64,
    pub spawn_base_ms: f32,
    /// Spawn interval shrinks by this many ms per point of score
    pub spawn_decay_per_point: f32,
    /// Spawn interval never drops below this
    pub spawn_floor_ms: f32,
    /// Score needed to add 1.0 to the difficulty multiplier
    pub score_divisor: f32,
    /// Seconds needed to add 1.0 to the difficulty multiplier
    pub time_divisor_secs: f32,
}

/// Named estimator presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimatorProfile {
    #[default]
    Standard,
    Smooth,
    Responsive,
}

impl EstimatorProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            EstimatorProfile::Standard => "standard",
            EstimatorProfile::Smooth => "smooth",
            EstimatorProfile::Responsive => "responsive",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "standard" | "default" => Some(EstimatorProfile::Standard),
            "smooth" => Some(EstimatorProfile::Smooth),
            "responsive" | "fast" => Some(EstimatorProfile::Responsive),
            _ => None,
        }
    }

    pub fn tuning(&self) -> EstimatorTuning {
        let (q, r) = match self {
            EstimatorProfile::Standard => (0.08, 0.04),
            EstimatorProfile::Smooth => (0.02, 0.08),
            EstimatorProfile::Responsive => (0.2, 0.02),
        };
        EstimatorTuning {
            process_noise: q,
            measurement_noise: r,
            ..EstimatorTuning::default()
        }
    }
}

/// Estimator tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorTuning {
    /// q: variance added per update (responsiveness)
    pub process_noise: f32,
    /// r: measurement variance (smoothness)
    pub measurement_noise: f32,
    pub initial_estimate: f32,
    pub initial_variance: f32,
    /// Fraction of the camera frame ignored on each side
    pub edge_margin: f32,
    /// Qualifying samples required before a measurement counts as a detection
    pub min_qualifying_samples: u32,
}

impl Default for EstimatorTuning {
    fn default() -> Self {
        Self {
            process_noise: 0.08,
            measurement_noise: 0.04,
            initial_estimate: 0.5,
            initial_variance: 1.0,
            edge_margin: 0.1,
            min_qualifying_samples: 30,
        }
    }
}

/// Everything a session needs, resolved once at start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub theme: ThemeConfig,
    pub difficulty: DifficultyConfig,
    pub input_mode: InputMode,
    pub estimator: EstimatorTuning,
}

impl SessionConfig {
    pub fn new(theme: Theme, tier: DifficultyTier, input_mode: InputMode) -> Self {
        Self {
            theme: theme.config(),
            difficulty: tier.config(),
            input_mode,
            estimator: EstimatorTuning::default(),
        }
    }

    pub fn with_estimator(mut self, estimator: EstimatorTuning) -> Self {
        self.estimator = estimator;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(Theme::default(), DifficultyTier::default(), InputMode::default())
    }
}
