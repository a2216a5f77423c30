//! Engine state and core simulation types
//!
//! Everything the tick mutates lives in `EngineState`. It has one writer:
//! the loop driver's tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::tuning::{DifficultyConfig, Theme};

/// Beneficial or hazardous
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Good,
    Bad,
}

/// A falling object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameObject {
    pub id: u32,
    /// Centre position in playfield pixels
    pub pos: Vec2,
    /// Centre y before the latest motion step
    pub prev_y: f32,
    pub radius: f32,
    /// Pixels per step unit, before gravity and difficulty scaling
    pub speed: f32,
    pub category: Category,
    /// Theme variant tag for renderers
    pub variant: String,
}

impl GameObject {
    pub fn is_hazard(&self) -> bool {
        self.category == Category::Bad
    }
}

/// Discrete outbound events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A beneficial object was caught
    ObjectCollected { theme: Theme, variant: String },
    /// A hazard hit the paddle
    HazardHit { theme: Theme, variant: String },
    /// Lives ran out
    GameOver { final_score: u64 },
}

/// Read-only copy of the display-relevant state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u64,
    pub lives: i32,
    pub combo: u32,
    pub difficulty_multiplier: f32,
    pub elapsed_seconds: f64,
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete mutable simulation record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineState {
    /// Run seed for reproducibility
    pub rng_state: RngState,
    pub score: u64,
    /// Terminal at <= 0
    pub lives: i32,
    /// Consecutive catches since the last hazard hit
    pub combo: u32,
    /// Always >= 1
    pub difficulty_multiplier: f32,
    /// Milliseconds accumulated toward the next spawn
    pub spawn_timer_ms: f32,
    /// Simulated milliseconds (paused time excluded)
    pub elapsed_ms: f64,
    /// Live objects, order irrelevant
    pub objects: Vec<GameObject>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl EngineState {
    /// Fresh state for a session
    pub fn new(seed: u64, difficulty: &DifficultyConfig) -> Self {
        Self {
            rng_state: RngState::new(seed),
            score: 0,
            lives: difficulty.initial_lives as i32,
            combo: 0,
            difficulty_multiplier: 1.0,
            spawn_timer_ms: 0.0,
            elapsed_ms: 0.0,
            objects: Vec::new(),
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_ms / 1000.0
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives <= 0
    }

    /// Copy out the display fields
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.score,
            lives: self.lives,
            combo: self.combo,
            difficulty_multiplier: self.difficulty_multiplier,
            elapsed_seconds: self.elapsed_seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::DifficultyTier;

    #[test]
    fn test_new_state_uses_tier_lives() {
        let state = EngineState::new(7, &DifficultyTier::Hard.config());
        assert_eq!(state.lives, 4);
        assert_eq!(state.score, 0);
        assert_eq!(state.difficulty_multiplier, 1.0);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_entity_ids_unique() {
        let mut state = EngineState::new(7, &DifficultyTier::Medium.config());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut state = EngineState::new(7, &DifficultyTier::Medium.config());
        state.score = 40;
        state.elapsed_ms = 2500.0;
        let snap = state.snapshot();
        state.score = 90;
        assert_eq!(snap.score, 40);
        assert!((snap.elapsed_seconds - 2.5).abs() < 1e-9);
    }
}
