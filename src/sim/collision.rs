//! Paddle interception
//!
//! The paddle is an axis-aligned rectangle derived every tick from the input
//! estimate. An object is caught when its centre lies inside the rectangle,
//! using half-open bounds on both axes: `min <= p < max`. Vertically the test
//! covers the whole path the centre swept during the last motion step, so a
//! fast object cannot skip over the paddle between two ticks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Category, EngineState, GameEvent, GameObject};
use crate::consts::*;
use crate::fraction_to_playfield_x;
use crate::tuning::{DifficultyConfig, ThemeConfig};

/// Paddle rectangle in playfield pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl PaddleRect {
    /// Paddle centred at a normalized horizontal position
    pub fn from_fraction(fraction: f32) -> Self {
        let center_x = fraction_to_playfield_x(fraction);
        Self::centered_at(center_x)
    }

    pub fn centered_at(center_x: f32) -> Self {
        Self {
            min: Vec2::new(center_x - PADDLE_WIDTH / 2.0, PADDLE_TOP),
            max: Vec2::new(center_x + PADDLE_WIDTH / 2.0, PADDLE_TOP + PADDLE_HEIGHT),
        }
    }

    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) * 0.5
    }

    /// Inclusive at `min`, exclusive at `max`, on both axes
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// Whether the centre's vertical path `from_y..=to.y` meets the rectangle
    ///
    /// Objects only fall, so `from_y <= to.y`. With `from_y == to.y` this is
    /// exactly `contains(to)`.
    #[inline]
    pub fn intercepts(&self, from_y: f32, to: Vec2) -> bool {
        to.x >= self.min.x && to.x < self.max.x && from_y < self.max.y && to.y >= self.min.y
    }
}

/// What a collision pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionSummary {
    pub collected: u32,
    pub hazards_hit: u32,
}

/// Points for the next catch at the current combo
#[inline]
pub fn catch_points(combo: u32, cfg: &DifficultyConfig) -> u64 {
    cfg.points_per_catch + (combo / COMBO_DIVISOR) as u64
}

/// Remove every object the paddle intercepts and apply its effect
pub fn resolve_collisions(
    state: &mut EngineState,
    paddle: &PaddleRect,
    theme: &ThemeConfig,
    cfg: &DifficultyConfig,
    events: &mut Vec<GameEvent>,
) -> CollisionSummary {
    let mut summary = CollisionSummary::default();
    let objects = std::mem::take(&mut state.objects);
    let mut kept: Vec<GameObject> = Vec::with_capacity(objects.len());

    for object in objects {
        if !paddle.intercepts(object.prev_y, object.pos) {
            kept.push(object);
            continue;
        }

        match object.category {
            Category::Good => {
                state.score += catch_points(state.combo, cfg);
                state.combo += 1;
                summary.collected += 1;
                log::debug!("Caught '{}' (combo {})", object.variant, state.combo);
                events.push(GameEvent::ObjectCollected {
                    theme: theme.id,
                    variant: object.variant,
                });
            }
            Category::Bad => {
                state.lives -= cfg.hazard_penalty as i32;
                state.combo = 0;
                summary.hazards_hit += 1;
                log::debug!("Hit hazard '{}', lives {}", object.variant, state.lives);
                events.push(GameEvent::HazardHit {
                    theme: theme.id,
                    variant: object.variant,
                });
            }
        }
    }

    state.objects = kept;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{DifficultyTier, Theme};

    fn object(id: u32, pos: Vec2, category: Category) -> GameObject {
        GameObject {
            id,
            pos,
            prev_y: pos.y,
            radius: OBJECT_RADIUS,
            speed: 3.0,
            category,
            variant: "x".into(),
        }
    }

    #[test]
    fn test_paddle_from_fraction() {
        let paddle = PaddleRect::from_fraction(0.5);
        assert_eq!(paddle.center_x(), PLAYFIELD_WIDTH / 2.0);
        assert_eq!(paddle.max.x - paddle.min.x, PADDLE_WIDTH);
        assert_eq!(paddle.min.y, PADDLE_TOP);
        assert_eq!(paddle.max.y, PADDLE_TOP + PADDLE_HEIGHT);
    }

    #[test]
    fn test_boundary_convention_both_axes() {
        let paddle = PaddleRect::centered_at(400.0);
        let mid_y = PADDLE_TOP + PADDLE_HEIGHT / 2.0;

        // min edges are inside
        assert!(paddle.contains(Vec2::new(paddle.min.x, mid_y)));
        assert!(paddle.contains(Vec2::new(400.0, paddle.min.y)));
        assert!(paddle.contains(paddle.min));

        // max edges are outside
        assert!(!paddle.contains(Vec2::new(paddle.max.x, mid_y)));
        assert!(!paddle.contains(Vec2::new(400.0, paddle.max.y)));
        assert!(!paddle.contains(paddle.max));

        // just outside min
        assert!(!paddle.contains(Vec2::new(paddle.min.x - 0.01, mid_y)));
        assert!(!paddle.contains(Vec2::new(400.0, paddle.min.y - 0.01)));
    }

    #[test]
    fn test_swept_path_through_paddle() {
        let paddle = PaddleRect::centered_at(400.0);

        // Jumped from above the paddle to below it
        assert!(paddle.intercepts(PADDLE_TOP - 1.0, Vec2::new(400.0, PADDLE_TOP + PADDLE_HEIGHT + 9.0)));
        // Ended exactly on the top edge
        assert!(paddle.intercepts(PADDLE_TOP - 30.0, Vec2::new(400.0, PADDLE_TOP)));
        // Still above the paddle
        assert!(!paddle.intercepts(PADDLE_TOP - 30.0, Vec2::new(400.0, PADDLE_TOP - 0.01)));
        // Already past the bottom edge before moving
        assert!(!paddle.intercepts(paddle.max.y, Vec2::new(400.0, paddle.max.y + 20.0)));
        // Right edge stays exclusive
        assert!(!paddle.intercepts(PADDLE_TOP - 1.0, Vec2::new(paddle.max.x, PADDLE_TOP + 40.0)));

        // A stationary path is the point test
        for y in [PADDLE_TOP - 1.0, PADDLE_TOP, PADDLE_TOP + 5.0, paddle.max.y] {
            let p = Vec2::new(400.0, y);
            assert_eq!(paddle.intercepts(y, p), paddle.contains(p));
        }
    }

    #[test]
    fn test_good_hit_scores_with_combo_bonus() {
        let cfg = DifficultyTier::Medium.config();
        let theme = Theme::Orchard.config();
        let mut state = EngineState::new(1, &cfg);
        let paddle = PaddleRect::centered_at(400.0);
        let mut events = Vec::new();

        let mut expected = 0;
        for i in 0..7u32 {
            expected += cfg.points_per_catch + (i / COMBO_DIVISOR) as u64;
            state
                .objects
                .push(object(i, Vec2::new(400.0, PADDLE_TOP + 1.0), Category::Good));
            resolve_collisions(&mut state, &paddle, &theme, &cfg, &mut events);
        }
        assert_eq!(state.combo, 7);
        assert_eq!(state.score, expected);
        // 7 catches: 10*7 + (0+0+0+1+1+1+2)
        assert_eq!(state.score, 75);
        assert_eq!(events.len(), 7);
        assert!(state.objects.is_empty());
    }

    #[test]
    fn test_bad_hit_costs_life_and_resets_combo() {
        let cfg = DifficultyTier::Hard.config();
        let theme = Theme::Inferno.config();
        let mut state = EngineState::new(1, &cfg);
        state.combo = 9;
        let paddle = PaddleRect::centered_at(200.0);
        let mut events = Vec::new();

        state
            .objects
            .push(object(1, Vec2::new(200.0, PADDLE_TOP + 5.0), Category::Bad));
        let summary = resolve_collisions(&mut state, &paddle, &theme, &cfg, &mut events);

        assert_eq!(summary.hazards_hit, 1);
        assert_eq!(state.lives, 4 - 2);
        assert_eq!(state.combo, 0);
        assert_eq!(state.score, 0);
        assert!(matches!(
            events.as_slice(),
            [GameEvent::HazardHit { theme: Theme::Inferno, .. }]
        ));
    }

    #[test]
    fn test_misses_are_kept() {
        let cfg = DifficultyTier::Medium.config();
        let theme = Theme::Orchard.config();
        let mut state = EngineState::new(1, &cfg);
        let paddle = PaddleRect::centered_at(400.0);
        let mut events = Vec::new();

        state.objects.push(object(1, Vec2::new(100.0, PADDLE_TOP + 1.0), Category::Good));
        state.objects.push(object(2, Vec2::new(400.0, 100.0), Category::Bad));
        state.objects.push(object(3, Vec2::new(410.0, PADDLE_TOP + 2.0), Category::Good));

        let summary = resolve_collisions(&mut state, &paddle, &theme, &cfg, &mut events);
        assert_eq!(summary, CollisionSummary { collected: 1, hazards_hit: 0 });
        let ids: Vec<u32> = state.objects.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
