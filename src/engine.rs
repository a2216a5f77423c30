//! Frame-driven loop driver
//!
//! The host calls [`Engine::frame`] once per display frame with its
//! timestamp. The engine owns the only mutable simulation record and runs
//! the whole tick pipeline synchronously inside that call.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::SNAPSHOT_INTERVAL_MS;
use crate::input::{EstimatorReading, InputEstimator, SensorSample};
use crate::sim::{EngineState, GameEvent, PaddleRect, Snapshot, TickReport, tick};
use crate::tuning::SessionConfig;

/// Loop driver phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ticking every frame
    Running,
    /// Frames arrive but nothing mutates
    Paused,
    /// Lives ran out; terminal
    GameOver,
    /// Stopped from outside; terminal
    Shutdown,
}

/// Raw control signal for one frame
#[derive(Debug, Clone, PartialEq)]
pub enum ControlInput {
    /// Nothing new arrived; keep the current estimate
    Hold,
    /// Pointer position and the container it is measured against
    Pointer {
        x: f32,
        container_left: f32,
        container_width: f32,
    },
    /// Whatever the camera collaborator currently has
    Vision(SensorSample),
}

/// Everything a frame hands to outside collaborators, by value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    /// Present at ~10 Hz of simulated time and on the terminal frame
    pub snapshot: Option<Snapshot>,
    /// Whether the host should schedule another frame
    pub keep_running: bool,
    /// Whether the simulation advanced this frame
    pub tick: Option<TickReport>,
}

impl FrameReport {
    fn idle(keep_running: bool) -> Self {
        Self {
            keep_running,
            ..Default::default()
        }
    }

    /// Final score if this frame ended the run
    pub fn final_score(&self) -> Option<u64> {
        self.events.iter().find_map(|e| match e {
            GameEvent::GameOver { final_score } => Some(*final_score),
            _ => None,
        })
    }
}

/// One play session
pub struct Engine<R: Rng = Pcg32> {
    config: SessionConfig,
    state: EngineState,
    estimator: InputEstimator,
    rng: R,
    phase: GamePhase,
    /// Timestamp of the previous ticked frame; `None` until re-anchored
    last_frame_ms: Option<f64>,
    snapshot_accum_ms: f64,
}

impl Engine<Pcg32> {
    /// Start a session with a generator seeded from `seed`
    pub fn new(config: SessionConfig, seed: u64) -> Self {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }

    /// Throw the current run away and start over with a new seed
    pub fn restart(&mut self, seed: u64) {
        self.rng = Pcg32::seed_from_u64(seed);
        self.reset(seed);
    }
}

impl<R: Rng> Engine<R> {
    /// Start a session driven by a caller-supplied generator
    pub fn with_rng(config: SessionConfig, seed: u64, rng: R) -> Self {
        let state = EngineState::new(seed, &config.difficulty);
        let estimator = InputEstimator::new(config.input_mode, config.estimator);
        log::info!(
            "Session start: theme={} mode={} lives={} seed={}",
            config.theme.id.as_str(),
            config.input_mode.as_str(),
            state.lives,
            seed
        );
        Self {
            config,
            state,
            estimator,
            rng,
            phase: GamePhase::Running,
            last_frame_ms: None,
            snapshot_accum_ms: 0.0,
        }
    }

    /// Restart with a caller-supplied generator
    pub fn restart_with_rng(&mut self, seed: u64, rng: R) {
        self.rng = rng;
        self.reset(seed);
    }

    fn reset(&mut self, seed: u64) {
        self.state = EngineState::new(seed, &self.config.difficulty);
        self.estimator = InputEstimator::new(self.config.input_mode, self.config.estimator);
        self.phase = GamePhase::Running;
        self.last_frame_ms = None;
        self.snapshot_accum_ms = 0.0;
        log::info!("Session restart: seed={seed}");
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn estimator(&self) -> &InputEstimator {
        &self.estimator
    }

    /// Current paddle estimate, for renderers
    pub fn reading(&self) -> EstimatorReading {
        self.estimator.reading()
    }

    /// Paddle rectangle for the current estimate
    pub fn paddle(&self) -> PaddleRect {
        PaddleRect::from_fraction(self.estimator.position())
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Whether the host should keep scheduling frames
    pub fn is_live(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Running {
            self.phase = GamePhase::Paused;
            log::info!("Paused at {:.2}s", self.state.elapsed_seconds());
        }
    }

    /// Resume; the next frame only re-anchors time so the pause is not counted
    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Running;
            self.last_frame_ms = None;
            log::info!("Resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => {}
        }
    }

    /// Stop scheduling without a terminal report
    pub fn shutdown(&mut self) {
        if self.is_live() {
            self.phase = GamePhase::Shutdown;
            log::info!("Shutdown at {:.2}s, score {}", self.state.elapsed_seconds(), self.state.score);
        }
    }

    fn apply_input(&mut self, input: ControlInput) {
        match input {
            ControlInput::Hold => {}
            ControlInput::Pointer {
                x,
                container_left,
                container_width,
            } => {
                self.estimator.observe_pointer(x, container_left, container_width);
            }
            ControlInput::Vision(sample) => {
                self.estimator.observe_vision(sample);
            }
        }
    }

    /// Per-frame callback
    pub fn frame(&mut self, now_ms: f64, input: ControlInput) -> FrameReport {
        match self.phase {
            GamePhase::GameOver | GamePhase::Shutdown => return FrameReport::idle(false),
            GamePhase::Paused => return FrameReport::idle(true),
            GamePhase::Running => {}
        }

        let Some(last) = self.last_frame_ms.replace(now_ms) else {
            return FrameReport::idle(true);
        };
        let dt_ms = now_ms - last;
        let dt_ms = if dt_ms.is_finite() && dt_ms > 0.0 { dt_ms } else { 0.0 };

        self.apply_input(input);

        let mut events = Vec::new();
        let report = tick(
            &mut self.state,
            &self.config,
            self.estimator.position(),
            dt_ms as f32,
            &mut self.rng,
            &mut events,
        );

        let mut snapshot = None;
        self.snapshot_accum_ms += dt_ms;
        if self.snapshot_accum_ms >= SNAPSHOT_INTERVAL_MS {
            self.snapshot_accum_ms -= SNAPSHOT_INTERVAL_MS;
            // A long frame should not queue up a backlog
            if self.snapshot_accum_ms >= SNAPSHOT_INTERVAL_MS {
                self.snapshot_accum_ms = 0.0;
            }
            snapshot = Some(self.state.snapshot());
        }

        if self.state.is_out_of_lives() {
            let final_score = self.state.score;
            self.phase = GamePhase::GameOver;
            log::info!(
                "Game over: score {} after {:.1}s",
                final_score,
                self.state.elapsed_seconds()
            );
            events.push(GameEvent::GameOver { final_score });
            return FrameReport {
                events,
                snapshot: Some(self.state.snapshot()),
                keep_running: false,
                tick: Some(report),
            };
        }

        FrameReport {
            events,
            snapshot,
            keep_running: true,
            tick: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::input::{InputMode, SensorError, VisionMeasurement};
    use crate::sim::{Category, GameObject};
    use crate::tuning::{DifficultyTier, Theme};
    use glam::Vec2;

    const FRAME_MS: f64 = 16.0;

    fn pointer_center() -> ControlInput {
        ControlInput::Pointer {
            x: 400.0,
            container_left: 0.0,
            container_width: PLAYFIELD_WIDTH,
        }
    }

    fn drop_on_paddle(engine: &mut Engine, id: u32, category: Category) {
        engine.state.objects.push(GameObject {
            id: 10_000 + id,
            pos: Vec2::new(400.0, PADDLE_TOP + 2.0),
            prev_y: PADDLE_TOP + 2.0,
            radius: OBJECT_RADIUS,
            speed: 2.0,
            category,
            variant: "test".into(),
        });
    }

    fn medium_pointer() -> Engine {
        Engine::new(
            SessionConfig::new(Theme::Orchard, DifficultyTier::Medium, InputMode::Pointer),
            42,
        )
    }

    #[test]
    fn test_first_frame_only_anchors() {
        let mut engine = medium_pointer();
        let report = engine.frame(5_000.0, pointer_center());
        assert!(report.keep_running);
        assert!(report.tick.is_none());
        assert_eq!(engine.state().elapsed_ms, 0.0);

        let report = engine.frame(5_016.0, pointer_center());
        assert!(report.tick.is_some());
        assert!((engine.state().elapsed_ms - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_five_hazards_end_the_game_once() {
        let mut engine = medium_pointer();
        let mut now = 0.0;
        engine.frame(now, pointer_center());

        // Build up some score first
        for i in 0..2 {
            drop_on_paddle(&mut engine, i, Category::Good);
            now += FRAME_MS;
            engine.frame(now, pointer_center());
        }
        let score_before_hazards = engine.state().score;
        assert_eq!(score_before_hazards, 20);

        let mut game_overs = Vec::new();
        for i in 0..5 {
            assert!(engine.is_live());
            drop_on_paddle(&mut engine, 100 + i, Category::Bad);
            now += FRAME_MS;
            let report = engine.frame(now, pointer_center());
            assert_eq!(engine.state().lives, 4 - i as i32);
            if let Some(score) = report.final_score() {
                game_overs.push(score);
                assert!(!report.keep_running);
                assert_eq!(report.snapshot.map(|s| s.lives), Some(0));
            }
        }

        assert_eq!(game_overs, vec![score_before_hazards]);
        assert_eq!(engine.phase(), GamePhase::GameOver);

        // Terminal: nothing more happens
        for _ in 0..10 {
            now += FRAME_MS;
            let report = engine.frame(now, pointer_center());
            assert!(!report.keep_running);
            assert!(report.events.is_empty());
        }
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut engine = medium_pointer();
        let mut now = 0.0;
        for _ in 0..200 {
            engine.frame(now, pointer_center());
            now += FRAME_MS;
        }
        assert!(!engine.state().objects.is_empty());

        engine.pause();
        let frozen = engine.state().clone();
        for _ in 0..500 {
            let report = engine.frame(now, pointer_center());
            assert!(report.keep_running);
            assert!(report.tick.is_none());
            now += FRAME_MS;
        }
        let after = engine.state();
        assert_eq!(after.spawn_timer_ms, frozen.spawn_timer_ms);
        assert_eq!(after.elapsed_ms, frozen.elapsed_ms);
        assert_eq!(after.objects, frozen.objects);
        assert_eq!(after.score, frozen.score);
        assert_eq!(after.lives, frozen.lives);
        assert_eq!(after.combo, frozen.combo);

        // Long gap, then resume: no catch-up delta
        now += 60_000.0;
        engine.resume();
        let report = engine.frame(now, pointer_center());
        assert!(report.tick.is_none());
        now += FRAME_MS;
        engine.frame(now, pointer_center());
        assert!((engine.state().elapsed_ms - frozen.elapsed_ms - FRAME_MS).abs() < 1e-6);
    }

    #[test]
    fn test_toggle_pause_and_shutdown() {
        let mut engine = medium_pointer();
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Paused);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Running);

        engine.shutdown();
        assert_eq!(engine.phase(), GamePhase::Shutdown);
        assert!(!engine.is_live());
        let report = engine.frame(0.0, ControlInput::Hold);
        assert!(!report.keep_running);
        assert!(report.final_score().is_none());

        // Terminal phases ignore pause toggles
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Shutdown);
    }

    #[test]
    fn test_snapshot_cadence() {
        let mut engine = medium_pointer();
        let mut now = 0.0;
        let mut snapshots = 0;
        engine.frame(now, ControlInput::Hold);
        // 1 second of 16 ms frames
        for _ in 0..62 {
            now += FRAME_MS;
            if engine.frame(now, ControlInput::Hold).snapshot.is_some() {
                snapshots += 1;
            }
        }
        assert!((9..=10).contains(&snapshots), "snapshots = {snapshots}");
    }

    #[test]
    fn test_restart_resets_state() {
        let mut engine = medium_pointer();
        let mut now = 0.0;
        for _ in 0..300 {
            engine.frame(now, pointer_center());
            now += FRAME_MS;
        }
        engine.shutdown();
        engine.restart(7);
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.state().score, 0);
        assert_eq!(engine.state().lives, 5);
        assert_eq!(engine.state().elapsed_ms, 0.0);
        assert!(engine.state().objects.is_empty());
        assert_eq!(engine.state().rng_state.seed, 7);
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = SessionConfig::new(Theme::Cosmos, DifficultyTier::Hard, InputMode::Pointer);
        let mut a = Engine::new(config.clone(), 1234);
        let mut b = Engine::new(config, 1234);
        let mut now = 0.0;
        for i in 0..1000 {
            let input = ControlInput::Pointer {
                x: (i % 800) as f32,
                container_left: 0.0,
                container_width: PLAYFIELD_WIDTH,
            };
            let ra = a.frame(now, input.clone());
            let rb = b.frame(now, input);
            assert_eq!(ra, rb);
            now += FRAME_MS;
        }
        assert_eq!(a.state().objects, b.state().objects);
    }

    #[test]
    fn test_camera_loss_freezes_paddle_but_game_continues() {
        let config = SessionConfig::new(Theme::Abyss, DifficultyTier::Easy, InputMode::Vision);
        let mut engine = Engine::new(config, 9);
        let mut now = 0.0;
        for _ in 0..30 {
            engine.frame(now, ControlInput::Vision(Ok(VisionMeasurement::new(0.8, 200))));
            now += FRAME_MS;
        }
        let held = engine.reading().position;
        assert!(engine.reading().detected);

        let elapsed = engine.state().elapsed_ms;
        for _ in 0..120 {
            let report =
                engine.frame(now, ControlInput::Vision(Err(SensorError::NoDevice)));
            assert!(report.tick.is_some());
            now += FRAME_MS;
        }
        assert_eq!(engine.reading().position, held);
        assert!(!engine.reading().detected);
        assert!(engine.state().elapsed_ms > elapsed);
        assert_eq!(engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_paddle_follows_pointer() {
        let mut engine = medium_pointer();
        engine.frame(0.0, ControlInput::Hold);
        engine.frame(
            16.0,
            ControlInput::Pointer {
                x: 250.0,
                container_left: 50.0,
                container_width: 400.0,
            },
        );
        assert!((engine.reading().position - 0.5).abs() < 1e-6);
        assert_eq!(engine.paddle().center_x(), 400.0);
    }
}
