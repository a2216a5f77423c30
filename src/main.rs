//! Headless catchfall session
//!
//! Drives the engine at a fixed frame rate with the autopilot standing in for
//! the player, and the synthetic camera standing in for the webcam when the
//! session uses vision input.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use catchfall::autopilot::{Autopilot, SyntheticCamera, pointer_input};
use catchfall::input::InputMode;
use catchfall::settings::{ConfigError, Settings};
use catchfall::sim::GameEvent;
use catchfall::tuning::{DifficultyTier, EstimatorProfile, Theme};
use catchfall::{ControlInput, Engine};

#[derive(Debug, Parser)]
#[command(name = "catchfall", about = "Run a headless catchfall session with a scripted player")]
struct Args {
    /// Seed for spawning (the camera simulation derives its own from it)
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Settings file (JSON); missing files fall back to defaults
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Write the effective settings back to this file
    #[arg(long, value_name = "PATH")]
    save_settings: Option<PathBuf>,
    /// orchard | cosmos | abyss | inferno
    #[arg(long, value_parser = parse_theme)]
    theme: Option<Theme>,
    /// easy | medium | hard
    #[arg(long, value_parser = parse_difficulty)]
    difficulty: Option<DifficultyTier>,
    /// pointer | vision
    #[arg(long, value_parser = parse_input_mode)]
    input: Option<InputMode>,
    /// standard | smooth | responsive
    #[arg(long, value_parser = parse_profile)]
    profile: Option<EstimatorProfile>,
    /// Stop after this much simulated time
    #[arg(long, value_name = "SECONDS", default_value_t = 120.0)]
    max_seconds: f64,
    /// Simulated display refresh rate
    #[arg(
        long,
        value_name = "HZ",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    fps: u32,
    /// Chance per frame that the camera loses the hand
    #[arg(long, default_value_t = 0.1)]
    dropout: f64,
    /// Half-width of camera measurement noise (fraction of frame)
    #[arg(long, default_value_t = 0.03)]
    noise: f32,
    /// Simulated time at which the camera disconnects
    #[arg(long, value_name = "SECONDS")]
    camera_fails_at: Option<f64>,
}

fn parse_theme(s: &str) -> Result<Theme, String> {
    Theme::from_str(s).ok_or_else(|| format!("unknown theme '{s}'"))
}

fn parse_difficulty(s: &str) -> Result<DifficultyTier, String> {
    DifficultyTier::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
}

fn parse_input_mode(s: &str) -> Result<InputMode, String> {
    InputMode::from_str(s).ok_or_else(|| format!("unknown input mode '{s}'"))
}

fn parse_profile(s: &str) -> Result<EstimatorProfile, String> {
    EstimatorProfile::from_str(s).ok_or_else(|| format!("unknown estimator profile '{s}'"))
}

fn effective_settings(args: &Args) -> Result<Settings, ConfigError> {
    let mut settings = match &args.settings {
        Some(path) => {
            let (settings, err) = Settings::load_or_default(path);
            if let Some(err) = err {
                log::warn!("{err}");
            }
            settings
        }
        None => Settings::default(),
    };
    if let Some(theme) = args.theme {
        settings.theme = theme;
    }
    if let Some(difficulty) = args.difficulty {
        settings.difficulty = difficulty;
    }
    if let Some(input) = args.input {
        settings.input_mode = input;
    }
    if let Some(profile) = args.profile {
        settings.estimator_profile = profile;
    }
    if let Some(path) = &args.save_settings {
        settings.save(path)?;
    }
    Ok(settings)
}

fn run(args: &Args) -> Result<u64, ConfigError> {
    let settings = effective_settings(args)?;
    let config = settings.resolve()?;
    let tuning = config.estimator;
    let mut engine = Engine::new(config, args.seed);

    let mut pilot = Autopilot::new();
    let mut camera = SyntheticCamera::new(
        args.seed.wrapping_add(1),
        args.noise,
        args.dropout,
        tuning.edge_margin,
        tuning.min_qualifying_samples,
    );
    if let Some(secs) = args.camera_fails_at {
        camera = camera.failing_at(secs * 1000.0);
    }

    let frame_ms = 1000.0 / args.fps as f64;
    let limit_ms = args.max_seconds.max(0.0) * 1000.0;
    let mut now = 0.0;
    let mut snapshots = 0u64;

    engine.frame(now, ControlInput::Hold);
    while engine.is_live() && now < limit_ms {
        now += frame_ms;
        let hand = pilot.steer(engine.state(), frame_ms as f32);
        let input = match settings.input_mode {
            InputMode::Pointer => pointer_input(hand),
            InputMode::Vision => ControlInput::Vision(camera.sample(hand, now)),
        };

        let report = engine.frame(now, input);
        for event in &report.events {
            match event {
                GameEvent::ObjectCollected { variant, .. } => log::debug!("+ {variant}"),
                GameEvent::HazardHit { variant, .. } => log::debug!("! {variant}"),
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over with {final_score} points")
                }
            }
        }
        if let Some(snap) = report.snapshot {
            snapshots += 1;
            // Once a second is plenty for a terminal
            if snapshots % 10 == 0 {
                log::info!(
                    "t={:>6.1}s score={:>5} lives={} combo={:>3} difficulty={:.2} paddle={:.3}{}",
                    snap.elapsed_seconds,
                    snap.score,
                    snap.lives,
                    snap.combo,
                    snap.difficulty_multiplier,
                    engine.reading().position,
                    if engine.reading().detected { "" } else { " (lost)" }
                );
            }
        }
        if let Some(score) = report.final_score() {
            return Ok(score);
        }
    }

    engine.shutdown();
    Ok(engine.state().score)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Catchfall (headless) starting...");

    let args = Args::parse();
    match run(&args) {
        Ok(score) => {
            println!("final score: {score}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
