//! Shuttle Rally Demo
//!
//! Drives the rally core with a scripted hand, the way a camera loop would,
//! then replays the recorded frames and checks the state hash matches.
//!
//! Environment:
//! - `RALLY_CONFIG`: path to a JSON constant table (defaults built in)
//! - `RALLY_SEED`: numeric seed, or any label to derive one from
//! - `RUST_LOG`: log filter (default `info`)

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shuttle_rally::{
    DEMO_FRAME_RATE, VERSION,
    config::GameConfig,
    core::rng::derive_session_seed,
    game::{
        events::{RallyEventData, RallyOutcome},
        input::DeltaTracker,
        state::{RallyMatch, RallySnapshot, RallyState},
        tick::{tick, replay_session, RecordedFrame},
    },
};

/// Length of the scripted session (seconds).
const DEMO_SECONDS: u32 = 30;

/// Frames between swing attempts.
const SWING_PERIOD: u32 = 120;

/// Largest per-frame hand drift that still reads as a resting hand.
const DRIFT_STEP: f64 = 0.01;

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Shuttle Rally v{}", VERSION);

    let config = load_config()?;
    let rng_seed = load_seed();
    info!("RNG Seed: {}", rng_seed);

    demo_session(rng_seed, &config)
}

fn load_config() -> Result<GameConfig> {
    match std::env::var("RALLY_CONFIG") {
        Ok(path) => {
            let config = GameConfig::from_json_file(&path)
                .with_context(|| format!("Loading constant table from {path}"))?;
            info!("Loaded constant table from {}", path);
            Ok(config)
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

fn load_seed() -> u64 {
    match std::env::var("RALLY_SEED") {
        Ok(value) => value.parse().unwrap_or_else(|_| derive_session_seed(&value)),
        Err(_) => derive_session_seed("demo"),
    }
}

/// Scripted hand: follows the incoming shuttle, then swings once per period
/// cycling through smash, clear and drop.
struct ScriptedHand {
    x: f64,
    y: f64,
}

impl ScriptedHand {
    fn new() -> Self {
        Self { x: 0.5, y: 0.5 }
    }

    /// Hand x that steers the player to `court_x`.
    fn steer_for(court_x: f64, config: &GameConfig) -> f64 {
        ((court_x / config.court_width - 0.5) / config.hand_sensitivity + 0.5).clamp(0.0, 1.0)
    }

    fn step(&mut self, frame: u32, snapshot: &RallySnapshot, config: &GameConfig) {
        let phase = frame % SWING_PERIOD;

        if phase == SWING_PERIOD - 30 && snapshot.state == RallyState::Idle {
            let (dx, dy) = match (frame / SWING_PERIOD) % 3 {
                0 => (0.0, 0.1),
                1 => (0.0, -0.1),
                _ => (0.04, 0.0),
            };
            self.x += dx;
            self.y += dy;
            return;
        }

        let goal_x = match snapshot.state {
            RallyState::FlightToPlayer => Self::steer_for(snapshot.shuttle.x, config),
            _ => 0.5,
        };
        self.x += (goal_x - self.x).clamp(-DRIFT_STEP, DRIFT_STEP);
        self.y += (0.5 - self.y).clamp(-DRIFT_STEP, DRIFT_STEP);
    }

    /// A small fan of landmarks around the centroid.
    fn landmarks(&self) -> Vec<(f64, f64)> {
        (0..21)
            .map(|i| {
                let offset = (i as f64 - 10.0) * 0.002;
                (self.x + offset, self.y - offset)
            })
            .collect()
    }
}

fn demo_session(rng_seed: u64, config: &GameConfig) -> Result<()> {
    info!("=== Starting Demo Session ===");

    let mut game = RallyMatch::new(rng_seed, config);
    let initial = game.clone();

    let mut tracker = DeltaTracker::new();
    let mut hand = ScriptedHand::new();
    let mut frames = Vec::new();

    let total_frames = DEMO_SECONDS * DEMO_FRAME_RATE;
    let frame_time = 1.0 / DEMO_FRAME_RATE as f64;

    let mut won = 0u32;
    let mut lost = 0u32;
    let mut snapshot = game.snapshot(0.0);

    info!("Running {} frames...", total_frames);

    for frame in 0..total_frames {
        let now = frame as f64 * frame_time;

        // Hand drops out of view for a moment every few seconds
        let sample = if frame % 300 < 5 {
            tracker.observe(None)
        } else {
            hand.step(frame, &snapshot, config);
            tracker.observe_landmarks(&hand.landmarks())
        };

        let result = tick(&mut game, now, sample.as_ref(), config);
        frames.push(RecordedFrame { now, hand: sample });
        snapshot = game.snapshot(now);

        for event in &result.events {
            match &event.data {
                RallyEventData::PlayerStroke { shot, aim_x } => {
                    info!("[{:6.2}s] Player {} -> x={:.2}", event.at, shot, aim_x);
                }
                RallyEventData::OpponentReturn { incoming, shot, aim_x } => {
                    info!("[{:6.2}s] Opponent answers {} with {} -> x={:.2}", event.at, incoming, shot, aim_x);
                }
                _ => {}
            }
        }

        match result.outcome {
            Some(RallyOutcome::Won) => won += 1,
            Some(RallyOutcome::Lost) => lost += 1,
            None => {}
        }
    }

    info!("=== Session Results ===");
    info!("Rallies won: {}, lost: {}", won, lost);
    info!("Final state: {}", game.state);

    let hash = game.compute_hash();
    info!("Final State Hash: {}", hex::encode(hash));

    info!("=== Verifying Determinism ===");
    let (replayed, _) = replay_session(initial, &frames, config);
    let replay_hash = replayed.compute_hash();
    info!("Replay State Hash: {}", hex::encode(replay_hash));

    if hash == replay_hash {
        info!("DETERMINISM VERIFIED: Hashes match!");
        Ok(())
    } else {
        anyhow::bail!("Replay diverged: {} != {}", hex::encode(hash), hex::encode(replay_hash))
    }
}
