//! Lane Shift entry point
//!
//! Runs one headless session with the demo autopilot at 60 Hz and logs the
//! outcome. Usage: `lane-shift [seed] [3|4] [tuning.json]`

use lane_shift::sim::{GamePhase, GameState, choose_lane_change};
use lane_shift::{ConfigError, LaneMode, Settings, Tuning, cues_for};

/// Frame delta of the simulated display clock
const FRAME_DT: f32 = 1.0 / 60.0;
/// Longest frame handed to the sim (hitches, resumed process)
const MAX_FRAME_DELTA: f32 = 0.1;
/// Give up after this many simulated seconds
const MAX_SECONDS: f32 = 300.0;
/// Simulated viewport (points)
const WORLD_WIDTH: f32 = 390.0;
const WORLD_HEIGHT: f32 = 760.0;

fn run(seed: u64, settings: &Settings, tuning: Tuning) -> Result<(), ConfigError> {
    let mut state = GameState::new(tuning, seed)?;
    state.configure(settings.lane_mode.lane_count())?;
    state.resize(WORLD_WIDTH, WORLD_HEIGHT)?;
    state.start();

    let mut near_misses = 0u32;
    let mut pickups = 0u32;
    let max_frames = (MAX_SECONDS / FRAME_DT) as u32;

    for _ in 0..max_frames {
        if let Some(dir) = choose_lane_change(&state) {
            state.request_lane_change(dir);
        }

        let dt = FRAME_DT.min(MAX_FRAME_DELTA);
        let result = state.update(dt);
        pickups += result.pickups_collected;
        if result.near_miss.is_some() {
            near_misses += 1;
        }
        for cue in cues_for(&result, settings) {
            log::trace!("Feedback: {:?}", cue);
        }

        if result.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Run finished: phase {:?}, score {}, {:.1}s, {} pickups, {} near misses, speed {:.0}",
        state.phase,
        state.score,
        state.elapsed,
        pickups,
        near_misses,
        state.world_speed
    );
    println!("score: {}", state.score);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Lane Shift (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x1a2e_5f1f);

    let mut settings = Settings::default();
    if let Some(mode) = args.next() {
        match LaneMode::from_str(&mode) {
            Some(mode) => settings.lane_mode = mode,
            None => log::warn!("Unknown lane mode {:?}, using {}", mode, settings.lane_mode.as_str()),
        }
    }

    let tuning = match args.next() {
        Some(path) => match Tuning::load(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Bad tuning file {}: {}", path, e);
                std::process::exit(2);
            }
        },
        None => Tuning::default(),
    };

    log::info!("Seed: {}, {}", seed, settings.lane_mode.as_str());
    if let Err(e) = run(seed, &settings, tuning) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless runner is native only
}
