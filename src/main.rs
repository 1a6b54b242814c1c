//! Sidewalk Run headless entry point
//!
//! Plays one autopilot run at a fixed 60 Hz and logs the outcome. Set
//! `RUST_LOG=info` to see session transitions, `SIDEWALK_TUNING` to load a
//! tuning file and `SIDEWALK_SEED` to pick the track.

use sidewalk_run::Tuning;
use sidewalk_run::consts::TARGET_FRAME_INTERVAL;
use sidewalk_run::host::{self, LogSink};
use sidewalk_run::sim::{Session, SessionPhase, autopilot};

/// Give up after five minutes of simulated play
const MAX_FRAMES: u32 = 5 * 60 * 60;
const DEFAULT_SEED: u64 = 12345;

fn load_tuning() -> Tuning {
    let Ok(path) = std::env::var("SIDEWALK_TUNING") else {
        return Tuning::default();
    };
    Tuning::load(&path).unwrap_or_else(|err| {
        log::warn!("Falling back to default tuning: {}", err);
        Tuning::default()
    })
}

fn main() {
    env_logger::init();

    let seed = std::env::var("SIDEWALK_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);
    log::info!("Sidewalk Run (headless) starting, seed {}", seed);

    let mut session = Session::with_tuning(load_tuning(), seed);
    let mut render = LogSink::default();
    let mut audio = LogSink::default();

    session.on_tap();
    let mut frames = 0;
    while frames < MAX_FRAMES {
        if autopilot::wants_jump(session.state(), session.tuning()) {
            session.on_tap();
        }
        session.on_frame(frames as f64 * TARGET_FRAME_INTERVAL);
        host::dispatch(session.drain_events(), &mut render, &mut audio);

        frames += 1;
        if session.phase() == SessionPhase::NotRunning {
            break;
        }
    }

    let score = &session.state().score;
    println!(
        "Survived {:.1}s  score {}  best {}",
        frames as f64 * TARGET_FRAME_INTERVAL,
        sidewalk_run::format_score(score.current),
        sidewalk_run::format_score(score.best),
    );
}
