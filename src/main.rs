//! Hex Pong headless runner
//!
//! Plays an autopilot match at the fixed 60 Hz step and logs what happens.
//!
//! Usage: `hex-pong [tuning.json]`
//! - `HEX_PONG_SEED`: RNG seed (defaults to the current time)
//! - `HEX_PONG_REALTIME=1`: sleep between ticks to run at wall-clock speed
//! - `RUST_LOG`: log filter (e.g. `debug` to see every event)

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use hex_pong::audio::{AudioManager, NullSink};
use hex_pong::consts::SIM_DT;
use hex_pong::sim::{GameEvent, MatchState, autopilot_input, tick};
use hex_pong::{ConfigError, Tuning};

/// Give up on a match after ten simulated minutes
const MAX_TICKS: u64 = 60 * 60 * 10;

fn load_tuning() -> Result<Tuning, ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path).map_err(|e| ConfigError::Read {
                path: path.clone(),
                message: e.to_string(),
            })?;
            log::info!("Loaded tuning from {}", path);
            Tuning::from_json(&json)
        }
        None => Ok(Tuning::default()),
    }
}

fn seed() -> u64 {
    std::env::var("HEX_PONG_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        })
}

fn main() {
    env_logger::init();
    log::info!("Hex Pong (headless) starting...");

    let tuning = match load_tuning() {
        Ok(tuning) => tuning,
        Err(e) => {
            log::error!("Bad configuration: {}", e);
            std::process::exit(1);
        }
    };

    let seed = seed();
    let mut state = match MatchState::new(tuning, seed) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Bad configuration: {}", e);
            std::process::exit(1);
        }
    };

    let realtime = std::env::var("HEX_PONG_REALTIME").is_ok_and(|v| v == "1");
    let frame = Duration::from_secs_f32(SIM_DT);
    let mut audio = AudioManager::new(NullSink);
    let mut rallies = 0u32;

    for _ in 0..MAX_TICKS {
        let started = Instant::now();
        let input = autopilot_input(&state);
        let events = tick(&mut state, &input, SIM_DT);
        audio.handle_events(&events);

        for event in &events {
            match event {
                GameEvent::PaddleHit { .. } => rallies += 1,
                GameEvent::Scored {
                    scorer,
                    conceded_by,
                    delta,
                } => log::info!(
                    "Goal against {} ({:?} {:+}) -> {:?}",
                    conceded_by.label(),
                    scorer.map(|p| p.label()),
                    delta,
                    state.scores()
                ),
                other => log::debug!("{:?}", other),
            }
        }

        if state.winner.is_some() || state.quit_requested() {
            break;
        }

        if realtime {
            if let Some(rest) = frame.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let scores = state.scores();
    match state.winner {
        Some(winner) => println!(
            "{} WINS! scores P1={} P2={} P3={} ({} paddle hits, {} ticks, seed {})",
            winner.label(),
            scores[0],
            scores[1],
            scores[2],
            rallies,
            state.time_ticks,
            seed
        ),
        None => println!(
            "No winner after {} ticks: P1={} P2={} P3={} (seed {})",
            state.time_ticks, scores[0], scores[1], scores[2], seed
        ),
    }
}
