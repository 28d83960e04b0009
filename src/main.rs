//! Asteroids entry point
//!
//! Runs a headless attract-mode session: a scripted pilot flies the ship,
//! frames are recorded to a display list, and a JSON summary is printed on
//! exit.
//!
//! Settings come from the file named by the first argument, else
//! `ASTEROIDS_SETTINGS`, else built-in defaults. `ASTEROIDS_SEED` and
//! `ASTEROIDS_FRAMES` override the seed and session length;
//! `ASTEROIDS_REALTIME` paces frames against the wall clock.

use std::process::ExitCode;

use asteroids::Game;
use asteroids::platform::{FixedClock, InputEvent, Key, ScriptedEvents, SystemClock};
use asteroids::renderer::DisplayList;
use asteroids::settings::Settings;
use asteroids::sim::{Controller, ScriptStep, ScriptedController};

const DEFAULT_SEED: u64 = 0x5eed;
const DEFAULT_FRAMES: usize = 60 * 60;

fn load_settings() -> Result<Settings, asteroids::SettingsError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("ASTEROIDS_SETTINGS").ok());
    match path {
        Some(path) => Settings::load(&path),
        None => {
            log::info!("No settings file given, using defaults");
            Ok(Settings::default())
        }
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparseable {name}={raw}");
            default
        }),
        Err(_) => default,
    }
}

/// Circle left while firing, with bursts of thrust
fn attract_pilot() -> Controller {
    let mut script = vec![
        ScriptStep::new(0.0, InputEvent::KeyDown(Key::Fire)),
        ScriptStep::new(0.0, InputEvent::KeyDown(Key::Left)),
    ];
    for burst in 0..20 {
        let t = 2.0 + burst as f32 * 3.0;
        script.push(ScriptStep::new(t, InputEvent::KeyDown(Key::Forward)));
        script.push(ScriptStep::new(t + 0.5, InputEvent::KeyUp(Key::Forward)));
    }
    Controller::Scripted(ScriptedController::new(script))
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Asteroids (headless) starting...");

    let settings = match load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let seed = env_or("ASTEROIDS_SEED", DEFAULT_SEED);
    let frames = env_or("ASTEROIDS_FRAMES", DEFAULT_FRAMES);
    let realtime = std::env::var_os("ASTEROIDS_REALTIME").is_some();

    let mut game = match Game::new(settings, seed) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    game.session.ship.controller = attract_pilot();

    // Any key release leaves the menu; Close follows the last frame
    let mut events = ScriptedEvents::default()
        .then(vec![InputEvent::KeyUp(Key::Fire)])
        .idle(frames);
    let mut surface = DisplayList::new();

    let summary = if realtime {
        game.run(&mut events, &mut SystemClock::new(), &mut surface)
    } else {
        let mut clock = FixedClock::new(game.session.settings.frame_dt());
        game.run(&mut events, &mut clock, &mut surface)
    };
    log::info!(
        "Attract session over: {} frames, {} deaths, best score {}",
        summary.frames,
        summary.deaths,
        summary.best_score
    );

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize summary: {e}");
            ExitCode::FAILURE
        }
    }
}
