//! Top-level state machine and frame loop
//!
//! `MainMenu -> Play <-> Pause`, with `Quit` reachable from every mode.
//! A dead ship restarts the run in place: the session is reset and play
//! continues.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::highscores::HighScores;
use crate::platform::input::{EventSource, InputEvent, Key};
use crate::platform::time::FrameClock;
use crate::renderer::{Overlay, Surface, render_frame, render_overlay};
use crate::settings::Settings;
use crate::sim::state::GameSession;
use crate::sim::tick::{TickOutcome, tick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    MainMenu,
    Play,
    Pause,
    Quit,
}

/// Something that can move the game between modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    AnyKeyRelease,
    PauseKey,
    Close,
    ShipDestroyed,
}

impl Mode {
    /// Transition table. Unlisted pairs leave the mode unchanged.
    pub fn next(self, trigger: Trigger) -> Mode {
        match (self, trigger) {
            (Mode::Quit, _) => Mode::Quit,
            (_, Trigger::Close) => Mode::Quit,
            (Mode::MainMenu, Trigger::AnyKeyRelease) => Mode::Play,
            (Mode::Play, Trigger::PauseKey) => Mode::Pause,
            (Mode::Pause, Trigger::PauseKey) => Mode::Play,
            (Mode::Play, Trigger::ShipDestroyed) => Mode::Play,
            (mode, _) => mode,
        }
    }
}

/// Totals reported when the loop exits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Frames simulated in `Play`
    pub frames: u64,
    /// Runs that ended in the ship's death
    pub deaths: u32,
    pub asteroids_destroyed: u64,
    pub projectiles_fired: u64,
    pub final_score: u64,
    pub best_score: u64,
    pub high_scores: HighScores,
}

pub struct Game {
    pub session: GameSession,
    pub high_scores: HighScores,
    mode: Mode,
    summary: RunSummary,
}

impl Game {
    /// Start at the main menu. Settings are validated first.
    pub fn new(settings: Settings, seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        log::info!("New game (seed {seed})");
        Ok(Self {
            session: GameSession::new(settings, seed),
            high_scores: HighScores::new(),
            mode: Mode::MainMenu,
            summary: RunSummary::default(),
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn transition(&mut self, trigger: Trigger) {
        let next = self.mode.next(trigger);
        if next != self.mode {
            log::info!("Mode {:?} -> {:?} ({:?})", self.mode, next, trigger);
        }
        self.mode = next;
    }

    /// Run one frame of the current mode. Returns the tick outcome when the
    /// simulation advanced.
    pub fn frame(
        &mut self,
        events: &mut impl EventSource,
        clock: &mut impl FrameClock,
        surface: &mut impl Surface,
    ) -> Option<TickOutcome> {
        match self.mode {
            Mode::MainMenu => {
                render_overlay(Overlay::Title, surface);
                self.menu_events(events.wait());
                None
            }
            Mode::Play => self.play_frame(events, clock, surface),
            Mode::Pause => {
                render_overlay(Overlay::Paused, surface);
                self.pause_events(events.wait().into_iter());
                None
            }
            Mode::Quit => None,
        }
    }

    fn menu_events(&mut self, batch: Vec<InputEvent>) {
        for event in batch {
            match event {
                InputEvent::Close => self.transition(Trigger::Close),
                InputEvent::KeyUp(_) => self.transition(Trigger::AnyKeyRelease),
                InputEvent::KeyDown(_) => {}
            }
            if self.mode != Mode::MainMenu {
                return;
            }
        }
    }

    /// Releases still reach the ship while paused so no key stays held.
    /// Whatever follows an unpause in the same batch is play input.
    fn pause_events(&mut self, mut batch: impl Iterator<Item = InputEvent>) {
        while let Some(event) = batch.next() {
            match event {
                InputEvent::Close => {
                    self.transition(Trigger::Close);
                    return;
                }
                InputEvent::KeyDown(Key::Pause) => {
                    self.transition(Trigger::PauseKey);
                    self.play_events(batch);
                    return;
                }
                InputEvent::KeyUp(_) => self.session.ship.handle_event(&event),
                InputEvent::KeyDown(_) => {}
            }
        }
    }

    /// Route play input to the ship. Returns false when the batch left
    /// `Play` (pause or close).
    fn play_events(&mut self, mut batch: impl Iterator<Item = InputEvent>) -> bool {
        while let Some(event) = batch.next() {
            match event {
                InputEvent::Close => {
                    self.transition(Trigger::Close);
                    return false;
                }
                InputEvent::KeyDown(Key::Pause) => {
                    self.transition(Trigger::PauseKey);
                    self.pause_events(batch);
                    return false;
                }
                _ => self.session.ship.handle_event(&event),
            }
        }
        true
    }

    fn play_frame(
        &mut self,
        events: &mut impl EventSource,
        clock: &mut impl FrameClock,
        surface: &mut impl Surface,
    ) -> Option<TickOutcome> {
        let dt = clock.tick(self.session.settings.frame_rate);

        if !self.play_events(events.poll().into_iter()) {
            return None;
        }

        let outcome = tick(&mut self.session, dt);
        render_frame(&self.session, surface);

        self.summary.frames += 1;
        self.summary.asteroids_destroyed += u64::from(outcome.asteroids_destroyed);
        self.summary.projectiles_fired += u64::from(outcome.projectiles_fired);

        if outcome.ship_destroyed {
            self.summary.deaths += 1;
            let score = self.session.score;
            let survived = self.session.elapsed;
            log::info!("Ship destroyed: score {score}, survived {survived:.1}s");
            self.high_scores.record(score, survived);
            self.session.reset();
            self.transition(Trigger::ShipDestroyed);
        }
        Some(outcome)
    }

    /// Loop until quit; returns the totals
    pub fn run(
        &mut self,
        events: &mut impl EventSource,
        clock: &mut impl FrameClock,
        surface: &mut impl Surface,
    ) -> RunSummary {
        while self.mode != Mode::Quit {
            self.frame(events, clock, surface);
        }
        self.summary()
    }

    /// Totals so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            final_score: self.session.score,
            best_score: self.session.best_score,
            high_scores: self.high_scores.clone(),
            ..self.summary.clone()
        }
    }
}
