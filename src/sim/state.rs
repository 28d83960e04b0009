//! Game session state
//!
//! Everything the simulation mutates lives in [`GameSession`]. It is
//! serializable (RNG state included) so a snapshot resumes deterministically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, SpawnCtx};
use super::bounds::Screen;
use super::projectile::Projectile;
use super::ship::{Ship, SpawnRequest};
use crate::error::SimError;
use crate::settings::Settings;

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn next(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// One run of the game: ship, asteroids, projectiles and score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub settings: Settings,
    pub screen: Screen,
    /// Seed the session was created with
    pub seed: u64,
    pub ship: Ship,
    /// Live asteroids, in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    pub score: u64,
    /// Best score across every run of this process
    pub best_score: u64,
    /// Minimum live asteroid count; rises with score
    pub asteroid_floor: usize,
    /// Simulated seconds since the last reset
    pub elapsed: f32,
    rng: Pcg32,
    ids: EntityIds,
}

impl GameSession {
    /// Create a session and populate it for play. `settings` must pass
    /// [`Settings::validate`]; an empty radius table panics here.
    /// [`crate::Game::new`] validates before calling this.
    pub fn new(settings: Settings, seed: u64) -> Self {
        let screen = Screen::from(settings.screen);
        let ship = Ship::new(screen.center(), settings.ship, settings.invulnerable, &screen);
        let mut session = Self {
            asteroid_floor: settings.difficulty.min_asteroids,
            settings,
            screen,
            seed,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            score: 0,
            best_score: 0,
            elapsed: 0.0,
            rng: Pcg32::seed_from_u64(seed),
            ids: EntityIds::default(),
        };
        session.populate();
        session
    }

    /// Start a new run: respawn the ship at the center, clear projectiles,
    /// zero the score and floor, and spawn a fresh field. The best score
    /// and the RNG stream carry over.
    pub fn reset(&mut self) {
        let center = self.screen.center();
        self.ship.reset(center, &self.screen);
        self.projectiles.clear();
        self.asteroids.clear();
        self.score = 0;
        self.elapsed = 0.0;
        self.asteroid_floor = self.settings.difficulty.min_asteroids;
        self.populate();
        log::info!(
            "Session reset: {} asteroids, best score {}",
            self.asteroids.len(),
            self.best_score
        );
    }

    fn populate(&mut self) {
        for _ in 0..self.asteroid_floor {
            self.spawn_asteroid();
        }
    }

    /// Borrow the pieces asteroid creation needs
    pub fn spawn_ctx(&mut self) -> SpawnCtx<'_, Pcg32> {
        SpawnCtx {
            tuning: &self.settings.asteroid,
            screen: self.screen,
            rng: &mut self.rng,
            ids: &mut self.ids,
        }
    }

    /// Add one random asteroid at a screen edge
    pub fn spawn_asteroid(&mut self) {
        let asteroid = Asteroid::spawn_at_edge(&mut self.spawn_ctx());
        self.asteroids.push(asteroid);
    }

    /// Place an asteroid with explicit motion (tests, scripted fields)
    pub fn add_asteroid(&mut self, pos: Vec2, vel: Vec2, rot_vel: f32, level: usize) -> u32 {
        let asteroid = Asteroid::new(&mut self.spawn_ctx(), pos, vel, rot_vel, level);
        let id = asteroid.id;
        self.asteroids.push(asteroid);
        id
    }

    /// Fire a projectile
    pub fn spawn_projectile(&mut self, request: SpawnRequest) -> Result<u32, SimError> {
        let id = self.ids.next();
        let projectile = Projectile::new(id, request.pos, request.dir, &self.settings.projectile)?;
        self.projectiles.push(projectile);
        Ok(id)
    }

    /// Spawn until the live count meets the floor; returns how many
    pub fn top_up(&mut self) -> usize {
        let missing = self.asteroid_floor.saturating_sub(self.asteroids.len());
        for _ in 0..missing {
            self.spawn_asteroid();
        }
        missing
    }

    /// Credit one destroyed asteroid. Returns true when this point crossed
    /// a difficulty threshold and raised the floor. A zero threshold never
    /// escalates.
    pub fn award_point(&mut self) -> bool {
        self.score += 1;
        self.best_score = self.best_score.max(self.score);
        let difficulty = &self.settings.difficulty;
        if self.score.checked_rem(difficulty.threshold) == Some(0) {
            self.asteroid_floor += difficulty.increment;
            log::info!(
                "Score {} reached: asteroid floor raised to {}",
                self.score,
                self.asteroid_floor
            );
            true
        } else {
            false
        }
    }
}
