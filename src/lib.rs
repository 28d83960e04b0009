//! Asteroids - A screen-wrapping arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, population)
//! - `game`: Menu/play/pause state machine and frame loop
//! - `renderer`: Wireframe shapes and the drawing surface contract
//! - `platform`: Input events and frame pacing
//! - `settings`: Data-driven game tuning

pub mod error;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use game::{Game, Mode};
pub use highscores::HighScores;
pub use settings::Settings;

/// Default tuning values. `Settings::default()` is built from these.
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Target frame rate for the paced loop
    pub const FRAME_RATE: u32 = 60;
    /// Smallest dt a frame may report (guards `1/dt` and zero-length frames)
    pub const MIN_FRAME_DT: f32 = 1.0e-4;
    /// Largest dt a frame may report (a stalled frame must not tunnel entities)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ship defaults
    pub const SHIP_SIZE: f32 = 25.0;
    pub const SHIP_ACCEL: f32 = 25.0;
    /// Degrees per second
    pub const SHIP_ROT_VEL: f32 = 75.0;
    pub const SHIP_VEL_LIM: f32 = 100.0;
    pub const SHIP_SHOTS_PER_SEC: f32 = 3.0;

    /// Asteroid defaults
    pub const ASTEROID_RADII: [f32; 4] = [10.0, 30.0, 60.0, 120.0];
    pub const ASTEROID_SPEED_MIN: f32 = 10.0;
    pub const ASTEROID_SPEED_MAX: f32 = 25.0;
    pub const ASTEROID_VEL_LIM: f32 = 50.0;
    /// Degrees per second
    pub const ASTEROID_ROT_VEL_LIM: f32 = 5.0;
    /// Total spread of split fragments, degrees
    pub const SPLIT_ANGLE_MIN: f32 = 80.0;
    pub const SPLIT_ANGLE_MAX: f32 = 120.0;
    /// Per-vertex radius jitter as a fraction of the level radius
    pub const ASTEROID_BUMP: f32 = 0.1;
    pub const ASTEROID_VERTICES: usize = 15;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 300.0;
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Population / difficulty defaults
    pub const MIN_ASTEROIDS: usize = 7;
    pub const DIFFICULTY_THRESHOLD: u64 = 15;
    pub const DIFFICULTY_INCREMENT: usize = 3;
}
