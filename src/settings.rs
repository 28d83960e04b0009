//! Game tuning and preferences
//!
//! Every gameplay constant is exposed here so sessions can be tuned (and
//! tested) without recompiling. Loaded from a JSON file; any section or
//! field left out of the file keeps its default from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Playfield dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ScreenSettings {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
        }
    }
}

/// Ship handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    /// Nose-to-tail size; half of it is the collision radius
    pub size: f32,
    /// Acceleration added per held thrust key
    pub accel: f32,
    /// Turn rate in degrees per second
    pub rot_vel: f32,
    /// Top speed
    pub vel_lim: f32,
    pub shots_per_sec: f32,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            size: SHIP_SIZE,
            accel: SHIP_ACCEL,
            rot_vel: SHIP_ROT_VEL,
            vel_lim: SHIP_VEL_LIM,
            shots_per_sec: SHIP_SHOTS_PER_SEC,
        }
    }
}

/// Asteroid generation and splitting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    /// Base radius per level, smallest first
    pub radii: Vec<f32>,
    /// Spawn speed range (divided by `level + 1` for bigger rocks)
    pub speed_min: f32,
    pub speed_max: f32,
    pub vel_lim: f32,
    /// Tumble limit in degrees per second
    pub rot_vel_lim: f32,
    /// Total fragment spread in degrees
    pub split_angle_min: f32,
    pub split_angle_max: f32,
    /// Silhouette jitter as a fraction of the level radius
    pub bump: f32,
    pub vertex_count: usize,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            radii: ASTEROID_RADII.to_vec(),
            speed_min: ASTEROID_SPEED_MIN,
            speed_max: ASTEROID_SPEED_MAX,
            vel_lim: ASTEROID_VEL_LIM,
            rot_vel_lim: ASTEROID_ROT_VEL_LIM,
            split_angle_min: SPLIT_ANGLE_MIN,
            split_angle_max: SPLIT_ANGLE_MAX,
            bump: ASTEROID_BUMP,
            vertex_count: ASTEROID_VERTICES,
        }
    }
}

impl AsteroidSettings {
    /// Number of size tiers
    pub fn levels(&self) -> usize {
        self.radii.len()
    }

    /// Base radius for a level. Panics on an unknown level: callers only
    /// ever derive levels from this table.
    pub fn radius(&self, level: usize) -> f32 {
        assert!(
            level < self.radii.len(),
            "asteroid level {level} out of range (have {} levels)",
            self.radii.len()
        );
        self.radii[level]
    }
}

/// Projectile constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    pub speed: f32,
    pub radius: f32,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
        }
    }
}

/// Asteroid population floor and how it escalates with score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultySettings {
    pub min_asteroids: usize,
    /// Every multiple of this score raises the floor
    pub threshold: u64,
    pub increment: usize,
}

impl Default for DifficultySettings {
    fn default() -> Self {
        Self {
            min_asteroids: MIN_ASTEROIDS,
            threshold: DIFFICULTY_THRESHOLD,
            increment: DIFFICULTY_INCREMENT,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen: ScreenSettings,
    pub ship: ShipSettings,
    pub asteroid: AsteroidSettings,
    pub projectile: ProjectileSettings,
    pub difficulty: DifficultySettings,

    /// Target frames per second for the paced loop
    pub frame_rate: u32,
    /// God mode: the ship never reads as dead
    pub invulnerable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen: ScreenSettings::default(),
            ship: ShipSettings::default(),
            asteroid: AsteroidSettings::default(),
            projectile: ProjectileSettings::default(),
            difficulty: DifficultySettings::default(),
            frame_rate: FRAME_RATE,
            invulnerable: false,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Seconds between frames at the target rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen.width > 0.0 && self.screen.height > 0.0) {
            return Err(SettingsError::invalid(
                "screen",
                format!(
                    "dimensions must be positive, got {}x{}",
                    self.screen.width, self.screen.height
                ),
            ));
        }
        if self.frame_rate == 0 {
            return Err(SettingsError::invalid("frame_rate", "must be at least 1"));
        }

        let ship = &self.ship;
        if ship.size <= 0.0 {
            return Err(SettingsError::invalid("ship.size", "must be positive"));
        }
        if ship.vel_lim <= 0.0 {
            return Err(SettingsError::invalid("ship.vel_lim", "must be positive"));
        }
        if ship.shots_per_sec <= 0.0 {
            return Err(SettingsError::invalid(
                "ship.shots_per_sec",
                "must be positive",
            ));
        }

        let ast = &self.asteroid;
        if ast.radii.is_empty() {
            return Err(SettingsError::invalid("asteroid.radii", "table is empty"));
        }
        if ast.radii[0] <= 0.0 {
            return Err(SettingsError::invalid(
                "asteroid.radii",
                "radii must be positive",
            ));
        }
        if ast.radii.windows(2).any(|w| w[1] <= w[0]) {
            return Err(SettingsError::invalid(
                "asteroid.radii",
                format!("radii must strictly increase, got {:?}", ast.radii),
            ));
        }
        if ast.vertex_count < 3 {
            return Err(SettingsError::invalid(
                "asteroid.vertex_count",
                format!("need at least 3 vertices, got {}", ast.vertex_count),
            ));
        }
        if ast.speed_min < 0.0 || ast.speed_min > ast.speed_max {
            return Err(SettingsError::invalid(
                "asteroid.speed_min",
                format!(
                    "expected 0 <= speed_min <= speed_max, got {}..{}",
                    ast.speed_min, ast.speed_max
                ),
            ));
        }
        if ast.split_angle_min > ast.split_angle_max {
            return Err(SettingsError::invalid(
                "asteroid.split_angle_min",
                format!(
                    "range is inverted: {}..{}",
                    ast.split_angle_min, ast.split_angle_max
                ),
            ));
        }
        if !(0.0..1.0).contains(&ast.bump) {
            return Err(SettingsError::invalid(
                "asteroid.bump",
                format!("must be in [0, 1), got {}", ast.bump),
            ));
        }
        if ast.vel_lim <= 0.0 || ast.rot_vel_lim < 0.0 {
            return Err(SettingsError::invalid(
                "asteroid.vel_lim",
                "speed limits must be positive",
            ));
        }

        if self.projectile.speed <= 0.0 || self.projectile.radius <= 0.0 {
            return Err(SettingsError::invalid(
                "projectile",
                "speed and radius must be positive",
            ));
        }
        if self.difficulty.threshold == 0 {
            return Err(SettingsError::invalid(
                "difficulty.threshold",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}
