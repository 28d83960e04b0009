//! Projectiles fired from the ship's nose
//!
//! Unlike the ship and asteroids, projectiles do not wrap: they expire as
//! soon as they are fully off screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, Screen};
use crate::error::SimError;
use crate::renderer::Shape;
use crate::settings::ProjectileSettings;

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Unit travel direction
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
}

impl Projectile {
    /// Create a projectile; a zero-length direction is rejected
    pub fn new(
        id: u32,
        pos: Vec2,
        dir: Vec2,
        tuning: &ProjectileSettings,
    ) -> Result<Self, SimError> {
        let dir = dir
            .try_normalize()
            .ok_or(SimError::DegenerateDirection { x: pos.x, y: pos.y })?;
        Ok(Self {
            id,
            pos,
            dir,
            speed: tuning.speed,
            radius: tuning.radius,
        })
    }

    /// Move forward; returns true once the projectile has left the screen
    pub fn update(&mut self, dt: f32, screen: &Screen) -> bool {
        self.pos += self.dir * self.speed * dt;
        screen.is_outside(&self.bounds())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.pos, self.radius)
    }

    pub fn render(&self) -> Shape {
        Shape::Circle {
            center: self.pos,
            radius: self.radius,
            filled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tuning() -> ProjectileSettings {
        ProjectileSettings {
            speed: 100.0,
            radius: 2.0,
        }
    }

    #[test]
    fn test_direction_is_normalized() {
        let p = Projectile::new(1, Vec2::ZERO, Vec2::new(3.0, 4.0), &tuning()).unwrap();
        assert!((p.dir.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction_rejected() {
        let err = Projectile::new(1, Vec2::new(5.0, 6.0), Vec2::ZERO, &tuning()).unwrap_err();
        assert_eq!(err, SimError::DegenerateDirection { x: 5.0, y: 6.0 });
    }

    #[test]
    fn test_moves_and_expires_without_wrapping() {
        let screen = Screen::new(900.0, 700.0);
        let mut p = Projectile::new(1, Vec2::new(890.0, 350.0), Vec2::X, &tuning()).unwrap();

        // Still partially on screen
        assert!(!p.update(0.1, &screen));
        assert_eq!(p.pos, Vec2::new(900.0, 350.0));

        // Fully past the right edge: expired, and never teleported
        assert!(p.update(0.1, &screen));
        assert_eq!(p.pos, Vec2::new(910.0, 350.0));
    }

    #[test]
    fn test_render_is_filled_circle() {
        let p = Projectile::new(1, Vec2::new(1.0, 2.0), Vec2::Y, &tuning()).unwrap();
        assert_eq!(
            p.render(),
            Shape::Circle {
                center: Vec2::new(1.0, 2.0),
                radius: 2.0,
                filled: true
            }
        );
    }
}
