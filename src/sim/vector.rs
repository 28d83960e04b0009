//! 2D vector helpers on top of `glam::Vec2`
//!
//! glam already provides add, scale, length, length_squared and distance.
//! This adds degree-based rotation and exact-length rescaling.
//!
//! Zero-length policy: normalizing or rescaling a zero vector yields the
//! zero vector. Nothing in the simulation panics on a degenerate vector;
//! callers that need a direction (projectiles) check for zero explicitly.
//!
//! Rotation uses the standard matrix `[cos -sin; sin cos]`. In y-down
//! screen space a positive angle therefore turns clockwise on screen.

use glam::Vec2;

pub trait Vec2Ext {
    /// Rotate by signed degrees
    fn rotate_deg(self, degrees: f32) -> Vec2;
    /// Unit vector in the same direction, or zero for a zero input
    fn normalized(self) -> Vec2;
    /// Same direction with exactly `length`, or zero for a zero input
    fn scale_to_length(self, length: f32) -> Vec2;
    /// Rescale down to `limit` if longer, otherwise unchanged
    fn clamp_length_to(self, limit: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn rotate_deg(self, degrees: f32) -> Vec2 {
        Vec2::from_angle(degrees.to_radians()).rotate(self)
    }

    #[inline]
    fn normalized(self) -> Vec2 {
        self.normalize_or_zero()
    }

    #[inline]
    fn scale_to_length(self, length: f32) -> Vec2 {
        self.normalize_or_zero() * length
    }

    #[inline]
    fn clamp_length_to(self, limit: f32) -> Vec2 {
        if self.length_squared() > limit * limit {
            self.scale_to_length(limit)
        } else {
            self
        }
    }
}
