//! Wireframe primitives for entities

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::bounds::Bounds;
use crate::sim::vector::Vec2Ext;

/// Angle between the nose and each rear corner of the ship, degrees
pub const SHIP_REAR_ANGLE: f32 = 360.0 / 2.75;

/// A shape handed to the drawing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Closed outline through the points, in order
    Polygon { points: Vec<Vec2> },
    Circle {
        center: Vec2,
        radius: f32,
        filled: bool,
    },
}

impl Shape {
    /// Screen region the shape covers
    pub fn bounds(&self) -> Bounds {
        match self {
            Shape::Polygon { points } => Bounds::from_points(points),
            Shape::Circle { center, radius, .. } => Bounds::around(*center, *radius),
        }
    }
}

/// Triangle silhouette: nose at `heading * size / 2`, rear corners at the
/// nose vector rotated by +/- [`SHIP_REAR_ANGLE`]
pub fn ship_triangle(pos: Vec2, heading: Vec2, size: f32) -> [Vec2; 3] {
    let nose = heading * (size / 2.0);
    [
        pos + nose,
        pos + nose.rotate_deg(SHIP_REAR_ANGLE),
        pos + nose.rotate_deg(-SHIP_REAR_ANGLE),
    ]
}
