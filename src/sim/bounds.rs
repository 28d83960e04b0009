//! Axis-aligned bounds and screen wrapping
//!
//! Ship and asteroids share one wrap discipline: once an entity's bounds are
//! entirely past an edge, it is translated by exactly one screen dimension
//! and a re-entry latch suppresses further wraps until it is fully back on
//! screen. The latch also starts set for entities spawned off screen, so
//! they can drift in without being bounced to the opposite edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::ScreenSettings;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Square box of half-width `half_extent` around `center`
    pub fn around(center: Vec2, half_extent: f32) -> Self {
        Self {
            min: center - Vec2::splat(half_extent),
            max: center + Vec2::splat(half_extent),
        }
    }

    /// Tightest box holding every point; a degenerate box at the origin
    /// when `points` is empty
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some(&first) = points.first() else {
            return Self {
                min: Vec2::ZERO,
                max: Vec2::ZERO,
            };
        };
        points.iter().skip(1).fold(
            Self {
                min: first,
                max: first,
            },
            |b, &p| Self {
                min: b.min.min(p),
                max: b.max.max(p),
            },
        )
    }

    pub fn translate(self, offset: Vec2) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// The playfield, origin at the top-left corner, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Screen {
    pub width: f32,
    pub height: f32,
}

impl Screen {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// Bounds lie entirely on screen (touching an edge counts)
    pub fn contains(&self, b: &Bounds) -> bool {
        b.min.x >= 0.0 && b.min.y >= 0.0 && b.max.x <= self.width && b.max.y <= self.height
    }

    /// Bounds lie entirely past at least one edge
    pub fn is_outside(&self, b: &Bounds) -> bool {
        b.max.x < 0.0 || b.min.x > self.width || b.max.y < 0.0 || b.min.y > self.height
    }

    /// Bounds lie more than `margin` past at least one edge
    pub fn is_beyond(&self, b: &Bounds, margin: f32) -> bool {
        b.max.x < -margin
            || b.min.x > self.width + margin
            || b.max.y < -margin
            || b.min.y > self.height + margin
    }

    /// Translation that brings bounds past an edge back from the opposite
    /// side; each axis contributes at most one screen dimension
    pub fn wrap_offset(&self, b: &Bounds) -> Vec2 {
        let x = if b.max.x < 0.0 {
            self.width
        } else if b.min.x > self.width {
            -self.width
        } else {
            0.0
        };
        let y = if b.max.y < 0.0 {
            self.height
        } else if b.min.y > self.height {
            -self.height
        } else {
            0.0
        };
        Vec2::new(x, y)
    }
}

impl From<ScreenSettings> for Screen {
    fn from(s: ScreenSettings) -> Self {
        Self::new(s.width, s.height)
    }
}

/// Re-entry latch guarding against repeated wraps
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapLatch {
    reentering: bool,
}

impl WrapLatch {
    /// Latch for a freshly placed entity: set iff it starts fully off screen
    pub fn for_spawn(screen: &Screen, bounds: &Bounds) -> Self {
        Self {
            reentering: screen.is_outside(bounds),
        }
    }

    pub fn is_reentering(&self) -> bool {
        self.reentering
    }

    /// Advance the latch for bounds that have just moved. Returns the
    /// translation the caller must apply to the entity (zero when no wrap).
    pub fn step(&mut self, screen: &Screen, bounds: &Bounds) -> Vec2 {
        let mut offset = Vec2::ZERO;
        if !self.reentering {
            offset = screen.wrap_offset(bounds);
            if offset != Vec2::ZERO {
                self.reentering = true;
            }
        }
        if self.reentering && screen.contains(&bounds.translate(offset)) {
            self.reentering = false;
        }
        offset
    }
}
