//! Rendering module
//!
//! Entities describe themselves as wireframe [`Shape`]s; a [`Surface`]
//! draws them and reports the screen region each one touched, so a
//! backend can redraw incrementally. [`DisplayList`] is a recording
//! surface used by the headless binary and tests.

pub mod shapes;

pub use shapes::Shape;

use serde::{Deserialize, Serialize};

use crate::sim::bounds::Bounds;
use crate::sim::state::GameSession;

/// Full-screen text overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    /// "Press any key" main menu
    Title,
    Paused,
}

/// Drawing backend
pub trait Surface {
    /// Start a new frame
    fn clear(&mut self);

    /// Draw one shape; returns the region it covers
    fn draw(&mut self, shape: &Shape) -> Bounds;

    /// Current and best score; formatting is up to the backend
    fn draw_scores(&mut self, score: u64, best: u64);

    fn draw_overlay(&mut self, overlay: Overlay);

    /// Finish the frame. `dirty` lists the regions drawn this frame; a
    /// full-redraw backend may ignore it.
    fn present(&mut self, dirty: &[Bounds]);
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Shape(Shape),
    Scores { score: u64, best: u64 },
    Overlay(Overlay),
}

/// Surface that records the current frame's commands
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
    /// Dirty regions passed to the last `present`
    pub dirty: Vec<Bounds>,
    /// Frames presented so far
    pub frames: u64,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes recorded this frame
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Shape(s) => Some(s),
            _ => None,
        })
    }

    /// Last score pair drawn this frame
    pub fn scores(&self) -> Option<(u64, u64)> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Scores { score, best } => Some((*score, *best)),
            _ => None,
        })
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Overlay(o) => Some(*o),
            _ => None,
        })
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.commands.clear();
        self.dirty.clear();
    }

    fn draw(&mut self, shape: &Shape) -> Bounds {
        self.commands.push(DrawCommand::Shape(shape.clone()));
        shape.bounds()
    }

    fn draw_scores(&mut self, score: u64, best: u64) {
        self.commands.push(DrawCommand::Scores { score, best });
    }

    fn draw_overlay(&mut self, overlay: Overlay) {
        self.commands.push(DrawCommand::Overlay(overlay));
    }

    fn present(&mut self, dirty: &[Bounds]) {
        self.dirty = dirty.to_vec();
        self.frames += 1;
    }
}

/// Draw the ship, asteroids, projectiles and scores. Returns the regions
/// touched, one per entity, in draw order.
pub fn render_frame(session: &GameSession, surface: &mut impl Surface) -> Vec<Bounds> {
    surface.clear();
    let mut dirty = Vec::with_capacity(1 + session.asteroids.len() + session.projectiles.len());

    dirty.push(surface.draw(&session.ship.render()));
    for asteroid in &session.asteroids {
        dirty.push(surface.draw(&asteroid.render()));
    }
    for projectile in &session.projectiles {
        dirty.push(surface.draw(&projectile.render()));
    }
    surface.draw_scores(session.score, session.best_score);
    surface.present(&dirty);
    dirty
}

/// Draw a static overlay frame (menu or pause)
pub fn render_overlay(overlay: Overlay, surface: &mut impl Surface) {
    surface.clear();
    surface.draw_overlay(overlay);
    surface.present(&[]);
}
