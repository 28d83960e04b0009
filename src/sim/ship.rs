//! The player's ship

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, Screen, WrapLatch};
use super::controller::{Controller, ShipCommand, ShipControl, Turn};
use super::vector::Vec2Ext;
use crate::platform::input::InputEvent;
use crate::renderer::Shape;
use crate::renderer::shapes::ship_triangle;
use crate::settings::ShipSettings;

/// Heading after construction and every reset
pub const DEFAULT_HEADING: Vec2 = Vec2::X;

/// Request to spawn a projectile, returned from [`Ship::update`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRequest {
    /// The ship's nose
    pub pos: Vec2,
    pub dir: Vec2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar acceleration along the heading (sum of held thrust keys)
    pub accel: f32,
    /// Unit heading
    pub heading: Vec2,
    pub turning_left: bool,
    pub turning_right: bool,
    pub firing: bool,
    /// Simulation time of the last shot
    pub last_shot: Option<f32>,
    /// Simulation time accumulated from `update` calls
    pub clock: f32,
    dead: bool,
    invulnerable: bool,
    latch: WrapLatch,
    pub controller: Controller,
    tuning: ShipSettings,
}

impl Ship {
    pub fn new(pos: Vec2, tuning: ShipSettings, invulnerable: bool, screen: &Screen) -> Self {
        let mut ship = Self {
            pos,
            vel: Vec2::ZERO,
            accel: 0.0,
            heading: DEFAULT_HEADING,
            turning_left: false,
            turning_right: false,
            firing: false,
            last_shot: None,
            clock: 0.0,
            dead: false,
            invulnerable,
            latch: WrapLatch::default(),
            controller: Controller::default(),
            tuning,
        };
        ship.latch = WrapLatch::for_spawn(screen, &ship.bounds());
        ship
    }

    /// Replace the controller (e.g. a scripted pilot)
    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = controller;
        self
    }

    pub fn tuning(&self) -> &ShipSettings {
        &self.tuning
    }

    /// Collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.tuning.size / 2.0
    }

    /// Box used for wrapping
    pub fn bounds(&self) -> Bounds {
        Bounds::around(self.pos, self.radius())
    }

    pub fn is_reentering(&self) -> bool {
        self.latch.is_reentering()
    }

    /// Add (`forward`) or remove one step of thrust. Additive, so opposite
    /// calls cancel exactly.
    pub fn accelerate(&mut self, forward: bool) {
        if forward {
            self.accel += self.tuning.accel;
        } else {
            self.accel -= self.tuning.accel;
        }
    }

    pub fn turn(&mut self, dir: Turn, enable: bool) {
        match dir {
            Turn::Left => self.turning_left = enable,
            Turn::Right => self.turning_right = enable,
        }
    }

    pub fn shoot(&mut self, start: bool) {
        self.firing = start;
    }

    pub fn apply(&mut self, command: ShipCommand) {
        match command {
            ShipCommand::Accelerate { forward } => self.accelerate(forward),
            ShipCommand::Turn { dir, enable } => self.turn(dir, enable),
            ShipCommand::Shoot { start } => self.shoot(start),
        }
    }

    /// Route an input event through the controller
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let Some(cmd) = self.controller.handle_event(event) {
            self.apply(cmd);
        }
    }

    /// Net turn rate in degrees per second (both or neither flag: zero)
    pub fn turn_rate(&self) -> f32 {
        match (self.turning_left, self.turning_right) {
            (true, false) => -self.tuning.rot_vel,
            (false, true) => self.tuning.rot_vel,
            _ => 0.0,
        }
    }

    /// Advance one frame. Returns a projectile spawn request when the ship
    /// fires this frame.
    pub fn update(&mut self, dt: f32, screen: &Screen) -> Option<SpawnRequest> {
        for cmd in self.controller.drive(dt) {
            self.apply(cmd);
        }
        self.clock += dt;

        // Rotation keeps the heading unit length; renormalize against drift
        self.heading = self.heading.rotate_deg(self.turn_rate() * dt).normalized();

        self.vel += self.heading * self.accel * dt;
        self.vel = self.vel.clamp_length_to(self.tuning.vel_lim);
        self.pos += self.vel * dt;

        let offset = self.latch.step(screen, &self.bounds());
        if offset != Vec2::ZERO {
            log::debug!("Ship wrapped by ({}, {})", offset.x, offset.y);
            self.pos += offset;
        }

        if !self.firing {
            return None;
        }
        let cooldown = 1.0 / self.tuning.shots_per_sec;
        let ready = match self.last_shot {
            None => true,
            Some(t) => self.clock - t >= cooldown,
        };
        if !ready {
            return None;
        }
        self.last_shot = Some(self.clock);
        Some(SpawnRequest {
            pos: self.nose(),
            dir: self.heading,
        })
    }

    /// Tip of the triangle, where projectiles spawn
    pub fn nose(&self) -> Vec2 {
        self.pos + self.heading * (self.tuning.size / 2.0)
    }

    pub fn render(&self) -> Shape {
        Shape::Polygon {
            points: ship_triangle(self.pos, self.heading, self.tuning.size).to_vec(),
        }
    }

    /// Respawn in place of a new ship
    pub fn reset(&mut self, pos: Vec2, screen: &Screen) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.accel = 0.0;
        self.heading = DEFAULT_HEADING;
        self.turning_left = false;
        self.turning_right = false;
        self.firing = false;
        self.last_shot = None;
        self.clock = 0.0;
        self.dead = false;
        self.controller.reset();
        self.latch = WrapLatch::for_spawn(screen, &self.bounds());
    }

    pub fn set_dead(&mut self, dead: bool) {
        self.dead = dead;
    }

    /// Always false when invulnerable
    pub fn is_dead(&self) -> bool {
        self.dead && !self.invulnerable
    }
}
