//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied dt only
//! - Seeded RNG only, owned by the session
//! - Stable iteration order (spawn order)
//! - No rendering surface or platform dependencies

pub mod asteroid;
pub mod bounds;
pub mod collision;
pub mod controller;
pub mod projectile;
pub mod ship;
pub mod state;
pub mod tick;
pub mod vector;

pub use asteroid::{Asteroid, Edge, SpawnCtx};
pub use bounds::{Bounds, Screen, WrapLatch};
pub use collision::{CollisionReport, check_collisions, circles_overlap};
pub use controller::{
    Controller, PlayerController, ScriptStep, ScriptedController, ShipCommand, ShipControl, Turn,
};
pub use projectile::Projectile;
pub use ship::{Ship, SpawnRequest};
pub use state::{EntityIds, GameSession};
pub use tick::{TickOutcome, tick};
pub use vector::Vec2Ext;
