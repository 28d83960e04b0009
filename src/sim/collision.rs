//! Collision detection and resolution
//!
//! Everything collides as a circle: the ship with radius `size / 2`,
//! asteroids with their level radius, projectiles with their own radius.
//!
//! The pass scans first and mutates second. Hits are recorded as
//! `(asteroid id, projectile id)` pairs in scan order, then applied. A
//! projectile is consumed by the first pair that names it; later pairs
//! naming the same projectile still destroy their asteroid only if that
//! projectile was still live, so one projectile never scores twice.

use glam::Vec2;

use super::state::GameSession;

/// Circle overlap test (strict: touching is not a hit)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Outcome of one collision pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// The ship hit an asteroid and is dead; nothing else was resolved
    pub ship_destroyed: bool,
    pub asteroids_destroyed: u32,
    pub fragments_spawned: usize,
    /// The floor was raised at least once this pass
    pub floor_raised: bool,
}

/// Detect and resolve ship-asteroid and projectile-asteroid hits
pub fn check_collisions(session: &mut GameSession) -> CollisionReport {
    let mut report = CollisionReport::default();

    let ship_pos = session.ship.pos;
    let ship_radius = session.ship.radius();
    let rammed = session
        .asteroids
        .iter()
        .find(|a| circles_overlap(ship_pos, ship_radius, a.pos, a.radius))
        .map(|a| a.id);
    if let Some(asteroid_id) = rammed {
        session.ship.set_dead(true);
        if session.ship.is_dead() {
            log::info!(
                "Ship destroyed by asteroid {} at score {}",
                asteroid_id,
                session.score
            );
            report.ship_destroyed = true;
            return report;
        }
    }

    let mut hits: Vec<(u32, u32)> = Vec::new();
    for asteroid in &session.asteroids {
        for projectile in &session.projectiles {
            if circles_overlap(projectile.pos, projectile.radius, asteroid.pos, asteroid.radius) {
                hits.push((asteroid.id, projectile.id));
            }
        }
    }

    for (asteroid_id, projectile_id) in hits {
        let Some(p_idx) = session.projectiles.iter().position(|p| p.id == projectile_id) else {
            continue;
        };
        let Some(a_idx) = session.asteroids.iter().position(|a| a.id == asteroid_id) else {
            continue;
        };
        session.projectiles.remove(p_idx);
        let asteroid = session.asteroids.remove(a_idx);

        report.asteroids_destroyed += 1;
        if session.award_point() {
            report.floor_raised = true;
        }

        let fragments = asteroid.split(&mut session.spawn_ctx());
        report.fragments_spawned += fragments.len();
        session.asteroids.extend(fragments);
    }

    report
}
