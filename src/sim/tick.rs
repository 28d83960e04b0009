//! Per-frame simulation step
//!
//! Order: ship (may request a projectile), asteroids (lost ones removed),
//! projectiles (expired ones removed), collision pass, then population
//! top-up.

use super::collision::check_collisions;
use super::state::GameSession;

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub projectiles_fired: u32,
    pub projectiles_expired: u32,
    pub asteroids_destroyed: u32,
    pub fragments_spawned: usize,
    /// Asteroids that drifted away for good and were dropped
    pub asteroids_lost: usize,
    /// Asteroids spawned to restore the floor
    pub asteroids_spawned: usize,
    pub floor_raised: bool,
    pub ship_destroyed: bool,
}

/// Advance the session by `dt` seconds
pub fn tick(session: &mut GameSession, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    let screen = session.screen;
    session.elapsed += dt;

    if let Some(request) = session.ship.update(dt, &screen) {
        match session.spawn_projectile(request) {
            Ok(_) => outcome.projectiles_fired += 1,
            Err(e) => log::warn!("Projectile spawn rejected: {e}"),
        }
    }

    for asteroid in &mut session.asteroids {
        asteroid.update(dt, &screen);
    }
    let before = session.asteroids.len();
    session.asteroids.retain(|a| {
        let lost = a.is_lost(&screen);
        if lost {
            log::debug!("Asteroid {} drifted away at ({}, {})", a.id, a.pos.x, a.pos.y);
        }
        !lost
    });
    outcome.asteroids_lost = before - session.asteroids.len();

    let before = session.projectiles.len();
    session.projectiles.retain_mut(|p| !p.update(dt, &screen));
    outcome.projectiles_expired = (before - session.projectiles.len()) as u32;

    let report = check_collisions(session);
    outcome.asteroids_destroyed = report.asteroids_destroyed;
    outcome.fragments_spawned = report.fragments_spawned;
    outcome.floor_raised = report.floor_raised;
    if report.ship_destroyed {
        outcome.ship_destroyed = true;
        return outcome;
    }

    outcome.asteroids_spawned = session.top_up();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::{InputEvent, Key};
    use crate::settings::Settings;
    use glam::Vec2;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_firing_spawns_projectile() {
        let mut session = GameSession::new(Settings::default(), 12345);
        session.asteroids.clear();
        session.asteroid_floor = 0;
        session.ship.handle_event(&InputEvent::KeyDown(Key::Fire));

        let outcome = tick(&mut session, DT);
        assert_eq!(outcome.projectiles_fired, 1);
        assert_eq!(session.projectiles.len(), 1);
        let p = &session.projectiles[0];
        assert_eq!(p.dir, Vec2::X);
    }

    #[test]
    fn test_projectiles_expire_offscreen() {
        let mut session = GameSession::new(Settings::default(), 1);
        session.asteroids.clear();
        session.asteroid_floor = 0;
        session.ship.handle_event(&InputEvent::KeyDown(Key::Fire));
        tick(&mut session, DT);
        session.ship.handle_event(&InputEvent::KeyUp(Key::Fire));

        // 450 units to the right edge at 300 units/s: gone within 2 seconds
        let mut expired = 0;
        for _ in 0..120 {
            expired += tick(&mut session, DT).projectiles_expired;
        }
        assert_eq!(expired, 1);
        assert!(session.projectiles.is_empty());
    }

    #[test]
    fn test_population_topped_up() {
        let mut session = GameSession::new(Settings::default(), 4);
        session.asteroids.truncate(3);
        let outcome = tick(&mut session, DT);
        assert_eq!(outcome.asteroids_spawned, 4);
        assert!(session.asteroids.len() >= session.asteroid_floor);
    }

    #[test]
    fn test_ship_death_skips_top_up() {
        let mut session = GameSession::new(Settings::default(), 4);
        session.asteroids.clear();
        session.add_asteroid(Vec2::new(450.0, 400.0), Vec2::ZERO, 0.0, 3);
        let outcome = tick(&mut session, DT);
        assert!(outcome.ship_destroyed);
        assert_eq!(outcome.asteroids_spawned, 0);
        assert_eq!(session.asteroids.len(), 1);
    }

    #[test]
    fn test_asteroid_drifting_away_is_replaced() {
        let mut session = GameSession::new(Settings::default(), 4);
        session.asteroids.truncate(6);
        // Latched from the start and heading further out
        session.add_asteroid(Vec2::new(-40.0, 350.0), Vec2::new(-50.0, 0.0), 0.0, 0);

        let mut lost = 0;
        for _ in 0..120 {
            let outcome = tick(&mut session, DT);
            lost += outcome.asteroids_lost;
            assert!(session.asteroids.len() >= session.asteroid_floor);
        }
        assert_eq!(lost, 1);
    }

    #[test]
    fn test_field_stays_near_screen() {
        let settings = Settings {
            invulnerable: true,
            ..Settings::default()
        };
        for seed in 0..20 {
            let mut session = GameSession::new(settings.clone(), seed);
            let screen = session.screen;
            // Five simulated minutes at a coarse step
            for _ in 0..3000 {
                tick(&mut session, 0.1);
                for a in &session.asteroids {
                    let size = a.bounds().size().max_element();
                    assert!(
                        !screen.is_beyond(&a.bounds(), size),
                        "seed {seed}: asteroid {} stranded at ({}, {})",
                        a.id,
                        a.pos.x,
                        a.pos.y
                    );
                }
            }
            assert!(session.asteroids.len() >= session.asteroid_floor);
        }
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and inputs stay identical
        let mut a = GameSession::new(Settings::default(), 99999);
        let mut b = GameSession::new(Settings::default(), 99999);

        let inputs = [
            InputEvent::KeyDown(Key::Fire),
            InputEvent::KeyDown(Key::Left),
            InputEvent::KeyDown(Key::Forward),
        ];
        for event in &inputs {
            a.ship.handle_event(event);
            b.ship.handle_event(event);
        }
        for _ in 0..300 {
            let oa = tick(&mut a, DT);
            let ob = tick(&mut b, DT);
            assert_eq!(oa, ob);
            if oa.ship_destroyed {
                a.reset();
                b.reset();
            }
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.asteroids, b.asteroids);
        assert_eq!(a.projectiles, b.projectiles);
        assert_eq!(a.ship, b.ship);
    }

    #[test]
    fn test_snapshot_resumes_identically() {
        let mut session = GameSession::new(Settings::default(), 2024);
        session.ship.handle_event(&InputEvent::KeyDown(Key::Fire));
        for _ in 0..30 {
            tick(&mut session, DT);
        }

        let json = serde_json::to_string(&session).unwrap();
        let mut restored: GameSession = serde_json::from_str(&json).unwrap();
        for _ in 0..60 {
            let o1 = tick(&mut session, DT);
            let o2 = tick(&mut restored, DT);
            assert_eq!(o1, o2);
        }
        assert_eq!(session.asteroids, restored.asteroids);
        assert_eq!(session.score, restored.score);
    }
}
