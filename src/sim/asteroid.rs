//! Asteroids: jittered polygon silhouettes that tumble, wrap and split
//!
//! Vertices are stored in screen space. Each frame they translate with the
//! center and rotate about it; the vertex count never changes.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Bounds, Screen, WrapLatch};
use super::state::EntityIds;
use super::vector::Vec2Ext;
use crate::renderer::Shape;
use crate::settings::AsteroidSettings;

/// Everything needed to create asteroids: tuning, playfield, randomness and
/// id allocation
pub struct SpawnCtx<'a, R: Rng> {
    pub tuning: &'a AsteroidSettings,
    pub screen: Screen,
    pub rng: &'a mut R,
    pub ids: &'a mut EntityIds,
}

/// Screen edge an asteroid enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    /// Center
    pub pos: Vec2,
    pub vel: Vec2,
    /// Tumble rate, degrees per second
    pub rot_vel: f32,
    /// Size tier, index into the radius table
    pub level: usize,
    /// Base radius of the level (collision radius)
    pub radius: f32,
    vertices: Vec<Vec2>,
    bounds: Bounds,
    latch: WrapLatch,
}

/// Uniform sample in `[lo, hi)`, or `lo` when the range is empty
fn sample<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

impl Asteroid {
    /// Create an asteroid with a freshly jittered silhouette. Speed and
    /// tumble are clamped to their limits. Panics if `level` is not in the
    /// radius table.
    pub fn new<R: Rng>(ctx: &mut SpawnCtx<'_, R>, pos: Vec2, vel: Vec2, rot_vel: f32, level: usize) -> Self {
        let tuning = ctx.tuning;
        let radius = tuning.radius(level);
        let vel = vel.clamp_length_to(tuning.vel_lim);
        let rot_vel = rot_vel.clamp(-tuning.rot_vel_lim, tuning.rot_vel_lim);

        let count = tuning.vertex_count;
        let step = 360.0 / count as f32;
        let bump = tuning.bump;
        let vertices: Vec<Vec2> = (0..count)
            .map(|i| {
                let jitter = ctx.rng.random_range(-bump..=bump);
                pos + Vec2::new(radius * (1.0 + jitter), 0.0).rotate_deg(i as f32 * step)
            })
            .collect();
        let bounds = Bounds::from_points(&vertices);

        Self {
            id: ctx.ids.next(),
            pos,
            vel,
            rot_vel,
            level,
            radius,
            latch: WrapLatch::for_spawn(&ctx.screen, &bounds),
            vertices,
            bounds,
        }
    }

    /// Random asteroid entering from a random edge. The silhouette starts
    /// just touching the edge, so it is never latched. Bigger levels move
    /// slower; tumble grows with the square of speed.
    pub fn spawn_at_edge<R: Rng>(ctx: &mut SpawnCtx<'_, R>) -> Self {
        let tuning = ctx.tuning;
        let screen = ctx.screen;
        let edge = Edge::ALL[ctx.rng.random_range(0..Edge::ALL.len())];
        let level = ctx.rng.random_range(0..tuning.levels());
        let radius = tuning.radius(level);

        let div = (level + 1) as f32;
        let lo = (tuning.speed_min / div).floor();
        let hi = (tuning.speed_max / div).floor();
        let inward = sample(ctx.rng, lo, hi);
        let drift = sample(ctx.rng, -hi, hi);

        let x = sample(ctx.rng, 0.0, screen.width);
        let y = sample(ctx.rng, 0.0, screen.height);
        let (pos, vel) = match edge {
            Edge::Top => (Vec2::new(x, -radius), Vec2::new(drift, inward)),
            Edge::Right => (Vec2::new(screen.width + radius, y), Vec2::new(-inward, drift)),
            Edge::Bottom => (Vec2::new(x, screen.height + radius), Vec2::new(drift, -inward)),
            Edge::Left => (Vec2::new(-radius, y), Vec2::new(inward, drift)),
        };

        let max_sq = tuning.speed_max * tuning.speed_max;
        let spin = if max_sq > 0.0 {
            vel.length_squared() / max_sq * tuning.rot_vel_lim
        } else {
            0.0
        };
        let rot_vel = if ctx.rng.random_bool(0.5) { spin } else { -spin };

        let mut asteroid = Self::new(ctx, pos, vel, rot_vel, level);
        let b = asteroid.bounds;
        let shift = match edge {
            Edge::Top => Vec2::new(0.0, -b.max.y),
            Edge::Right => Vec2::new(-(b.min.x - screen.width), 0.0),
            Edge::Bottom => Vec2::new(0.0, -(b.min.y - screen.height)),
            Edge::Left => Vec2::new(-b.max.x, 0.0),
        };
        asteroid.translate(shift);
        asteroid.latch = WrapLatch::default();

        log::debug!(
            "Spawning level {level} asteroid from {edge:?} at ({}, {})",
            asteroid.pos.x,
            asteroid.pos.y
        );
        asteroid
    }

    fn translate(&mut self, offset: Vec2) {
        self.pos += offset;
        for v in &mut self.vertices {
            *v += offset;
        }
        self.bounds = self.bounds.translate(offset);
    }

    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn is_reentering(&self) -> bool {
        self.latch.is_reentering()
    }

    /// A latched asteroid never wraps, so once it has drifted a full
    /// silhouette past an edge it will not come back
    pub fn is_lost(&self, screen: &Screen) -> bool {
        self.latch.is_reentering() && screen.is_beyond(&self.bounds, self.bounds.size().max_element())
    }

    /// Translate, tumble, then wrap the whole silhouette
    pub fn update(&mut self, dt: f32, screen: &Screen) {
        let delta = self.vel * dt;
        self.pos += delta;

        let angle = self.rot_vel * dt;
        let center = self.pos;
        for v in &mut self.vertices {
            *v = center + (*v + delta - center).rotate_deg(angle);
        }
        self.bounds = Bounds::from_points(&self.vertices);

        let offset = self.latch.step(screen, &self.bounds);
        if offset != Vec2::ZERO {
            self.translate(offset);
        }
    }

    pub fn render(&self) -> Shape {
        Shape::Polygon {
            points: self.vertices.clone(),
        }
    }

    /// Break into fragments one level down, all starting at this center.
    /// Level 0 leaves nothing.
    pub fn split<R: Rng>(&self, ctx: &mut SpawnCtx<'_, R>) -> Vec<Asteroid> {
        if self.level == 0 {
            return Vec::new();
        }
        let tuning = ctx.tuning;
        let new_level = self.level - 1;
        let radius = tuning.radius(self.level);
        let new_radius = tuning.radius(new_level);
        let count = (radius / new_radius).floor() as usize;
        assert!(count > 0, "split of level {} produced no fragments", self.level);

        let spread = sample(ctx.rng, tuning.split_angle_min, tuning.split_angle_max);
        let base = self.vel.rotate_deg(spread / 2.0);

        let parent_speed_sq = self.vel.length_squared();
        let levels_above = (tuning.levels() - new_level) as f32;
        let speed =
            levels_above * radius * parent_speed_sq.sqrt() / (count as f32 * new_radius);
        let vel_lim = tuning.vel_lim;

        let mut fragments = Vec::with_capacity(count);
        for i in 0..count {
            let offset = -(i as f32) * spread / count as f32;
            let vel = base.rotate_deg(offset).scale_to_length(speed).clamp_length_to(vel_lim);
            let rot_vel = if parent_speed_sq > 0.0 {
                self.rot_vel * vel.length_squared() / parent_speed_sq
            } else {
                0.0
            };
            fragments.push(Asteroid::new(ctx, self.pos, vel, rot_vel, new_level));
        }
        log::debug!(
            "Asteroid {} (level {}) split into {} fragments",
            self.id,
            self.level,
            fragments.len()
        );
        fragments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const EPS: f32 = 1e-3;

    struct Fixture {
        tuning: AsteroidSettings,
        rng: Pcg32,
        ids: EntityIds,
    }

    impl Fixture {
        fn new(seed: u64) -> Self {
            Self {
                tuning: AsteroidSettings::default(),
                rng: Pcg32::seed_from_u64(seed),
                ids: EntityIds::default(),
            }
        }

        fn ctx(&mut self) -> SpawnCtx<'_, Pcg32> {
            SpawnCtx {
                tuning: &self.tuning,
                screen: Screen::new(900.0, 700.0),
                rng: &mut self.rng,
                ids: &mut self.ids,
            }
        }
    }

    #[test]
    fn test_silhouette_jitter_bounds() {
        let mut fx = Fixture::new(7);
        let center = Vec2::new(450.0, 350.0);
        let ast = Asteroid::new(&mut fx.ctx(), center, Vec2::ZERO, 0.0, 3);
        assert_eq!(ast.vertices().len(), 15);
        for v in ast.vertices() {
            let d = v.distance(center);
            assert!(d >= 120.0 * 0.9 - EPS && d <= 120.0 * 1.1 + EPS, "vertex at {d}");
        }
        // Vertices sit in 24 degree slots
        let first = ast.vertices()[0] - center;
        assert!(first.y.abs() < EPS && first.x > 0.0);
    }

    #[test]
    fn test_construction_clamps() {
        let mut fx = Fixture::new(1);
        let ast = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(450.0, 350.0),
            Vec2::new(300.0, 400.0),
            -40.0,
            1,
        );
        assert!((ast.vel.length() - 50.0).abs() < EPS);
        assert_eq!(ast.rot_vel, -5.0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bad_level_panics() {
        let mut fx = Fixture::new(1);
        Asteroid::new(&mut fx.ctx(), Vec2::ZERO, Vec2::ZERO, 0.0, 4);
    }

    #[test]
    fn test_update_translates_and_tumbles() {
        let mut fx = Fixture::new(3);
        let screen = Screen::new(900.0, 700.0);
        let mut ast = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(450.0, 350.0),
            Vec2::new(10.0, 0.0),
            5.0,
            2,
        );
        let before: Vec<f32> = ast.vertices().iter().map(|v| v.distance(ast.pos)).collect();
        ast.update(1.0, &screen);
        assert_eq!(ast.pos, Vec2::new(460.0, 350.0));
        assert_eq!(ast.vertices().len(), 15);
        for (v, d) in ast.vertices().iter().zip(before) {
            assert!((v.distance(ast.pos) - d).abs() < EPS);
        }
        assert_eq!(ast.bounds(), Bounds::from_points(ast.vertices()));
    }

    #[test]
    fn test_wrap_moves_every_vertex() {
        let mut fx = Fixture::new(5);
        let screen = Screen::new(900.0, 700.0);
        let mut ast = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(12.0, 350.0),
            Vec2::new(-50.0, 0.0),
            0.0,
            0,
        );
        assert!(!ast.is_reentering());
        let before = ast.vertices().to_vec();
        ast.update(0.5, &screen);

        // 25 units left puts the whole rock past x = 0: wrapped by 900
        for (after, before) in ast.vertices().iter().zip(&before) {
            assert!((after.x - (before.x - 25.0 + 900.0)).abs() < EPS);
            assert!((after.y - before.y).abs() < EPS);
        }
        assert!((ast.pos.x - (12.0 - 25.0 + 900.0)).abs() < EPS);
    }

    #[test]
    fn test_offscreen_spawn_latched() {
        let mut fx = Fixture::new(5);
        let ast = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(-200.0, 350.0),
            Vec2::new(10.0, 0.0),
            0.0,
            0,
        );
        assert!(ast.is_reentering());
    }

    #[test]
    fn test_latched_asteroid_drifting_away_is_lost() {
        let mut fx = Fixture::new(5);
        let screen = Screen::new(900.0, 700.0);
        let mut ast = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(-15.0, 350.0),
            Vec2::new(-50.0, 0.0),
            0.0,
            0,
        );
        assert!(ast.is_reentering());
        assert!(!ast.is_lost(&screen));

        // Never wrapped while latched; lost once a full size past the edge
        for _ in 0..60 {
            ast.update(1.0 / 60.0, &screen);
        }
        assert!(ast.pos.x < -60.0);
        assert!(ast.is_lost(&screen));
    }

    #[test]
    fn test_split_smallest_is_empty() {
        let mut fx = Fixture::new(9);
        let ast = Asteroid::new(&mut fx.ctx(), Vec2::new(100.0, 100.0), Vec2::X, 1.0, 0);
        assert!(ast.split(&mut fx.ctx()).is_empty());
    }

    #[test]
    fn test_split_largest() {
        let mut fx = Fixture::new(11);
        let parent = Asteroid::new(
            &mut fx.ctx(),
            Vec2::new(450.0, 400.0),
            Vec2::new(10.0, 0.0),
            2.0,
            3,
        );
        let fragments = parent.split(&mut fx.ctx());
        assert_eq!(fragments.len(), 2);

        // (4 - 2) * 120 * 10 / (2 * 60) = 20
        for frag in &fragments {
            assert_eq!(frag.level, 2);
            assert_eq!(frag.pos, parent.pos);
            assert!((frag.vel.length() - 20.0).abs() < EPS);
            // Tumble scales by (20 / 10)^2, then clamps to 5
            assert_eq!(frag.rot_vel, 5.0);
        }

        // Fragments fan out across half the spread (80..120 degrees)
        let angle = fragments[0].vel.angle_to(fragments[1].vel).to_degrees().abs();
        assert!((40.0 - EPS..=60.0 + EPS).contains(&angle), "angle {angle}");

        let ids: Vec<u32> = fragments.iter().map(|f| f.id).collect();
        assert_ne!(ids[0], ids[1]);
        assert!(!ids.contains(&parent.id));
    }

    #[test]
    fn test_split_fragment_count_follows_radius_table() {
        let mut fx = Fixture::new(13);
        let parent = Asteroid::new(&mut fx.ctx(), Vec2::new(450.0, 350.0), Vec2::Y, 0.0, 1);
        let fragments = parent.split(&mut fx.ctx());
        // 30 / 10
        assert_eq!(fragments.len(), 3);
        assert!(fragments.iter().all(|f| f.level == 0));
    }

    #[test]
    fn test_split_stationary_parent() {
        let mut fx = Fixture::new(17);
        let parent = Asteroid::new(&mut fx.ctx(), Vec2::new(450.0, 350.0), Vec2::ZERO, 4.0, 2);
        let fragments = parent.split(&mut fx.ctx());
        assert_eq!(fragments.len(), 2);
        for frag in fragments {
            assert_eq!(frag.vel, Vec2::ZERO);
            assert_eq!(frag.rot_vel, 0.0);
        }
    }

    #[test]
    fn test_spawn_at_edge_moves_inward() {
        let mut fx = Fixture::new(21);
        let screen = Screen::new(900.0, 700.0);
        for _ in 0..200 {
            let ast = Asteroid::spawn_at_edge(&mut fx.ctx());
            assert!(ast.level < 4);
            assert!(!ast.is_reentering());
            assert!(!screen.is_outside(&ast.bounds()));
            assert!(ast.vel.length() <= 50.0 + EPS);
            assert!(ast.rot_vel.abs() <= 5.0);

            // Center sits past an edge with the silhouette touching it,
            // velocity points back inside
            let p = ast.pos;
            let b = ast.bounds();
            if p.y < 0.0 {
                assert_eq!(b.max.y, 0.0);
                assert!(ast.vel.y >= 0.0);
            } else if p.y > screen.height {
                assert_eq!(b.min.y, screen.height);
                assert!(ast.vel.y <= 0.0);
            } else if p.x < 0.0 {
                assert_eq!(b.max.x, 0.0);
                assert!(ast.vel.x >= 0.0);
            } else {
                assert!(p.x > screen.width);
                assert_eq!(b.min.x, screen.width);
                assert!(ast.vel.x <= 0.0);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_constructed_speed_within_limit(
            vx in -500.0f32..500.0,
            vy in -500.0f32..500.0,
            rot in -100.0f32..100.0,
            level in 0usize..4,
            seed in any::<u64>(),
        ) {
            let mut fx = Fixture::new(seed);
            let mut ast = Asteroid::new(
                &mut fx.ctx(),
                Vec2::new(450.0, 350.0),
                Vec2::new(vx, vy),
                rot,
                level,
            );
            prop_assert!(ast.vel.length() <= 50.0 + EPS);
            prop_assert!(ast.rot_vel.abs() <= 5.0);
            let screen = Screen::new(900.0, 700.0);
            for _ in 0..50 {
                ast.update(1.0 / 60.0, &screen);
                prop_assert!(ast.vel.length() <= 50.0 + EPS);
                prop_assert_eq!(ast.vertices().len(), 15);
            }
        }
    }
}
