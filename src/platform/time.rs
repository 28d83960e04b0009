//! Frame pacing
//!
//! A [`FrameClock`] blocks until the next frame is due and reports the
//! elapsed time. Reported dt is always clamped to
//! [`MIN_FRAME_DT`, `MAX_FRAME_DT`].

use std::time::{Duration, Instant};

use crate::consts::{MAX_FRAME_DT, MIN_FRAME_DT};

/// Clamp a measured frame duration to the range the simulation accepts
#[inline]
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() {
        return MIN_FRAME_DT;
    }
    dt.clamp(MIN_FRAME_DT, MAX_FRAME_DT)
}

pub trait FrameClock {
    /// Wait for the next frame at `target_fps` and return seconds elapsed
    /// since the previous call
    fn tick(&mut self, target_fps: u32) -> f32;
}

/// Reports the same dt every frame without sleeping
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    dt: f32,
}

impl FixedClock {
    pub fn new(dt: f32) -> Self {
        Self { dt: clamp_dt(dt) }
    }
}

impl FrameClock for FixedClock {
    fn tick(&mut self, _target_fps: u32) -> f32 {
        self.dt
    }
}

/// Wall clock that sleeps off the rest of each frame
#[derive(Debug)]
pub struct SystemClock {
    last: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }
}

impl FrameClock for SystemClock {
    fn tick(&mut self, target_fps: u32) -> f32 {
        let frame = Duration::from_secs_f32(1.0 / target_fps.max(1) as f32);
        let since = self.last.elapsed();
        if since < frame {
            std::thread::sleep(frame - since);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        clamp_dt(dt)
    }
}
