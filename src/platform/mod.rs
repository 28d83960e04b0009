//! Platform abstraction layer
//!
//! Handles the outside world for:
//! - Input events
//! - Time/frame pacing

pub mod input;
pub mod time;

pub use input::{EventSource, InputEvent, Key, ScriptedEvents};
pub use time::{FixedClock, FrameClock, SystemClock};
