//! Input events and event sources
//!
//! The core never reads device state; it only consumes batches of these
//! events, one batch per frame.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Reverse,
    Left,
    Right,
    Fire,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Window close / external quit request
    Close,
}

/// Source of input event batches
pub trait EventSource {
    /// Events that arrived since the last call (may be empty)
    fn poll(&mut self) -> Vec<InputEvent>;

    /// Block until at least one event is available. Used by the menu and
    /// pause screens, which have nothing to simulate while waiting.
    fn wait(&mut self) -> Vec<InputEvent> {
        self.poll()
    }
}

/// Pre-recorded frames of input, one batch per poll. Once exhausted it
/// reports `Close` so loops driven by it always terminate.
#[derive(Debug, Clone, Default)]
pub struct ScriptedEvents {
    frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    /// Append `count` empty frames (simulation runs with no input)
    pub fn idle(mut self, count: usize) -> Self {
        self.frames.extend(std::iter::repeat_n(Vec::new(), count));
        self
    }

    /// Append one frame carrying `events`
    pub fn then(mut self, events: Vec<InputEvent>) -> Self {
        self.frames.push_back(events);
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl EventSource for ScriptedEvents {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.frames
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Close])
    }

    fn wait(&mut self) -> Vec<InputEvent> {
        // Skip empty frames: a blocking wait never returns nothing
        loop {
            match self.frames.pop_front() {
                Some(batch) if batch.is_empty() => continue,
                Some(batch) => return batch,
                None => return vec![InputEvent::Close],
            }
        }
    }
}
