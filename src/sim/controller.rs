//! Ship controllers
//!
//! A controller turns input into [`ShipCommand`]s with edge-triggered
//! semantics: a repeated key-down does nothing, and a key-up only undoes an
//! action whose key-down was actually seen.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::platform::input::{InputEvent, Key};

/// Turn direction (screen space: `Right` is clockwise)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Left,
    Right,
}

/// A single request to the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipCommand {
    /// Add (`forward`) or subtract thrust along the heading
    Accelerate { forward: bool },
    Turn { dir: Turn, enable: bool },
    Shoot { start: bool },
}

/// Capability a ship is driven through
pub trait ShipControl {
    /// Map one input event to at most one command
    fn handle_event(&mut self, event: &InputEvent) -> Option<ShipCommand>;

    /// Commands produced by the passage of time (scripted drivers)
    fn drive(&mut self, _dt: f32) -> Vec<ShipCommand> {
        Vec::new()
    }

    /// Forget all held keys
    fn reset(&mut self);
}

/// Human player: five held-key flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerController {
    pub forward: bool,
    pub reverse: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl PlayerController {
    fn flag(&mut self, key: Key) -> Option<&mut bool> {
        match key {
            Key::Forward => Some(&mut self.forward),
            Key::Reverse => Some(&mut self.reverse),
            Key::Left => Some(&mut self.left),
            Key::Right => Some(&mut self.right),
            Key::Fire => Some(&mut self.fire),
            Key::Pause => None,
        }
    }

    fn command(key: Key, pressed: bool) -> Option<ShipCommand> {
        let cmd = match key {
            Key::Forward => ShipCommand::Accelerate { forward: pressed },
            Key::Reverse => ShipCommand::Accelerate { forward: !pressed },
            Key::Left => ShipCommand::Turn {
                dir: Turn::Left,
                enable: pressed,
            },
            Key::Right => ShipCommand::Turn {
                dir: Turn::Right,
                enable: pressed,
            },
            Key::Fire => ShipCommand::Shoot { start: pressed },
            Key::Pause => return None,
        };
        Some(cmd)
    }
}

impl ShipControl for PlayerController {
    fn handle_event(&mut self, event: &InputEvent) -> Option<ShipCommand> {
        let (key, pressed) = match *event {
            InputEvent::KeyDown(key) => (key, true),
            InputEvent::KeyUp(key) => (key, false),
            InputEvent::Close => return None,
        };
        let held = self.flag(key)?;
        if *held == pressed {
            // Repeated press, or release without a recorded press
            return None;
        }
        *held = pressed;
        Self::command(key, pressed)
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// One timed input in a script
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    /// Seconds since the script (re)started
    pub at: f32,
    pub event: InputEvent,
}

impl ScriptStep {
    pub fn new(at: f32, event: InputEvent) -> Self {
        Self { at, event }
    }
}

/// Replays a fixed timeline through the player key mapping. Live input is
/// ignored; `reset` rewinds to the start.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedController {
    script: Vec<ScriptStep>,
    pending: VecDeque<ScriptStep>,
    elapsed: f32,
    keys: PlayerController,
}

impl ScriptedController {
    pub fn new(mut script: Vec<ScriptStep>) -> Self {
        script.sort_by(|a, b| a.at.total_cmp(&b.at));
        Self {
            pending: script.iter().copied().collect(),
            script,
            elapsed: 0.0,
            keys: PlayerController::default(),
        }
    }

    /// Steps not yet replayed
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

impl ShipControl for ScriptedController {
    fn handle_event(&mut self, _event: &InputEvent) -> Option<ShipCommand> {
        None
    }

    fn drive(&mut self, dt: f32) -> Vec<ShipCommand> {
        self.elapsed += dt;
        let mut commands = Vec::new();
        while let Some(step) = self.pending.front() {
            if step.at > self.elapsed {
                break;
            }
            let step = *step;
            self.pending.pop_front();
            if let Some(cmd) = self.keys.handle_event(&step.event) {
                commands.push(cmd);
            }
        }
        commands
    }

    fn reset(&mut self) {
        self.pending = self.script.iter().copied().collect();
        self.elapsed = 0.0;
        self.keys.reset();
    }
}

/// The controller a ship owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Controller {
    Player(PlayerController),
    Scripted(ScriptedController),
}

impl Default for Controller {
    fn default() -> Self {
        Controller::Player(PlayerController::default())
    }
}

impl ShipControl for Controller {
    fn handle_event(&mut self, event: &InputEvent) -> Option<ShipCommand> {
        match self {
            Controller::Player(c) => c.handle_event(event),
            Controller::Scripted(c) => c.handle_event(event),
        }
    }

    fn drive(&mut self, dt: f32) -> Vec<ShipCommand> {
        match self {
            Controller::Player(c) => c.drive(dt),
            Controller::Scripted(c) => c.drive(dt),
        }
    }

    fn reset(&mut self) {
        match self {
            Controller::Player(c) => c.reset(),
            Controller::Scripted(c) => c.reset(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_key_down_fires_once() {
        let mut c = PlayerController::default();
        let down = InputEvent::KeyDown(Key::Left);
        assert_eq!(
            c.handle_event(&down),
            Some(ShipCommand::Turn {
                dir: Turn::Left,
                enable: true
            })
        );
        assert_eq!(c.handle_event(&down), None);
        assert_eq!(
            c.handle_event(&InputEvent::KeyUp(Key::Left)),
            Some(ShipCommand::Turn {
                dir: Turn::Left,
                enable: false
            })
        );
        assert!(!c.left);
    }

    #[test]
    fn test_stray_release_ignored() {
        let mut c = PlayerController::default();
        assert_eq!(c.handle_event(&InputEvent::KeyUp(Key::Fire)), None);
        assert_eq!(c.handle_event(&InputEvent::KeyUp(Key::Forward)), None);
    }

    #[test]
    fn test_reverse_maps_to_negative_thrust() {
        let mut c = PlayerController::default();
        assert_eq!(
            c.handle_event(&InputEvent::KeyDown(Key::Reverse)),
            Some(ShipCommand::Accelerate { forward: false })
        );
        assert_eq!(
            c.handle_event(&InputEvent::KeyUp(Key::Reverse)),
            Some(ShipCommand::Accelerate { forward: true })
        );
    }

    #[test]
    fn test_pause_and_close_not_mapped() {
        let mut c = PlayerController::default();
        assert_eq!(c.handle_event(&InputEvent::KeyDown(Key::Pause)), None);
        assert_eq!(c.handle_event(&InputEvent::Close), None);
    }

    #[test]
    fn test_reset_clears_flags() {
        let mut c = PlayerController::default();
        c.handle_event(&InputEvent::KeyDown(Key::Forward));
        c.handle_event(&InputEvent::KeyDown(Key::Fire));
        c.reset();
        assert_eq!(c, PlayerController::default());
        // Release after reset is now a stray release
        assert_eq!(c.handle_event(&InputEvent::KeyUp(Key::Fire)), None);
    }

    #[test]
    fn test_scripted_replays_on_time() {
        let mut c = ScriptedController::new(vec![
            ScriptStep {
                at: 0.5,
                event: InputEvent::KeyUp(Key::Fire),
            },
            ScriptStep {
                at: 0.0,
                event: InputEvent::KeyDown(Key::Fire),
            },
        ]);
        assert_eq!(c.drive(0.1), vec![ShipCommand::Shoot { start: true }]);
        assert!(c.drive(0.1).is_empty());
        assert_eq!(c.drive(0.4), vec![ShipCommand::Shoot { start: false }]);
        assert_eq!(c.remaining(), 0);

        // Live input is ignored
        assert_eq!(c.handle_event(&InputEvent::KeyDown(Key::Left)), None);

        c.reset();
        assert_eq!(c.remaining(), 2);
        assert_eq!(c.drive(0.0), vec![ShipCommand::Shoot { start: true }]);
    }
}
