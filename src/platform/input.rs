//! Input capture
//!
//! Host events arrive at any time; the simulation only ever sees one
//! `TickInput` per tick. Presses are latched until the next snapshot so a
//! tap shorter than a tick is never lost.

use glam::Vec2;

use crate::sim::TickInput;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Jump,
    Fire,
}

impl Key {
    /// Map a DOM-style key name (`KeyboardEvent.key`) to a button
    pub fn from_key_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "a" | "arrowleft" => Some(Key::Left),
            "d" | "arrowright" => Some(Key::Right),
            "w" | " " | "arrowup" => Some(Key::Jump),
            "f" => Some(Key::Fire),
            _ => None,
        }
    }
}

/// Accumulated input between two ticks
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    jump_held: bool,
    fire_key: bool,
    pointer_down: bool,
    jump_latched: bool,
    fire_latched: bool,
    aim: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            Key::Jump => {
                // Ignore auto-repeat
                if !self.jump_held {
                    self.jump_latched = true;
                }
                self.jump_held = true;
            }
            Key::Fire => {
                if !self.fire_key {
                    self.fire_latched = true;
                }
                self.fire_key = true;
            }
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            Key::Jump => self.jump_held = false,
            Key::Fire => self.fire_key = false,
        }
    }

    /// Pointer position in screen space
    pub fn pointer_move(&mut self, pos: Vec2) {
        self.aim = pos;
    }

    pub fn pointer_down(&mut self, pos: Vec2) {
        self.aim = pos;
        if !self.pointer_down {
            self.fire_latched = true;
        }
        self.pointer_down = true;
    }

    pub fn pointer_up(&mut self) {
        self.pointer_down = false;
    }

    /// Release everything, e.g. when the window loses focus
    pub fn clear(&mut self) {
        *self = Self {
            aim: self.aim,
            ..Self::default()
        };
    }

    /// Input for the next tick; clears the one-shot latches
    pub fn snapshot(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            jump: self.jump_latched,
            fire: self.fire_latched,
            fire_held: self.fire_key || self.pointer_down,
            aim: self.aim,
        };
        self.jump_latched = false;
        self.fire_latched = false;
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_key_name("A"), Some(Key::Left));
        assert_eq!(Key::from_key_name("ArrowRight"), Some(Key::Right));
        assert_eq!(Key::from_key_name(" "), Some(Key::Jump));
        assert_eq!(Key::from_key_name("f"), Some(Key::Fire));
        assert_eq!(Key::from_key_name("Escape"), None);
    }

    #[test]
    fn test_jump_is_edge_triggered() {
        let mut input = InputState::new();
        input.key_down(Key::Jump);
        assert!(input.snapshot().jump);
        // Still held, auto-repeat arrives
        input.key_down(Key::Jump);
        assert!(!input.snapshot().jump);

        input.key_up(Key::Jump);
        input.key_down(Key::Jump);
        assert!(input.snapshot().jump);
    }

    #[test]
    fn test_tap_between_ticks_is_kept() {
        let mut input = InputState::new();
        input.pointer_down(Vec2::new(10.0, 20.0));
        input.pointer_up();
        let tick = input.snapshot();
        assert!(tick.fire);
        assert!(!tick.fire_held);
        assert_eq!(tick.aim, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_held_fire() {
        let mut input = InputState::new();
        input.key_down(Key::Fire);
        assert!(input.snapshot().fire);
        let tick = input.snapshot();
        assert!(!tick.fire);
        assert!(tick.fire_held);
    }

    #[test]
    fn test_clear_keeps_aim() {
        let mut input = InputState::new();
        input.pointer_move(Vec2::new(5.0, 5.0));
        input.key_down(Key::Left);
        input.clear();
        let tick = input.snapshot();
        assert!(!tick.left);
        assert_eq!(tick.aim, Vec2::new(5.0, 5.0));
    }
}
