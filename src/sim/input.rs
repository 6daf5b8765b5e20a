//! Keyboard state keyed by `KeyboardEvent.key`

use std::collections::HashMap;

use glam::Vec2;

pub const ARROW_UP: &str = "ArrowUp";
pub const ARROW_DOWN: &str = "ArrowDown";
pub const ARROW_LEFT: &str = "ArrowLeft";
pub const ARROW_RIGHT: &str = "ArrowRight";

/// Held keys. Last write per key wins.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    keys: HashMap<String, bool>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.set(key, true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.set(key, false);
    }

    pub fn set(&mut self, key: &str, pressed: bool) {
        match self.keys.get_mut(key) {
            Some(state) => *state = pressed,
            None => {
                self.keys.insert(key.to_string(), pressed);
            }
        }
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }

    /// Release everything (used when leaving the game screen)
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    /// Movement direction from the arrow keys, -1/0/1 per axis.
    /// Opposite keys cancel. Screen y grows downward.
    pub fn arrow_axis(&self) -> Vec2 {
        let axis = |neg: &str, pos: &str| -> f32 {
            let mut v = 0.0;
            if self.is_down(neg) {
                v -= 1.0;
            }
            if self.is_down(pos) {
                v += 1.0;
            }
            v
        };
        Vec2::new(axis(ARROW_LEFT, ARROW_RIGHT), axis(ARROW_UP, ARROW_DOWN))
    }

    /// Whether a key is one the game consumes
    pub fn is_game_key(key: &str) -> bool {
        matches!(key, ARROW_UP | ARROW_DOWN | ARROW_LEFT | ARROW_RIGHT)
    }
}
