use std::collections::HashMap;

pub const LEFT_KEYS: [&str; 2] = ["ArrowLeft", "a"];
pub const RIGHT_KEYS: [&str; 2] = ["ArrowRight", "d"];
pub const JUMP_KEYS: [&str; 3] = [" ", "ArrowUp", "w"];

/// Held state per `KeyboardEvent.key`, written by the key listeners.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashMap<String, bool>,
}

/// What the simulation sees for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_string(), true);
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.get(key).copied().unwrap_or(false)
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.is_held(key))
    }

    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
            jump: self.any_held(&JUMP_KEYS),
        }
    }

    pub fn held_count(&self) -> usize {
        self.held.values().filter(|held| **held).count()
    }
}
