//! Keyboard state
//!
//! Browser key events update a set of held keys; the simulation reads it once
//! per tick through `sample`, which copies the relevant bits into a
//! `TickInput` so a tick never sees a half-updated set.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Key identifiers (lowercased `KeyboardEvent.key`) for each direction
pub const LEFT_KEYS: [&str; 2] = ["arrowleft", "a"];
pub const RIGHT_KEYS: [&str; 2] = ["arrowright", "d"];
pub const UP_KEYS: [&str; 2] = ["arrowup", "w"];
pub const DOWN_KEYS: [&str; 2] = ["arrowdown", "s"];

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashSet<String>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key was not already held.
    pub fn press(&mut self, key: &str) -> bool {
        self.keys.insert(key.to_lowercase())
    }

    /// Record a key release
    pub fn release(&mut self, key: &str) {
        self.keys.remove(&key.to_lowercase());
    }

    /// Drop everything (focus lost, reset)
    pub fn clear(&mut self) {
        self.keys.clear();
    }

    fn any_held(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.keys.contains(*k))
    }

    /// Snapshot the directional state for one tick
    pub fn sample(&self) -> TickInput {
        TickInput {
            left: self.any_held(&LEFT_KEYS),
            right: self.any_held(&RIGHT_KEYS),
            up: self.any_held(&UP_KEYS),
            down: self.any_held(&DOWN_KEYS),
        }
    }
}
