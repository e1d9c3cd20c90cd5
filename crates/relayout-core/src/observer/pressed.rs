// Relayout Pressed Key State
// Physical keys currently held, as seen through translated events

use std::collections::HashMap;

use crate::{KeyEvent, Modifier, ModifierMask, PhysicalKeyId, RawCode};

/// Tracks pressed physical keys with O(1) lookup.
///
/// A code shared by several physical keys marks all of them; the input
/// cannot tell which one was actually pressed.
#[derive(Debug, Clone, Default)]
pub struct PressedKeys {
    pressed: HashMap<PhysicalKeyId, RawCode>,
}

impl PressedKeys {
    /// Create a new empty pressed key state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a translated event.
    ///
    /// Returns the physical keys the event affected; empty when the code is
    /// not on the event's layout.
    pub fn record(&mut self, event: &KeyEvent) -> Vec<PhysicalKeyId> {
        let ids = event.physical_key_ids();
        for &id in &ids {
            if event.is_pressed() {
                self.pressed.insert(id, event.raw_code());
            } else {
                self.pressed.remove(&id);
            }
        }
        ids.into_vec()
    }

    /// Check if a physical key is currently pressed
    pub fn is_pressed(&self, id: PhysicalKeyId) -> bool {
        self.pressed.contains_key(&id)
    }

    /// All pressed keys in catalogue order
    pub fn pressed(&self) -> Vec<PhysicalKeyId> {
        let mut ids: Vec<PhysicalKeyId> = self.pressed.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Modifiers implied by the held keys
    pub fn held_modifiers(&self) -> ModifierMask {
        self.pressed
            .values()
            .filter_map(|&code| Modifier::from_code(code))
            .fold(ModifierMask::NONE, |mask, m| mask.with(m))
    }

    /// Check if Shift is held, which switches a keyboard's label set
    pub fn shift_held(&self) -> bool {
        self.held_modifiers().is_shift()
    }

    pub fn len(&self) -> usize {
        self.pressed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pressed.is_empty()
    }

    /// Clear all pressed keys
    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
