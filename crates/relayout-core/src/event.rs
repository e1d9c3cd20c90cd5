// Relayout Key Events
// Raw input transitions and the translated events delivered to observers

use std::fmt;
use std::sync::Arc;

use crate::layout::PhysicalKeyIds;
use crate::{Action, LayoutTable, ModifierMask, RawCode};

/// A raw key transition as reported by the host's input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyInput {
    pub raw_code: RawCode,
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
    pub action: Action,
}

impl RawKeyInput {
    /// A press with no modifiers held
    pub fn press(raw_code: impl Into<RawCode>) -> Self {
        Self::new(raw_code, Action::Press)
    }

    /// A release with no modifiers held
    pub fn release(raw_code: impl Into<RawCode>) -> Self {
        Self::new(raw_code, Action::Release)
    }

    fn new(raw_code: impl Into<RawCode>, action: Action) -> Self {
        Self {
            raw_code: raw_code.into(),
            shift: false,
            ctrl: false,
            alt: false,
            meta: false,
            action,
        }
    }

    /// Set the modifier flags from a mask
    #[must_use]
    pub fn with_modifiers(mut self, mask: ModifierMask) -> Self {
        use crate::Modifier;
        self.shift = mask.contains(Modifier::Shift);
        self.ctrl = mask.contains(Modifier::Ctrl);
        self.alt = mask.contains(Modifier::Alt);
        self.meta = mask.contains(Modifier::Meta);
        self
    }

    /// The modifier mask for this transition
    pub fn modifier_mask(&self) -> ModifierMask {
        ModifierMask::from_flags(self.shift, self.ctrl, self.alt, self.meta)
    }
}

/// A translated key press or release.
///
/// Immutable once built. The event keeps the layout it was encoded with so
/// observers can derive physical keys and printable strings after later
/// layout swaps.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    layout: Arc<LayoutTable>,
    raw_code: RawCode,
    modifiers: ModifierMask,
    action: Action,
}

impl KeyEvent {
    pub fn new(
        layout: Arc<LayoutTable>,
        raw_code: RawCode,
        modifiers: ModifierMask,
        pressed: bool,
    ) -> Self {
        Self {
            layout,
            raw_code,
            modifiers,
            action: Action::from_pressed(pressed),
        }
    }

    pub fn raw_code(&self) -> RawCode {
        self.raw_code
    }

    pub fn modifier_mask(&self) -> ModifierMask {
        self.modifiers
    }

    pub fn is_pressed(&self) -> bool {
        self.action.is_pressed()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    /// The layout this event was encoded with
    pub fn layout(&self) -> &Arc<LayoutTable> {
        &self.layout
    }

    /// Physical keys on the event's layout that produce its code
    pub fn physical_key_ids(&self) -> PhysicalKeyIds {
        self.layout.decode(self.raw_code)
    }

    /// The printable string for this event, if any
    pub fn printable_string(&self) -> Option<&str> {
        self.layout.resolver().resolve(self.raw_code, self.modifiers)
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} [{}] on {}",
            self.action, self.raw_code, self.modifiers, self.layout
        )
    }
}
