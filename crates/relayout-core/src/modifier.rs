// Relayout Modifier System
// Modifier keys (Shift, Ctrl, Alt, Meta) and the bitmask carried by events

use std::fmt;
use std::ops::BitOr;

use strum_macros::{Display, EnumIter, EnumString};

use crate::RawCode;

/// Represents a keyboard modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Modifier {
    Shift,
    Ctrl,
    Alt,
    Meta,
}

impl Modifier {
    /// The bit this modifier occupies in a [`ModifierMask`]
    pub const fn bit(self) -> u8 {
        match self {
            Modifier::Shift => 1,
            Modifier::Ctrl => 2,
            Modifier::Alt => 4,
            Modifier::Meta => 8,
        }
    }

    /// Raw codes reported for this modifier's keys
    pub const fn codes(self) -> &'static [u16] {
        match self {
            Modifier::Shift => &[16],
            Modifier::Ctrl => &[17],
            Modifier::Alt => &[18],
            Modifier::Meta => &[91, 92],
        }
    }

    /// Get modifier by raw code
    pub fn from_code(code: RawCode) -> Option<Modifier> {
        use strum::IntoEnumIterator;
        Modifier::iter().find(|m| m.codes().contains(&code.code()))
    }
}

/// Check if a raw code belongs to a modifier key
#[inline]
pub fn is_modifier_code(code: RawCode) -> bool {
    Modifier::from_code(code).is_some()
}

/// Bitset of simultaneously held modifiers: Shift=1, Ctrl=2, Alt=4, Meta=8.
///
/// Only Shift takes part in character resolution; the other bits are
/// carried through to observers unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct ModifierMask(u8);

impl ModifierMask {
    pub const NONE: ModifierMask = ModifierMask(0);
    pub const SHIFT: ModifierMask = ModifierMask(1);
    pub const CTRL: ModifierMask = ModifierMask(2);
    pub const ALT: ModifierMask = ModifierMask(4);
    pub const META: ModifierMask = ModifierMask(8);

    const ALL_BITS: u8 = 0x0f;

    /// Build a mask from raw bits; bits above Meta are dropped
    pub const fn from_bits(bits: u8) -> Self {
        ModifierMask(bits & Self::ALL_BITS)
    }

    /// Build a mask from the four modifier flags of an input transition
    pub const fn from_flags(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        ModifierMask(
            (shift as u8) * Modifier::Shift.bit()
                | (ctrl as u8) * Modifier::Ctrl.bit()
                | (alt as u8) * Modifier::Alt.bit()
                | (meta as u8) * Modifier::Meta.bit(),
        )
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    pub const fn is_shift(self) -> bool {
        self.contains(Modifier::Shift)
    }

    #[must_use]
    pub const fn with(self, modifier: Modifier) -> Self {
        ModifierMask(self.0 | modifier.bit())
    }

    #[must_use]
    pub const fn without(self, modifier: Modifier) -> Self {
        ModifierMask(self.0 & !modifier.bit())
    }

    /// Modifiers present in this mask, in bit order
    pub fn iter(self) -> impl Iterator<Item = Modifier> {
        use strum::IntoEnumIterator;
        Modifier::iter().filter(move |m| self.contains(*m))
    }
}

impl From<Modifier> for ModifierMask {
    fn from(modifier: Modifier) -> Self {
        ModifierMask(modifier.bit())
    }
}

impl BitOr for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: Self) -> Self::Output {
        ModifierMask(self.0 | rhs.0)
    }
}

impl BitOr<Modifier> for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: Modifier) -> Self::Output {
        self.with(rhs)
    }
}

impl fmt::Display for ModifierMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let names: Vec<String> = self.iter().map(|m| m.to_string()).collect();
        write!(f, "{}", names.join("+"))
    }
}
