// Relayout Key Types
// Raw input codes and the physical key catalogue shared by every layout

use std::fmt;
use std::str::FromStr;

/// Represents a single key code as reported by the input subsystem.
///
/// This is a newtype wrapper around u16 for type safety. The numeric values
/// follow browser `keyCode` numbering. A code is not unique per physical
/// key: left and right Shift, Ctrl, Alt and Meta share codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct RawCode(pub u16);

impl RawCode {
    /// Get the raw numeric code value
    pub fn code(self) -> u16 {
        self.0
    }
}

impl From<u16> for RawCode {
    fn from(code: u16) -> Self {
        RawCode(code)
    }
}

impl From<RawCode> for u16 {
    fn from(code: RawCode) -> Self {
        code.0
    }
}

impl fmt::Display for RawCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of physical key positions on the reference keyboard.
pub const CATALOGUE_SIZE: usize = 61;

/// Number of keys in each row, top to bottom.
pub const ROW_LENGTHS: [usize; 5] = [14, 14, 13, 12, 8];

/// One position on the reference keyboard.
///
/// Names follow the conventional US legend of the position; they identify
/// where the key sits, not what it types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalKey {
    pub name: &'static str,
    pub row: u8,
    /// Width in key units (1.0 is a standard alphanumeric key)
    pub width: f32,
}

const fn key(name: &'static str, row: u8, width: f32) -> PhysicalKey {
    PhysicalKey { name, row, width }
}

/// The ordered catalogue of physical key positions.
pub static CATALOGUE: [PhysicalKey; CATALOGUE_SIZE] = [
    // Number row
    key("Grave", 0, 1.0),
    key("Digit1", 0, 1.0),
    key("Digit2", 0, 1.0),
    key("Digit3", 0, 1.0),
    key("Digit4", 0, 1.0),
    key("Digit5", 0, 1.0),
    key("Digit6", 0, 1.0),
    key("Digit7", 0, 1.0),
    key("Digit8", 0, 1.0),
    key("Digit9", 0, 1.0),
    key("Digit0", 0, 1.0),
    key("Minus", 0, 1.0),
    key("Equal", 0, 1.0),
    key("Backspace", 0, 2.0),
    // Top letter row
    key("Tab", 1, 1.5),
    key("Q", 1, 1.0),
    key("W", 1, 1.0),
    key("E", 1, 1.0),
    key("R", 1, 1.0),
    key("T", 1, 1.0),
    key("Y", 1, 1.0),
    key("U", 1, 1.0),
    key("I", 1, 1.0),
    key("O", 1, 1.0),
    key("P", 1, 1.0),
    key("LeftBrace", 1, 1.0),
    key("RightBrace", 1, 1.0),
    key("Backslash", 1, 1.5),
    // Home row
    key("CapsLock", 2, 1.8),
    key("A", 2, 1.0),
    key("S", 2, 1.0),
    key("D", 2, 1.0),
    key("F", 2, 1.0),
    key("G", 2, 1.0),
    key("H", 2, 1.0),
    key("J", 2, 1.0),
    key("K", 2, 1.0),
    key("L", 2, 1.0),
    key("Semicolon", 2, 1.0),
    key("Apostrophe", 2, 1.0),
    key("Enter", 2, 2.2),
    // Bottom letter row
    key("LeftShift", 3, 2.25),
    key("Z", 3, 1.0),
    key("X", 3, 1.0),
    key("C", 3, 1.0),
    key("V", 3, 1.0),
    key("B", 3, 1.0),
    key("N", 3, 1.0),
    key("M", 3, 1.0),
    key("Comma", 3, 1.0),
    key("Period", 3, 1.0),
    key("Slash", 3, 1.0),
    key("RightShift", 3, 2.75),
    // Space row
    key("LeftCtrl", 4, 1.5),
    key("LeftMeta", 4, 1.25),
    key("LeftAlt", 4, 1.25),
    key("Space", 4, 5.75),
    key("RightAlt", 4, 1.25),
    key("RightMeta", 4, 1.25),
    key("Menu", 4, 1.25),
    key("RightCtrl", 4, 1.5),
];

/// Position-based identifier for a key, independent of legend or layout.
///
/// Ids outside `[0, CATALOGUE_SIZE)` can be constructed; layouts reject them
/// with [`crate::LayoutError::OutOfRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct PhysicalKeyId(pub usize);

impl PhysicalKeyId {
    /// Get the catalogue index
    pub fn index(self) -> usize {
        self.0
    }

    /// Iterate every catalogue position in order
    pub fn all() -> impl Iterator<Item = PhysicalKeyId> {
        (0..CATALOGUE_SIZE).map(PhysicalKeyId)
    }

    /// Iterate the positions of one row, left to right
    pub fn row(row: u8) -> impl Iterator<Item = PhysicalKeyId> {
        Self::all().filter(move |id| id.info().map(|k| k.row) == Some(row))
    }

    /// Catalogue entry for this id, if it is in range
    pub fn info(self) -> Option<&'static PhysicalKey> {
        CATALOGUE.get(self.0)
    }

    /// Get the name of this position
    pub fn name(self) -> &'static str {
        self.info().map(|k| k.name).unwrap_or("UNKNOWN")
    }

    /// Look up a position by name (case-insensitive)
    pub fn from_name(name: &str) -> Option<PhysicalKeyId> {
        CATALOGUE
            .iter()
            .position(|k| k.name.eq_ignore_ascii_case(name))
            .map(PhysicalKeyId)
    }
}

impl From<usize> for PhysicalKeyId {
    fn from(index: usize) -> Self {
        PhysicalKeyId(index)
    }
}

impl fmt::Display for PhysicalKeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PhysicalKeyId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown key: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_rows_match_lengths() {
        for (row, &len) in ROW_LENGTHS.iter().enumerate() {
            assert_eq!(PhysicalKeyId::row(row as u8).count(), len);
        }
        assert_eq!(ROW_LENGTHS.iter().sum::<usize>(), CATALOGUE_SIZE);
    }

    #[test]
    fn test_rows_are_fifteen_units_wide() {
        for row in 0..ROW_LENGTHS.len() as u8 {
            let width: f32 = PhysicalKeyId::row(row)
                .filter_map(|id| id.info())
                .map(|k| k.width)
                .sum();
            assert!((width - 15.0).abs() < 1e-4, "row {} is {} wide", row, width);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(PhysicalKeyId::from_name("Grave"), Some(PhysicalKeyId(0)));
        assert_eq!(PhysicalKeyId::from_name("q"), Some(PhysicalKeyId(15)));
        assert_eq!(PhysicalKeyId::from_name("LeftShift"), Some(PhysicalKeyId(41)));
        assert_eq!(PhysicalKeyId::from_name("RightCtrl"), Some(PhysicalKeyId(60)));
        assert_eq!(PhysicalKeyId::from_name("F1"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(PhysicalKeyId(28).to_string(), "CapsLock");
        assert_eq!(PhysicalKeyId(99).to_string(), "UNKNOWN");
        assert_eq!(RawCode(81).to_string(), "81");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("space".parse::<PhysicalKeyId>(), Ok(PhysicalKeyId(56)));
        assert!("nope".parse::<PhysicalKeyId>().is_err());
    }

    #[test]
    fn test_names_are_unique() {
        for id in PhysicalKeyId::all() {
            assert_eq!(PhysicalKeyId::from_name(id.name()), Some(id));
        }
    }
}
