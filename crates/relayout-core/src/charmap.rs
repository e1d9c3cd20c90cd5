// Relayout Character Resolver
// Raw code + modifier mask to the printable string a layout shows

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::{ModifierMask, RawCode};

/// Unshifted legends for browser key codes.
///
/// Codes 173, 61 and 59 are the alternate-dialect spellings of `-`, `=`
/// and `;`; both dialects resolve to the same legends.
const BROWSER_BASE: &[(u16, &str)] = &[
    (192, "`"),
    (49, "1"),
    (50, "2"),
    (51, "3"),
    (52, "4"),
    (53, "5"),
    (54, "6"),
    (55, "7"),
    (56, "8"),
    (57, "9"),
    (48, "0"),
    (189, "-"),
    (173, "-"),
    (187, "="),
    (61, "="),
    (8, "Backspace"),
    (9, "Tab"),
    (81, "q"),
    (87, "w"),
    (69, "e"),
    (82, "r"),
    (84, "t"),
    (89, "y"),
    (85, "u"),
    (73, "i"),
    (79, "o"),
    (80, "p"),
    (219, "["),
    (221, "]"),
    (220, "\\"),
    (20, "Caps Lock"),
    (65, "a"),
    (83, "s"),
    (68, "d"),
    (70, "f"),
    (71, "g"),
    (72, "h"),
    (74, "j"),
    (75, "k"),
    (76, "l"),
    (186, ";"),
    (59, ";"),
    (222, "'"),
    (13, "Enter"),
    (16, "Shift"),
    (90, "z"),
    (88, "x"),
    (67, "c"),
    (86, "v"),
    (66, "b"),
    (78, "n"),
    (77, "m"),
    (188, ","),
    (190, "."),
    (191, "/"),
    (17, "Ctrl"),
    (91, "Meta"),
    (18, "Alt"),
    (32, "Space"),
    (92, "Meta"),
    (93, "Menu"),
];

/// Legends for browser key codes with Shift held.
const BROWSER_SHIFTED: &[(u16, &str)] = &[
    (192, "~"),
    (49, "!"),
    (50, "@"),
    (51, "#"),
    (52, "$"),
    (53, "%"),
    (54, "^"),
    (55, "&"),
    (56, "*"),
    (57, "("),
    (48, ")"),
    (189, "_"),
    (173, "_"),
    (187, "+"),
    (61, "+"),
    (8, "Backspace"),
    (9, "Tab"),
    (81, "Q"),
    (87, "W"),
    (69, "E"),
    (82, "R"),
    (84, "T"),
    (89, "Y"),
    (85, "U"),
    (73, "I"),
    (79, "O"),
    (80, "P"),
    (219, "{"),
    (221, "}"),
    (220, "|"),
    (20, "Caps Lock"),
    (65, "A"),
    (83, "S"),
    (68, "D"),
    (70, "F"),
    (71, "G"),
    (72, "H"),
    (74, "J"),
    (75, "K"),
    (76, "L"),
    (186, ":"),
    (59, ":"),
    (222, "\""),
    (13, "Enter"),
    (16, "Shift"),
    (90, "Z"),
    (88, "X"),
    (67, "C"),
    (86, "V"),
    (66, "B"),
    (78, "N"),
    (77, "M"),
    (188, "<"),
    (190, ">"),
    (191, "?"),
    (17, "Ctrl"),
    (91, "Meta"),
    (18, "Alt"),
    (32, "Space"),
    (92, "Meta"),
    (93, "Menu"),
];

/// Maps a raw code plus modifier mask to the printable character or named
/// key a layout shows for that code.
///
/// Only the Shift bit selects between the two tables. Ctrl, Alt and Meta
/// are ignored, so Ctrl+A resolves to the same string as A.
#[derive(Debug, Clone, Default)]
pub struct CharacterResolver {
    unshifted: HashMap<RawCode, String>,
    shifted: HashMap<RawCode, String>,
}

impl CharacterResolver {
    /// Create a resolver from unshifted and shifted tables
    pub fn new<I, J, S>(unshifted: I, shifted: J) -> Self
    where
        I: IntoIterator<Item = (RawCode, S)>,
        J: IntoIterator<Item = (RawCode, S)>,
        S: Into<String>,
    {
        Self {
            unshifted: unshifted.into_iter().map(|(c, s)| (c, s.into())).collect(),
            shifted: shifted.into_iter().map(|(c, s)| (c, s.into())).collect(),
        }
    }

    /// Shared resolver for browser key codes, used by the built-in layouts
    pub fn browser() -> Arc<CharacterResolver> {
        static BROWSER: OnceLock<Arc<CharacterResolver>> = OnceLock::new();
        BROWSER
            .get_or_init(|| {
                let table = |pairs: &[(u16, &'static str)]| {
                    pairs
                        .iter()
                        .map(|&(code, s)| (RawCode(code), s))
                        .collect::<Vec<_>>()
                };
                Arc::new(CharacterResolver::new(
                    table(BROWSER_BASE),
                    table(BROWSER_SHIFTED),
                ))
            })
            .clone()
    }

    /// Resolve a code to its printable string.
    ///
    /// `None` means the code has no printable representation under this
    /// modifier state; callers ignore such keys.
    pub fn resolve(&self, code: RawCode, modifiers: ModifierMask) -> Option<&str> {
        let table = if modifiers.is_shift() {
            &self.shifted
        } else {
            &self.unshifted
        };
        table.get(&code).map(String::as_str)
    }

    /// Unshifted string for a code
    pub fn unshifted(&self, code: RawCode) -> Option<&str> {
        self.resolve(code, ModifierMask::NONE)
    }

    /// Shifted string for a code
    pub fn shifted(&self, code: RawCode) -> Option<&str> {
        self.resolve(code, ModifierMask::SHIFT)
    }

    /// Number of distinct codes with a mapping in either table
    pub fn len(&self) -> usize {
        self.unshifted.len()
            + self
                .shifted
                .keys()
                .filter(|code| !self.unshifted.contains_key(code))
                .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
