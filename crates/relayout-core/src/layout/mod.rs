// Relayout Layout Tables
// Bidirectional mapping between physical key positions and raw codes

pub mod dvorak;
pub mod qwerty;

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;
use strum_macros::{Display, EnumIter, EnumString};

use crate::key::CATALOGUE_SIZE;
use crate::{CharacterResolver, ModifierMask, PhysicalKeyId, RawCode};

/// Physical ids sharing one raw code. Almost always one or two entries.
pub type PhysicalKeyIds = SmallVec<[PhysicalKeyId; 2]>;

/// Errors that can occur when building or querying layouts
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("physical key id {id} outside catalogue of {size} keys")]
    OutOfRange { id: usize, size: usize },

    #[error("layout '{name}' has {found} codes, expected {expected}")]
    CatalogueSize {
        name: String,
        expected: usize,
        found: usize,
    },

    #[error("Unknown layout: {0}")]
    UnknownLayout(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}

/// Key-code dialect reported by the host.
///
/// The two dialects differ only in the codes for `-`, `=` and `;`. The host
/// picks one when it builds its layouts; it is never re-evaluated per event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Dialect {
    #[default]
    Standard,
    Alternate,
}

impl Dialect {
    pub fn from_name(name: &str) -> Result<Self, LayoutError> {
        name.parse()
            .map_err(|_| LayoutError::UnknownDialect(name.to_string()))
    }
}

/// The built-in named layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LayoutName {
    Qwerty,
    Dvorak,
}

impl LayoutName {
    pub fn from_name(name: &str) -> Result<Self, LayoutError> {
        name.parse()
            .map_err(|_| LayoutError::UnknownLayout(name.to_string()))
    }

    /// Build this layout's table for a dialect
    pub fn table(self, dialect: Dialect) -> Arc<LayoutTable> {
        let codes = match self {
            LayoutName::Qwerty => qwerty::codes(dialect),
            LayoutName::Dvorak => dvorak::codes(dialect),
        };
        Arc::new(LayoutTable {
            name: self.to_string(),
            codes: codes.iter().copied().map(RawCode).collect(),
            resolver: CharacterResolver::browser(),
        })
    }
}

/// Static mapping between physical key ids and raw codes for one layout,
/// paired with the resolver that supplies its legends.
///
/// Immutable after construction. Several physical keys may share a code
/// (left/right Shift, Ctrl, Alt, Meta), so [`LayoutTable::decode`] is
/// set-valued.
#[derive(Debug, Clone)]
pub struct LayoutTable {
    name: String,
    codes: Vec<RawCode>,
    resolver: Arc<CharacterResolver>,
}

impl LayoutTable {
    /// Create a custom layout.
    ///
    /// `codes[i]` is the raw code physical key `i` produces; there must be
    /// exactly one per catalogue position.
    pub fn new<I>(
        name: impl Into<String>,
        codes: I,
        resolver: Arc<CharacterResolver>,
    ) -> Result<Self, LayoutError>
    where
        I: IntoIterator,
        I::Item: Into<RawCode>,
    {
        let name = name.into();
        let codes: Vec<RawCode> = codes.into_iter().map(Into::into).collect();
        if codes.len() != CATALOGUE_SIZE {
            return Err(LayoutError::CatalogueSize {
                name,
                expected: CATALOGUE_SIZE,
                found: codes.len(),
            });
        }
        Ok(Self {
            name,
            codes,
            resolver,
        })
    }

    /// Get the name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the resolver for this layout's legends
    pub fn resolver(&self) -> &CharacterResolver {
        &self.resolver
    }

    /// Raw code produced by a physical key.
    ///
    /// An id outside the catalogue is a data-model inconsistency and fails
    /// with [`LayoutError::OutOfRange`].
    pub fn encode(&self, id: PhysicalKeyId) -> Result<RawCode, LayoutError> {
        self.codes
            .get(id.index())
            .copied()
            .ok_or(LayoutError::OutOfRange {
                id: id.index(),
                size: self.codes.len(),
            })
    }

    /// Every physical key producing `code`, in catalogue order.
    ///
    /// Empty when no key on this layout produces the code.
    pub fn decode(&self, code: RawCode) -> PhysicalKeyIds {
        self.codes
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == code)
            .map(|(i, _)| PhysicalKeyId(i))
            .collect()
    }

    /// Check if any physical key produces `code`
    pub fn produces(&self, code: RawCode) -> bool {
        self.codes.contains(&code)
    }

    /// Legend this layout shows on a physical key for a modifier state
    pub fn label(
        &self,
        id: PhysicalKeyId,
        modifiers: ModifierMask,
    ) -> Result<Option<&str>, LayoutError> {
        let code = self.encode(id)?;
        Ok(self.resolver.resolve(code, modifiers))
    }

    /// Find the code (and Shift state) that types `text` on this layout.
    ///
    /// Scans the catalogue in order, unshifted legends first.
    pub fn reverse(&self, text: &str) -> Option<(RawCode, ModifierMask)> {
        [ModifierMask::NONE, ModifierMask::SHIFT]
            .into_iter()
            .find_map(|mask| {
                self.codes
                    .iter()
                    .find(|&&code| self.resolver.resolve(code, mask) == Some(text))
                    .map(|&code| (code, mask))
            })
    }
}

impl fmt::Display for LayoutTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn id(name: &str) -> PhysicalKeyId {
        PhysicalKeyId::from_name(name).unwrap()
    }

    #[test]
    fn test_encode_qwerty() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        assert_eq!(qwerty.encode(id("Q")), Ok(RawCode(81)));
        assert_eq!(qwerty.encode(id("Space")), Ok(RawCode(32)));
        assert_eq!(qwerty.encode(id("Minus")), Ok(RawCode(189)));
    }

    #[test]
    fn test_encode_out_of_range() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        assert_eq!(
            qwerty.encode(PhysicalKeyId(CATALOGUE_SIZE)),
            Err(LayoutError::OutOfRange { id: 61, size: 61 })
        );
    }

    #[test]
    fn test_decode_shared_codes() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        let shift = qwerty.decode(RawCode(16));
        assert_eq!(shift.as_slice(), &[id("LeftShift"), id("RightShift")]);
        let ctrl = qwerty.decode(RawCode(17));
        assert_eq!(ctrl.as_slice(), &[id("LeftCtrl"), id("RightCtrl")]);
        let alt = qwerty.decode(RawCode(18));
        assert_eq!(alt.as_slice(), &[id("LeftAlt"), id("RightAlt")]);
    }

    #[test]
    fn test_decode_unknown_is_empty() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        assert!(qwerty.decode(RawCode(999)).is_empty());
        assert!(qwerty.decode(RawCode(112)).is_empty());
        // Alternate-dialect code is not produced by a standard table
        assert!(qwerty.decode(RawCode(173)).is_empty());
    }

    #[test]
    fn test_dialects_differ_only_in_three_keys() {
        for name in LayoutName::iter() {
            let standard = name.table(Dialect::Standard);
            let alternate = name.table(Dialect::Alternate);
            let differing: Vec<PhysicalKeyId> = PhysicalKeyId::all()
                .filter(|&p| standard.encode(p) != alternate.encode(p))
                .collect();
            assert_eq!(differing.len(), 3, "layout {}", name);
            for p in differing {
                let s = standard.label(p, ModifierMask::NONE).unwrap();
                let a = alternate.label(p, ModifierMask::NONE).unwrap();
                assert_eq!(s, a);
                assert!(matches!(s, Some("-") | Some("=") | Some(";")));
            }
        }
    }

    #[test]
    fn test_dvorak_labels() {
        let dvorak = LayoutName::Dvorak.table(Dialect::Standard);
        assert_eq!(dvorak.label(id("Q"), ModifierMask::NONE), Ok(Some("'")));
        assert_eq!(dvorak.label(id("Q"), ModifierMask::SHIFT), Ok(Some("\"")));
        assert_eq!(dvorak.label(id("S"), ModifierMask::NONE), Ok(Some("o")));
        assert_eq!(dvorak.label(id("Z"), ModifierMask::NONE), Ok(Some(";")));
        assert_eq!(dvorak.label(id("Minus"), ModifierMask::NONE), Ok(Some("[")));
    }

    #[test]
    fn test_reverse() {
        let qwerty = LayoutName::Qwerty.table(Dialect::Standard);
        assert_eq!(qwerty.reverse("q"), Some((RawCode(81), ModifierMask::NONE)));
        assert_eq!(qwerty.reverse("Q"), Some((RawCode(81), ModifierMask::SHIFT)));
        assert_eq!(qwerty.reverse("-"), Some((RawCode(189), ModifierMask::NONE)));
        assert_eq!(qwerty.reverse("é"), None);

        let alternate = LayoutName::Qwerty.table(Dialect::Alternate);
        assert_eq!(alternate.reverse(":"), Some((RawCode(59), ModifierMask::SHIFT)));
    }

    #[test]
    fn test_custom_layout_size_checked() {
        let err = LayoutTable::new("short", vec![1u16, 2, 3], CharacterResolver::browser())
            .unwrap_err();
        assert_eq!(
            err,
            LayoutError::CatalogueSize {
                name: "short".to_string(),
                expected: CATALOGUE_SIZE,
                found: 3,
            }
        );

        let custom = LayoutTable::new(
            "mirror",
            qwerty::STANDARD.iter().rev().copied(),
            CharacterResolver::browser(),
        )
        .unwrap();
        assert_eq!(custom.name(), "mirror");
        assert_eq!(custom.encode(PhysicalKeyId(0)), Ok(RawCode(17)));
    }

    #[test]
    fn test_layout_and_dialect_names() {
        assert_eq!(LayoutName::from_name("DVORAK"), Ok(LayoutName::Dvorak));
        assert_eq!(LayoutName::Qwerty.to_string(), "qwerty");
        assert_eq!(
            LayoutName::from_name("colemak"),
            Err(LayoutError::UnknownLayout("colemak".to_string()))
        );
        assert_eq!(Dialect::from_name("Alternate"), Ok(Dialect::Alternate));
        assert_eq!(Dialect::default(), Dialect::Standard);
        assert!(Dialect::from_name("ie8").is_err());
    }
}
