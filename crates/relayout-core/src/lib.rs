// Relayout Core Library
// Key translation between physical keyboard layouts

pub mod action;
pub mod charmap;
pub mod event;
pub mod hook;
pub mod key;
pub mod layout;
pub mod modifier;
pub mod observer;
pub mod settings;

pub use action::Action;
pub use charmap::CharacterResolver;
pub use event::{KeyEvent, RawKeyInput};
pub use hook::{HookOutcome, Observer, ObserverId, SharedTranslationHook, TranslationHook};
pub use key::{PhysicalKey, PhysicalKeyId, RawCode, CATALOGUE_SIZE};
pub use layout::{Dialect, LayoutError, LayoutName, LayoutTable, PhysicalKeyIds};
pub use modifier::{is_modifier_code, Modifier, ModifierMask};
pub use observer::{PressedKeys, TextCapture};
pub use settings::{Settings, SettingsError};
