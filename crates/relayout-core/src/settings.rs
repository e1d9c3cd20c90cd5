// Relayout Settings Module
// Which layouts to translate between, loaded from TOML

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{Dialect, LayoutName, LayoutTable, TranslationHook};

/// Settings selecting the hardware layout, the simulated layout, and the
/// host's key-code dialect.
///
/// These settings are loaded from a TOML file (default:
/// ~/.config/relayout/settings.toml):
///
/// ```toml
/// [layout]
/// input = "qwerty"
/// output = "dvorak"
/// dialect = "standard"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    input: LayoutName,
    output: LayoutName,
    dialect: Dialect,

    /// Path to the settings file (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    layout: Option<LayoutSettings>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LayoutSettings {
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    dialect: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// QWERTY hardware simulating Dvorak, standard dialect
    pub fn new() -> Self {
        Self {
            input: LayoutName::Qwerty,
            output: LayoutName::Dvorak,
            dialect: Dialect::Standard,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(layout) = toml_settings.layout {
            if let Some(input) = layout.input {
                settings.input = parse_layout(&input)?;
            }
            if let Some(output) = layout.output {
                settings.output = parse_layout(&output)?;
            }
            if let Some(dialect) = layout.dialect {
                settings.dialect = Dialect::from_name(&dialect)
                    .map_err(|e| SettingsError::InvalidValue(e.to_string()))?;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("relayout").join("settings.toml"))
    }

    /// Load from default location (~/.config/relayout/settings.toml)
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        // Return default settings if file doesn't exist
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn input(&self) -> LayoutName {
        self.input
    }

    pub fn output(&self) -> LayoutName {
        self.output
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn set_input(&mut self, input: LayoutName) {
        self.input = input;
    }

    pub fn set_output(&mut self, output: LayoutName) {
        self.output = output;
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    /// The hardware layout table for the configured dialect
    pub fn input_table(&self) -> Arc<LayoutTable> {
        self.input.table(self.dialect)
    }

    /// The simulated layout table for the configured dialect
    pub fn output_table(&self) -> Arc<LayoutTable> {
        self.output.table(self.dialect)
    }

    /// Build a hook translating between the configured layouts
    pub fn build_hook(&self) -> TranslationHook {
        TranslationHook::new(self.input_table(), self.output_table())
    }
}

fn parse_layout(name: &str) -> Result<LayoutName, SettingsError> {
    LayoutName::from_name(name).map_err(|e| SettingsError::InvalidValue(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ModifierMask, RawCode};

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.input(), LayoutName::Qwerty);
        assert_eq!(settings.output(), LayoutName::Dvorak);
        assert_eq!(settings.dialect(), Dialect::Standard);
        assert!(settings.source_path().is_none());
    }

    #[test]
    fn test_from_toml() {
        let settings = Settings::from_toml(
            r#"
            [layout]
            input = "Dvorak"
            output = "qwerty"
            dialect = "alternate"
            "#,
        )
        .unwrap();
        assert_eq!(settings.input(), LayoutName::Dvorak);
        assert_eq!(settings.output(), LayoutName::Qwerty);
        assert_eq!(settings.dialect(), Dialect::Alternate);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("[layout]\ndialect = \"alternate\"\n").unwrap();
        assert_eq!(settings.input(), LayoutName::Qwerty);
        assert_eq!(settings.output(), LayoutName::Dvorak);

        let empty = Settings::from_toml("").unwrap();
        assert_eq!(empty, Settings::new());
    }

    #[test]
    fn test_invalid_values() {
        let err = Settings::from_toml("[layout]\ninput = \"colemak\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));

        let err = Settings::from_toml("[layout]\ndialect = \"ie8\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));

        let err = Settings::from_toml("[keyboard]\ntype = \"iso\"\n").unwrap_err();
        assert!(matches!(err, SettingsError::TomlParse(_)));
    }

    #[test]
    fn test_reload_without_source() {
        let mut settings = Settings::new();
        assert!(matches!(settings.reload(), Err(SettingsError::InvalidValue(_))));
    }

    #[test]
    fn test_from_file_and_reload() {
        let path = std::env::temp_dir().join(format!(
            "relayout-settings-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[layout]\noutput = \"qwerty\"\n").unwrap();

        let mut settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.output(), LayoutName::Qwerty);
        assert_eq!(settings.source_path(), Some(path.as_path()));

        std::fs::write(&path, "[layout]\noutput = \"dvorak\"\n").unwrap();
        settings.reload().unwrap();
        assert_eq!(settings.output(), LayoutName::Dvorak);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_build_hook_uses_dialect() {
        let mut settings = Settings::new();
        settings.set_dialect(Dialect::Alternate);
        let hook = settings.build_hook();
        // Alternate-dialect semicolon on QWERTY hardware lands on Dvorak's S
        let event = hook
            .translate(RawCode(59), ModifierMask::NONE, true)
            .unwrap()
            .unwrap();
        assert_eq!(event.raw_code(), RawCode(83));
        assert_eq!(event.printable_string(), Some("s"));
    }
}
