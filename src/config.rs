//! Configuration constants and settings loading for docbind
//!
//! Settings live in an INI file. Every key is optional; a missing file
//! means defaults everywhere.
//!
//! ```ini
//! [editor]
//! tab_size = 2
//! line_wrap = true
//! line_numbers = false
//!
//! [factory]
//! name = Editor
//! file_types = markdown, python, *
//! default_for = markdown, *
//! read_only = false
//! ```

use std::path::Path;

use ini::{Ini, Properties};

use crate::document::editor::EditorConfig;
use crate::document::errors::{DocumentError, Result};
use crate::document::factory::{WidgetCapabilities, WidgetFactoryOptions};

/// Default settings file path for docbind
pub const DEFAULT_CONFIG_PATH: &str = "~/.docbind/config";

/// Environment variable name for overriding the settings path
pub const CONFIG_PATH_ENV_VAR: &str = "DOCBIND_CONFIG_PATH";

/// Environment variable holding the log level (trace, debug, info, warn, error)
pub const LOG_LEVEL_ENV_VAR: &str = "DOCBIND_LOG_LEVEL";

/// Get the settings file path, checking environment variable first, then falling back to default
pub fn get_config_path() -> String {
    std::env::var_os(CONFIG_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}

/// Log level from the environment, `error` when unset or unknown
pub fn get_log_level() -> tracing::Level {
    let raw = std::env::var(LOG_LEVEL_ENV_VAR)
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    match raw.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    }
}

/// Widget factory section of the settings file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorySettings {
    pub name: String,
    pub file_types: Vec<String>,
    pub default_for: Vec<String>,
    pub read_only: bool,
}

impl Default for FactorySettings {
    fn default() -> Self {
        Self {
            name: "Editor".to_string(),
            file_types: vec!["markdown".to_string(), "*".to_string()],
            default_for: vec!["markdown".to_string(), "*".to_string()],
            read_only: false,
        }
    }
}

/// Everything read from the settings file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub editor: EditorConfig,
    pub factory: FactorySettings,
}

impl Settings {
    /// Load settings from `path` (`~` is expanded). A missing file yields defaults.
    pub fn load(path: &str) -> Result<Self> {
        let expanded = shellexpand::tilde(path).into_owned();
        if !Path::new(&expanded).exists() {
            tracing::debug!("Settings: '{}' not found, using defaults", expanded);
            return Ok(Self::default());
        }

        tracing::debug!("Settings: loading '{}'", expanded);
        let ini = Ini::load_from_file(&expanded)
            .map_err(|e| DocumentError::Config(format!("{expanded}: {e}")))?;
        Self::from_ini(&ini)
    }

    /// Parse settings from INI text
    pub fn parse(text: &str) -> Result<Self> {
        let ini = Ini::load_from_str(text).map_err(|e| DocumentError::Config(e.to_string()))?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(editor) = ini.section(Some("editor")) {
            if let Some(tab_size) = editor.get("tab_size") {
                settings.editor.tab_size = tab_size.trim().parse().map_err(|_| {
                    DocumentError::Config(format!("editor.tab_size: invalid number '{tab_size}'"))
                })?;
            }
            if let Some(value) = parse_flag(editor, "editor", "line_wrap")? {
                settings.editor.line_wrap = value;
            }
            if let Some(value) = parse_flag(editor, "editor", "line_numbers")? {
                settings.editor.line_numbers = value;
            }
        }

        if let Some(factory) = ini.section(Some("factory")) {
            if let Some(name) = factory.get("name") {
                settings.factory.name = name.trim().to_string();
            }
            if let Some(types) = factory.get("file_types") {
                settings.factory.file_types = parse_list(types);
            }
            if let Some(types) = factory.get("default_for") {
                settings.factory.default_for = parse_list(types);
            }
            if let Some(value) = parse_flag(factory, "factory", "read_only")? {
                settings.factory.read_only = value;
            }
        }

        Ok(settings)
    }

    /// Widget factory options described by these settings
    pub fn factory_options(&self) -> WidgetFactoryOptions {
        let file_types: Vec<&str> = self.factory.file_types.iter().map(String::as_str).collect();
        let mut options = WidgetFactoryOptions::new(&self.factory.name, &file_types);
        options.default_for = self.factory.default_for.clone();
        if self.factory.read_only {
            options.capabilities |= WidgetCapabilities::READ_ONLY;
        }
        options
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(section: &Properties, section_name: &str, key: &str) -> Result<Option<bool>> {
    let Some(raw) = section.get(key) else {
        return Ok(None);
    };
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(Some(true)),
        "false" | "no" | "off" | "0" => Ok(Some(false)),
        other => Err(DocumentError::Config(format!(
            "{section_name}.{key}: expected a boolean, got '{other}'"
        ))),
    }
}
