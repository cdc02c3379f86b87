use crate::model::buffer::LineEnding;
use crate::model::history::DEFAULT_COALESCE_LIMIT;
use crate::view::theme::THEME_NAMES;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Config {
    /// Color theme name ("dark", "light" or "high-contrast")
    #[serde(default = "default_theme_name")]
    pub theme: String,

    /// Editor behavior settings (indentation, line numbers, scrolling, undo)
    #[serde(default)]
    pub editor: EditorConfig,
}

fn default_theme_name() -> String {
    "dark".to_string()
}

/// Line terminator used when saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingPreference {
    /// Keep whatever the file was loaded with
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEndingPreference {
    /// The terminator to write for a buffer that was loaded with `detected`
    pub fn resolve(&self, detected: LineEnding) -> LineEnding {
        match self {
            Self::Auto => detected,
            Self::Lf => LineEnding::LF,
            Self::Crlf => LineEnding::CRLF,
        }
    }
}

/// Editor behavior configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EditorConfig {
    /// Number of columns a tab character occupies
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,

    /// Show line numbers in the gutter
    #[serde(default = "default_true")]
    pub line_numbers: bool,

    /// Enable syntax highlighting for code files
    #[serde(default = "default_true")]
    pub syntax_highlighting: bool,

    /// Minimum lines to keep visible above/below cursor when scrolling
    #[serde(default = "default_scroll_offset")]
    pub scroll_offset: usize,

    /// Lines moved by Page Up/Down when the viewport height is unknown
    #[serde(default = "default_page_lines")]
    pub page_lines: usize,

    /// Extra lines above and below the viewport to highlight ahead of scrolling
    #[serde(default = "default_highlight_margin_lines")]
    pub highlight_margin_lines: usize,

    /// Maximum number of typed characters merged into one undo step
    #[serde(default = "default_undo_coalesce_limit")]
    pub undo_coalesce_limit: usize,

    /// Line terminator written on save
    #[serde(default)]
    pub line_ending: LineEndingPreference,
}

fn default_tab_size() -> usize {
    4
}

fn default_true() -> bool {
    true
}

fn default_scroll_offset() -> usize {
    3
}

fn default_page_lines() -> usize {
    20
}

fn default_highlight_margin_lines() -> usize {
    10
}

fn default_undo_coalesce_limit() -> usize {
    DEFAULT_COALESCE_LIMIT
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            line_numbers: true,
            syntax_highlighting: true,
            scroll_offset: default_scroll_offset(),
            page_lines: default_page_lines(),
            highlight_margin_lines: default_highlight_margin_lines(),
            undo_coalesce_limit: default_undo_coalesce_limit(),
            line_ending: LineEndingPreference::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
            editor: EditorConfig::default(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scribe").join("config.json"))
    }

    /// Load configuration from the default location, falling back to defaults if not found
    pub fn load_or_default() -> Self {
        if let Some(config_path) = Self::default_config_path() {
            if config_path.exists() {
                match Self::load_from_file(&config_path) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to load config from {}: {}, using defaults",
                            config_path.display(),
                            e
                        );
                    }
                }
            }
        }
        Self::default()
    }

    /// Load and validate configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(e.to_string()))?;

        let config: Config =
            serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;

        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(path.as_ref(), contents).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// JSON schema describing the config file
    pub fn json_schema() -> Result<String, ConfigError> {
        let schema = schemars::schema_for!(Config);
        serde_json::to_string_pretty(&schema).map_err(|e| ConfigError::SerializeError(e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !THEME_NAMES.contains(&self.theme.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "unknown theme '{}' (expected one of: {})",
                self.theme,
                THEME_NAMES.join(", ")
            )));
        }

        if self.editor.tab_size == 0 {
            return Err(ConfigError::ValidationError(
                "tab_size must be greater than 0".to_string(),
            ));
        }

        if self.editor.scroll_offset > 100 {
            return Err(ConfigError::ValidationError(
                "scroll_offset must be <= 100".to_string(),
            ));
        }

        if self.editor.page_lines == 0 {
            return Err(ConfigError::ValidationError(
                "page_lines must be greater than 0".to_string(),
            ));
        }

        if self.editor.undo_coalesce_limit == 0 {
            return Err(ConfigError::ValidationError(
                "undo_coalesce_limit must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration error types
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "IO error: {msg}"),
            ConfigError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::SerializeError(msg) => write!(f, "Serialize error: {msg}"),
            ConfigError::ValidationError(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}
