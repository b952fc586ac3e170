//! Ambient knobs shared by the lexer, parser and their diagnostics.
//!
//! A plain TOML-backed struct a caller loads once and threads through.
//! Directory discovery (current/home/system config search) belongs to the
//! binary that embeds this crate, not the crate itself.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Default width of the caret window rendered under a diagnostic snippet.
const DEFAULT_CARET_WINDOW: usize = 10;

/// Default column width a tab character is assumed to occupy.
const DEFAULT_TAB_WIDTH: usize = 4;

/// Configuration shared by lexing, parsing and diagnostic rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Number of source columns highlighted on either side of a caret.
    #[serde(default = "default_caret_window")]
    pub caret_window: usize,

    /// Column width a tab character is assumed to occupy when rendering
    /// snippets (tabs are never expanded in the source itself).
    #[serde(default = "default_tab_width")]
    pub tab_width: usize,

    /// Whether diagnostic output should be colorized.
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_caret_window() -> usize {
    DEFAULT_CARET_WINDOW
}

fn default_tab_width() -> usize {
    DEFAULT_TAB_WIDTH
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            caret_window: DEFAULT_CARET_WINDOW,
            tab_width: DEFAULT_TAB_WIDTH,
            color: true,
        }
    }
}

impl Config {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Serialize this configuration back to TOML text.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_documented_defaults() {
        let config = Config::default();
        assert_eq!(config.caret_window, 10);
        assert_eq!(config.tab_width, 4);
        assert!(config.color);
    }

    #[test]
    fn round_trips_through_toml() {
        let config = Config { caret_window: 6, tab_width: 2, color: false };
        let text = config.to_toml_string().unwrap();
        let parsed = Config::from_toml_str(&text).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed = Config::from_toml_str("color = false").unwrap();
        assert_eq!(parsed.caret_window, 10);
        assert_eq!(parsed.tab_width, 4);
        assert!(!parsed.color);
    }

    #[test]
    fn rejects_invalid_toml() {
        assert!(Config::from_toml_str("not = [valid").is_err());
    }
}
