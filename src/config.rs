//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the form-clock.toml file.
//! It sizes and times the two clocks of the face, describes the output frame, and
//! stores the user's theme preferences.
//!
//! Every section is optional. Missing keys take their default values, so a file
//! containing only `[preferences]` is valid.

use crate::theme::{Theme, DEFAULT_THEME};
use crate::{ClockPaints, RenderOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "form-clock.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file format: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Application configuration loaded from form-clock.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Hour:minute clock sizing and timing
    pub clock: ClockConfig,
    /// Seconds clock sizing and timing. Keys left out of a partial
    /// `[seconds]` table take the hour:minute defaults.
    pub seconds: ClockConfig,
    /// Output frame configuration
    pub display: DisplayConfig,
    /// User-facing appearance preferences
    pub preferences: Preferences,
}

impl Default for Config {
    fn default() -> Self {
        let options = RenderOptions::default();
        Config {
            clock: ClockConfig::from_options(&options),
            seconds: ClockConfig::from_options(&options.seconds_variant()),
            display: DisplayConfig::default(),
            preferences: Preferences::default(),
        }
    }
}

/// Size and animation timing of one clock
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Glyph height in pixels
    pub text_size: f32,
    /// Gap between glyphs in pixels
    pub char_spacing: f32,
    /// Average start offset between changing glyphs
    pub glyph_anim_delay_ms: u64,
    /// Animation length of one glyph
    pub glyph_anim_duration_ms: u64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        ClockConfig::from_options(&RenderOptions::default())
    }
}

impl ClockConfig {
    fn from_options(options: &RenderOptions) -> Self {
        ClockConfig {
            text_size: options.text_size,
            char_spacing: options.char_spacing,
            glyph_anim_delay_ms: options.glyph_anim_average_delay_ms,
            glyph_anim_duration_ms: options.glyph_anim_duration_ms,
        }
    }

    fn to_options(&self, only_seconds: bool, is_24_hour: bool) -> RenderOptions {
        RenderOptions {
            text_size: self.text_size,
            char_spacing: self.char_spacing,
            only_seconds,
            is_24_hour,
            glyph_anim_average_delay_ms: self.glyph_anim_delay_ms,
            glyph_anim_duration_ms: self.glyph_anim_duration_ms,
        }
    }
}

/// Output frame configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Frame width in pixels
    pub width: u32,
    /// Frame height in pixels
    pub height: u32,
    /// 24-hour instead of 12-hour numbering
    pub is_24_hour: bool,
    /// Smooth glyphs through the offscreen surface (interactive mode only)
    pub offscreen_glyphs: bool,
    /// Vertical gap between the hour:minute and seconds clocks, in pixels
    pub seconds_gap: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 400,
            height: 240,
            is_24_hour: false,
            offscreen_glyphs: true,
            seconds_gap: 12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Preferences {
    /// Theme id: blue, teal, red, yellow or gray
    pub theme: String,
    pub show_seconds: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            theme: DEFAULT_THEME.id.to_string(),
            show_seconds: true,
        }
    }
}

impl Config {
    /// Load configuration from form-clock.toml file
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => {
                info!(path = %path.display(), theme = %config.preferences.theme, "loaded configuration");
                config
            }
            Err(ConfigError::Io(e)) => {
                info!(path = %path.display(), error = %e, "no config file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "using default configuration");
                Self::default()
            }
        }
    }

    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save current configuration as pretty-printed TOML
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!(path = %path.as_ref().display(), "configuration saved");
        Ok(())
    }

    pub fn hour_minute_options(&self) -> RenderOptions {
        self.clock.to_options(false, self.display.is_24_hour)
    }

    pub fn seconds_options(&self) -> RenderOptions {
        self.seconds.to_options(true, self.display.is_24_hour)
    }

    /// Resolved theme. Unknown ids fall back to the default theme.
    pub fn theme(&self) -> Theme {
        Theme::by_id(&self.preferences.theme).unwrap_or_else(|| {
            warn!(theme = %self.preferences.theme, "unknown theme, using {}", DEFAULT_THEME.id);
            DEFAULT_THEME
        })
    }

    pub fn paints(&self) -> ClockPaints {
        self.theme().paints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.clock.glyph_anim_delay_ms, 500);
        assert_eq!(config.clock.glyph_anim_duration_ms, 2000);
        assert_eq!(config.seconds.glyph_anim_delay_ms, 0);
        assert_eq!(config.seconds.glyph_anim_duration_ms, 960);
        assert_eq!(config.seconds.text_size, config.clock.text_size / 2.0);
        assert_eq!(config.preferences.theme, "blue");
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form-clock.toml");
        let mut config = Config::default();
        config.preferences.theme = "red".to_string();
        config.display.is_24_hour = true;
        config.save_to_path(&path).unwrap();

        let parsed = Config::try_load_from_path(&path).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let parsed: Config = toml::from_str("[preferences]\ntheme = \"teal\"\n").unwrap();
        assert_eq!(parsed.theme(), crate::theme::TEAL);
        assert_eq!(parsed.seconds, Config::default().seconds);
        assert!(parsed.preferences.show_seconds);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[clock\ntext_size = ").unwrap();
        assert!(matches!(Config::try_load_from_path(file.path()), Err(ConfigError::Parse(_))));
        assert_eq!(Config::load_from_path(file.path()), Config::default());
    }

    #[test]
    fn test_render_options() {
        let mut config = Config::default();
        config.display.is_24_hour = true;
        let hm = config.hour_minute_options();
        let seconds = config.seconds_options();
        assert!(!hm.only_seconds && hm.is_24_hour);
        assert!(seconds.only_seconds && seconds.is_24_hour);
        assert_eq!(
            seconds,
            RenderOptions {
                is_24_hour: true,
                ..RenderOptions::default().seconds_variant()
            }
        );
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let mut config = Config::default();
        config.preferences.theme = "muzei".to_string();
        assert_eq!(config.theme(), DEFAULT_THEME);
    }
}
