//! Configuration management for BridgeCAM
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats; the format is chosen from the file extension.
//!
//! Configuration is organized into sections:
//! - Bridge defaults (capture diameter, tab width, milling side)
//! - Render style (marker colors, view scale)

use bridgecam_core::{Color, SideOfMilling};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Defaults for newly placed bridge markers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeSettings {
    /// Diameter of the snap zone and drawn marker body
    pub capture_diameter: f64,
    /// Width of the tab left in the toolpath
    pub tab_width: f64,
    /// Side of the toolpath the cut points are taken from
    pub side: SideOfMilling,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            capture_diameter: 2.0,
            tab_width: 1.0,
            side: SideOfMilling::Outer,
        }
    }
}

/// Marker drawing style
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Fill of a marker sitting on a toolpath
    pub valid_color: Color,
    /// Fill of a marker off any toolpath
    pub invalid_color: Color,
    /// Outline color of the tab ears
    pub outline_color: Color,
    /// View scale factor applied to outline width
    pub view_scale: f64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            valid_color: Color::GREEN,
            invalid_color: Color::RED,
            outline_color: Color::WHITE,
            view_scale: 1.0,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Bridge defaults
    pub bridge: BridgeSettings,
    /// Render style
    pub render: RenderSettings,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("none").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a `.json` or `.toml` file and validate it
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Validate and save configuration to a `.json` or `.toml` file
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |value: f64| value.is_finite() && value > 0.0;

        if !positive(self.bridge.capture_diameter) {
            return Err(SettingsError::invalid(
                "bridge.capture_diameter",
                "must be > 0",
            ));
        }

        if !positive(self.bridge.tab_width) {
            return Err(SettingsError::invalid("bridge.tab_width", "must be > 0"));
        }

        if !positive(self.render.view_scale) {
            return Err(SettingsError::invalid("render.view_scale", "must be > 0"));
        }

        Ok(())
    }
}

/// Default location of the configuration file:
/// `<config_dir>/bridgecam/config.toml`.
pub fn default_config_path() -> SettingsResult<PathBuf> {
    let mut path = dirs::config_dir().ok_or_else(|| {
        ConfigError::UnsupportedPlatform("no configuration directory".to_string())
    })?;
    path.push("bridgecam");
    path.push("config.toml");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.bridge.side, SideOfMilling::Outer);
        assert_eq!(config.render.valid_color, Color::GREEN);
    }

    #[test]
    fn test_validate_rejects_non_positive_sizes() {
        let mut config = Config::new();
        config.bridge.capture_diameter = 0.0;
        assert!(matches!(
            config.validate(),
            Err(SettingsError::InvalidSetting { ref key, .. }) if key == "bridge.capture_diameter"
        ));

        let mut config = Config::new();
        config.bridge.tab_width = -1.0;
        assert!(config.validate().is_err());

        let mut config = Config::new();
        config.render.view_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::new();
        config.bridge.tab_width = 1.5;
        config.bridge.side = SideOfMilling::Inner;
        config.render.invalid_color = Color::rgba(255, 0, 0, 128);
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_json_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = Config::new();
        config.save_to_file(&path).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("partial.toml");
        std::fs::write(&path, "[bridge]\ntab_width = 0.8\nside = \"on\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.bridge.tab_width, 0.8);
        assert_eq!(config.bridge.side, SideOfMilling::On);
        assert_eq!(config.bridge.capture_diameter, 2.0);
        assert_eq!(config.render, RenderSettings::default());
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, r#"{"bridge": {"capture_diameter": -2.0}}"#).unwrap();
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        assert!(matches!(
            Config::new().save_to_file(&path),
            Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
        ));
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_default_config_path_name() {
        if let Ok(path) = default_config_path() {
            assert!(path.ends_with("bridgecam/config.toml"));
        }
    }
}
