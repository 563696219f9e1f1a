//! BridgeCAM Settings Crate
//!
//! Handles the application configuration: bridge defaults and marker
//! rendering style, loaded from and saved to JSON or TOML files.

pub mod config;
pub mod error;

pub use config::{default_config_path, BridgeSettings, Config, RenderSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
