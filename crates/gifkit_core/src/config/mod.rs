//! Configuration management for GIF Kit.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//!
//! # Example
//!
//! ```no_run
//! use gifkit_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/gifkit.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("Output folder: {}", config.settings().paths.output_folder);
//!
//! // Modify a setting
//! config.settings_mut().encode.default_fps = 24.0;
//!
//! // Save just the encode section atomically
//! config.update_section(ConfigSection::Encode).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ConfigSection, EncodeSettings, LoggingSettings, PathSettings, Settings,
};

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".config/gifkit.toml";
