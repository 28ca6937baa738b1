//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Each section can be updated independently for atomic section-level updates.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Encoding defaults shared by the tools.
    #[serde(default)]
    pub encode: EncodeSettings,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Path configuration for output and logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Output folder for generated GIFs and frame exports.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Folder for log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,

    /// Last directory a file was picked from or dropped from.
    #[serde(default)]
    pub last_input_dir: String,
}

fn default_output_folder() -> String {
    "gif_output".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            logs_folder: default_logs_folder(),
            last_input_dir: String::new(),
        }
    }
}

/// Default encode parameters pre-filled into the tool windows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeSettings {
    /// Default output frame rate.
    #[serde(default = "default_fps")]
    pub default_fps: f64,

    /// Default output width in pixels.
    #[serde(default = "default_width")]
    pub default_width: u32,

    /// Default output height in pixels.
    #[serde(default = "default_height")]
    pub default_height: u32,
}

fn default_fps() -> f64 {
    10.0
}

fn default_width() -> u32 {
    512
}

fn default_height() -> u32 {
    512
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            default_fps: default_fps(),
            default_width: default_width(),
            default_height: default_height(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when RUST_LOG is not set.
    #[serde(default = "default_level")]
    pub level: String,

    /// Also write logs to a file under the logs folder.
    #[serde(default = "default_true")]
    pub log_to_file: bool,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            log_to_file: default_true(),
        }
    }
}

/// Identifies a config section for atomic section-level updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Paths,
    Encode,
    Logging,
}

impl ConfigSection {
    /// TOML table name for this section.
    pub fn table_name(&self) -> &'static str {
        match self {
            ConfigSection::Paths => "paths",
            ConfigSection::Encode => "encode",
            ConfigSection::Logging => "logging",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let settings = Settings::default();
        assert_eq!(settings.paths.output_folder, "gif_output");
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert!((settings.encode.default_fps - 10.0).abs() < f64::EPSILON);
        assert_eq!(settings.encode.default_width, 512);
        assert!(settings.logging.log_to_file);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let settings: Settings = toml::from_str("[paths]\noutput_folder = \"out\"\n").unwrap();
        assert_eq!(settings.paths.output_folder, "out");
        assert_eq!(settings.paths.logs_folder, ".logs");
        assert_eq!(settings.encode.default_height, 512);
    }

    #[test]
    fn section_table_names() {
        assert_eq!(ConfigSection::Paths.table_name(), "paths");
        assert_eq!(ConfigSection::Encode.table_name(), "encode");
        assert_eq!(ConfigSection::Logging.table_name(), "logging");
    }
}
