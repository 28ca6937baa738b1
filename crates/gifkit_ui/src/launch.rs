//! Shared startup for the tool binaries.
//!
//! Each binary loads the same config file, initializes logging, and then
//! launches its own iced application. The config manager is shared with the
//! app behind an `Arc<Mutex>` so dialog handlers can persist settings.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use gifkit_core::config::{ConfigManager, DEFAULT_CONFIG_PATH};
use gifkit_core::logging::{init_tracing, init_tracing_with_file, LogLevel, WorkerGuard};

/// Everything a binary needs before entering the event loop.
pub struct Startup {
    /// Loaded (or default-created) configuration.
    pub config: Arc<Mutex<ConfigManager>>,
    /// Keeps the file-logging worker alive; hold until exit.
    pub log_guard: Option<WorkerGuard>,
}

/// Load config, initialize logging, and ensure configured directories exist.
///
/// `app_name` becomes the log file prefix for this tool.
pub fn startup(app_name: &str) -> Startup {
    let config_path = PathBuf::from(DEFAULT_CONFIG_PATH);
    let mut config = ConfigManager::new(&config_path);

    if let Err(e) = config.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }

    let level = LogLevel::from_config(&config.settings().logging.level);
    let log_guard = if config.settings().logging.log_to_file {
        init_tracing_with_file(level, &config.logs_folder(), app_name)
    } else {
        init_tracing(level);
        None
    };

    tracing::info!("{} starting", app_name);
    tracing::info!("Config: {}", config_path.display());
    tracing::info!("Core version: {}", gifkit_core::version());

    if let Err(e) = config.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
        eprintln!("Warning: Failed to create directories: {}", e);
    }

    Startup {
        config: Arc::new(Mutex::new(config)),
        log_guard,
    }
}
