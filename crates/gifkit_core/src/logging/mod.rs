//! Logging infrastructure for GIF Kit.
//!
//! Integrates with the `tracing` ecosystem: stderr output always, plus an
//! optional daily-rotated log file under the configured logs folder.

use std::path::Path;

pub use tracing_appender::non_blocking::WorkerGuard;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log verbosity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Parse a config string, falling back to `Info` on unknown values.
    pub fn from_config(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

/// Initialize global tracing subscriber for application-wide logging.
///
/// This sets up a subscriber that:
/// - Respects RUST_LOG environment variable
/// - Falls back to the provided default level
/// - Outputs to stderr with timestamps
///
/// Should be called once at application startup.
pub fn init_tracing(default_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

/// Initialize tracing with an additional daily-rotated log file.
///
/// `app_name` becomes the log file prefix. Returns the appender's worker
/// guard, which the caller must keep alive for the lifetime of the program;
/// dropping it stops the background writer. Falls back to stderr-only when
/// the logs folder cannot be used.
pub fn init_tracing_with_file(
    default_level: LogLevel,
    logs_folder: &Path,
    app_name: &str,
) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_str(default_level)));

    if std::fs::create_dir_all(logs_folder).is_err() {
        init_tracing(default_level);
        tracing::warn!(
            "Could not create logs folder {}, logging to stderr only",
            logs_folder.display()
        );
        return None;
    }

    let appender =
        tracing_appender::rolling::daily(logs_folder, format!("{app_name}.log"));
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer))
        .with(filter)
        .init();

    Some(guard)
}

/// Initialize tracing for tests (only logs warnings and above).
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}

/// Convert LogLevel to filter string.
fn level_to_filter_str(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error => "error",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_to_filter_works() {
        assert_eq!(level_to_filter_str(LogLevel::Debug), "debug");
        assert_eq!(level_to_filter_str(LogLevel::Info), "info");
    }

    #[test]
    fn config_strings_parse_leniently() {
        assert_eq!(LogLevel::from_config("DEBUG"), LogLevel::Debug);
        assert_eq!(LogLevel::from_config("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_config("nonsense"), LogLevel::Info);
    }
}
