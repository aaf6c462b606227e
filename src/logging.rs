//! Structured logging setup
//!
//! The TUI owns the terminal, so interactive sessions log to a daily
//! rotating file only. One-shot command-line runs log to stderr so stdout
//! stays clean for the result tree. The filter comes from `PGSEARCH_LOG`,
//! then `RUST_LOG`, then a build-dependent default.

use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

/// Environment variable checked first for a log filter
pub const LOG_ENV: &str = "PGSEARCH_LOG";

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Daily rotating file under the log directory
    File,
    /// Standard error
    Stderr,
}

/// Guard that must be held for the lifetime of the application.
///
/// Dropping this guard flushes pending log entries.
pub struct LoggingGuard {
    _worker_guard: Option<WorkerGuard>,
}

/// Initialize the global subscriber.
///
/// If the log directory cannot be created, logging falls back to stderr
/// with a warning; for the TUI this is discarded once the alternate
/// screen is up, which is the best that can be done.
pub fn init_logging(target: LogTarget) -> LoggingGuard {
    match target {
        LogTarget::Stderr => init_stderr_logging(),
        LogTarget::File => match init_file_logging(&log_dir()) {
            Ok(guard) => LoggingGuard {
                _worker_guard: Some(guard),
            },
            Err(e) => {
                eprintln!("Warning: failed to initialize file logging: {}", e);
                init_stderr_logging()
            }
        },
    }
}

fn init_stderr_logging() -> LoggingGuard {
    tracing_subscriber::fmt()
        .with_env_filter(build_env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    LoggingGuard {
        _worker_guard: None,
    }
}

fn init_file_logging(dir: &Path) -> Result<WorkerGuard, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("pgsearch")
        .filename_suffix("log")
        .build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(build_env_filter())
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(guard)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter()))
}

/// Default filter, depending on build type
pub fn default_log_filter() -> &'static str {
    #[cfg(debug_assertions)]
    {
        "debug,pgsearch=trace,tokio_postgres=warn,rustls=warn"
    }
    #[cfg(not(debug_assertions))]
    {
        "info,tokio_postgres=warn,rustls=warn"
    }
}

/// `~/.pgsearch/logs`, or `./logs` without a home directory
pub fn log_dir() -> PathBuf {
    crate::config::ConnectionConfig::config_dir()
        .map(|d| d.join("logs"))
        .unwrap_or_else(|_| PathBuf::from("logs"))
}
