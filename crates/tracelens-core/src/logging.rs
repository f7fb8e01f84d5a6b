//! Logging configuration using tracing

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

const LOG_FILE_NAME: &str = "tracelens.log";

/// Environment variable holding an `EnvFilter` directive
pub const LOG_ENV_VAR: &str = "TRACELENS_LOG";

/// Filter used when `TRACELENS_LOG` is unset or invalid: info for every
/// trace-lens crate, warn for dependencies.
const DEFAULT_FILTER: &str =
    "trace_lens=info,tracelens_core=info,tracelens_app=info,tracelens_tui=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/trace-lens/logs/` because the TUI
/// owns stdout and headless mode prints the detail there.
///
/// # Examples
/// ```bash
/// TRACELENS_LOG=debug tracelens trace.json
/// TRACELENS_LOG=tracelens_core=trace tracelens trace.json --headless
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    Ok(())
}

/// Write the session banner: version, front end and the trace being opened.
///
/// Daily log files collect many sessions; the banner marks where each one
/// starts.
pub fn log_session_start(trace_path: &Path, headless: bool) {
    let mode = if headless { "headless" } else { "tui" };
    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!(
        "trace-lens {} starting ({} mode)",
        env!("CARGO_PKG_VERSION"),
        mode
    );
    tracing::info!("Trace: {}", trace_path.display());
    if let Ok(log_file) = get_current_log_file() {
        tracing::info!("Log file: {}", log_file.display());
    }
    tracing::info!("═══════════════════════════════════════════════════════");
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("trace-lens").join("logs"))
}

/// Get the log file path for the current day.
///
/// The daily appender suffixes the base name with the UTC date.
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join(format!(
        "{}.{}",
        LOG_FILE_NAME,
        Utc::now().format("%Y-%m-%d")
    )))
}
