//! Logging setup for the `quarry` binary
//!
//! - Human-readable output on stderr (stdout carries command results)
//! - Optional JSON log file with size-based and daily rotation

use anyhow::Result;
use quarry_core::config::LoggingConfig;
use rolling_file::{RollingConditionBasic, RollingFileAppender};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Initialize tracing.
///
/// Returns the file writer guard when file logging is enabled; it must be kept
/// alive until exit so buffered lines are flushed.
pub fn init_telemetry(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &config.directory {
        Some(dir) => {
            let log_dir = Path::new(dir);
            std::fs::create_dir_all(log_dir)?;

            // quarry.log, rotated daily or at 10 MB, up to 9 old files
            let file_appender = RollingFileAppender::new(
                log_dir.join("quarry.log"),
                RollingConditionBasic::new()
                    .daily()
                    .max_size(MAX_LOG_FILE_BYTES),
                9,
            )?;
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

            let layer = fmt::layer()
                .json()
                .with_writer(non_blocking_file)
                .with_current_span(true)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    if let Some(dir) = &config.directory {
        tracing::debug!("File logging enabled in {}", dir);
    }

    Ok(guard)
}
