use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ToolSettings;

/// Prefix for rolling log files.
pub const LOG_PREFIX: &str = "pgnopts.log";

/// Setup logging from the tool settings.
///
/// With `log_dir` set, logs are written there with daily rotation (as JSON
/// lines if `log_json` is set). Otherwise they go to stderr, where the
/// default `warn` level keeps them out of the way of normal diagnostics.
///
/// # Returns
/// A guard that must be held for the duration of the program when logging to
/// a file; dropping it flushes the log.
pub fn setup_logging(settings: &ToolSettings) -> Result<Option<WorkerGuard>> {
    let env_filter = env_filter(&settings.log_level)?;

    let Some(log_dir) = settings.log_dir.as_deref() else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false),
            )
            .try_init()
            .context("Failed to initialize logging")?;
        return Ok(None);
    };

    prepare_log_dir(log_dir)?;

    // Create daily rotating file appender
    let file_appender = rolling::daily(log_dir, LOG_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let (json_layer, text_layer) = if settings.log_json {
        let layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(non_blocking)
            .with_target(true);
        (Some(layer), None)
    } else {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false) // No ANSI codes in log files
            .with_target(true)
            .with_file(true)
            .with_line_number(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    tracing::info!(
        "Logging initialized: dir={}, level={}, json={}",
        log_dir,
        settings.log_level,
        settings.log_json
    );

    Ok(Some(guard))
}

/// Build the level filter from a directive such as `warn` or `pgnopts=debug`.
pub fn env_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level).with_context(|| format!("Invalid log level: {}", level))
}

/// Create log directory if it doesn't exist
fn prepare_log_dir(log_dir: &Utf8Path) -> Result<()> {
    if !log_dir.exists() {
        fs::create_dir_all(log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_env_filter_directives() {
        assert!(env_filter("warn").is_ok());
        assert!(env_filter("pgnopts=debug,info").is_ok());
        assert!(env_filter("pgnopts=verbose").is_err());
    }

    #[test]
    fn test_log_directory_created() {
        let temp_dir = TempDir::new().unwrap();
        let log_dir = Utf8PathBuf::try_from(temp_dir.path().join("logs")).unwrap();

        // Only the directory handling; the global subscriber can be set once per process.
        prepare_log_dir(&log_dir).unwrap();
        prepare_log_dir(&log_dir).unwrap();

        assert!(log_dir.exists());
    }
}
