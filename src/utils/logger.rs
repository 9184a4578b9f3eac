use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where log lines go while the process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Standard error, for CLI subcommands
    Stderr,
    /// Append to a file, so the full-screen shell is not overdrawn
    File(&'a Path),
}

/// Build the level filter: `RUST_LOG` wins, otherwise `info` (or `debug` when verbose)
fn build_filter(verbose: bool) -> EnvFilter {
    let default_level = if verbose { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Initialize the logging system
pub fn init_logger(verbose: bool, target: LogTarget<'_>) -> Result<()> {
    let filter = build_filter(verbose);

    match target {
        LogTarget::Stderr => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(io::stderr)
                        .with_target(false)
                        .with_thread_ids(false)
                        .with_thread_names(false)
                        .compact(),
                )
                .try_init()
                .context("Failed to install stderr logger")?;
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .with_target(false)
                        .compact(),
                )
                .try_init()
                .context("Failed to install file logger")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_creates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let log_path = temp_dir.path().join("noir.log");

        // Another test may already own the global subscriber; the file is opened first either way
        let _ = init_logger(false, LogTarget::File(&log_path));
        assert!(log_path.exists());
    }
}
