//! Tracing subscriber setup.

use crate::config::{Config, LogLevel};
use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter directive for the configured level and the `-v`/`-q` flags.
///
/// `-q` wins over `-v`; with neither, the configured level applies.
pub fn filter_directive(level: LogLevel, verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "warn";
    }
    match verbose {
        0 => level.as_directive(),
        1 => "debug",
        _ => "trace",
    }
}

fn env_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
}

/// Subscriber used while the configuration is still being loaded.
///
/// Install it with `tracing::subscriber::with_default` so it only covers
/// the load itself.
pub fn bootstrap_subscriber(verbose: u8, quiet: bool) -> impl tracing::Subscriber + Send + Sync {
    fmt()
        .with_env_filter(env_filter(filter_directive(LogLevel::default(), verbose, quiet)))
        .with_writer(std::io::stderr)
        .finish()
}

/// Install the global subscriber described by the loaded configuration.
///
/// Logs go to stderr, and additionally to the configured log file
/// (appended, without ANSI colors) when `logging.save_to_file` is set.
/// `RUST_LOG` overrides the level.
pub fn init_logging(config: &Config, verbose: u8, quiet: bool) -> Result<()> {
    let filter = env_filter(filter_directive(config.logging.level, verbose, quiet));

    let file_layer = if config.logging.save_to_file {
        let path = config.log_file_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::LogFileOpen { path, source: e })?;
        Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::LoggingInit {
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_configured_level() {
        assert_eq!(filter_directive(LogLevel::Warning, 0, false), "warn");
        assert_eq!(filter_directive(LogLevel::Error, 0, false), "error");
    }

    #[test]
    fn test_verbose_flags_raise_level() {
        assert_eq!(filter_directive(LogLevel::Error, 1, false), "debug");
        assert_eq!(filter_directive(LogLevel::Info, 3, false), "trace");
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(filter_directive(LogLevel::Debug, 2, true), "warn");
    }
}
