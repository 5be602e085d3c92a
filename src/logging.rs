// src/logging.rs

//! Tracing subscriber setup
//!
//! Console output follows [`LogFormat`]. When a file section is configured a
//! daily rolling file is added through `tracing-appender`; the returned
//! [`LoggingGuard`] must be kept alive so buffered lines are flushed on exit.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::LoggingConfig;
#[cfg(not(target_arch = "wasm32"))]
use crate::config::LogFormat;
use crate::error::{Error, Result};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Self::Trace,
            tracing::Level::DEBUG => Self::Debug,
            tracing::Level::INFO => Self::Info,
            tracing::Level::WARN => Self::Warn,
            tracing::Level::ERROR => Self::Error,
        }
    }
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(Error::config(format!("Unknown log level: {}", other))),
        }
    }
}

impl LogLevel {
    /// Level picked by the `--verbose` / `--debug` command line flags
    pub fn from_flags(verbose: bool, debug: bool, configured: LogLevel) -> Self {
        if debug {
            Self::Trace
        } else if verbose {
            Self::Debug
        } else {
            configured
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Keeps the non-blocking file writer alive
#[derive(Default)]
pub struct LoggingGuard {
    #[cfg(not(target_arch = "wasm32"))]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

impl std::fmt::Debug for LoggingGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggingGuard").finish_non_exhaustive()
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(config: &LoggingConfig, level: LogLevel) -> Result<LoggingGuard> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let console_layer = match config.format {
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
        LogFormat::Pretty => fmt::layer().pretty().with_target(false).boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(false).boxed(),
    };

    let mut guard = LoggingGuard::default();
    let file_layer = match &config.file {
        Some(file_config) => {
            std::fs::create_dir_all(&file_config.directory).map_err(|e| {
                Error::config(format!(
                    "Failed to create log directory {}: {}",
                    file_config.directory.display(),
                    e
                ))
            })?;
            let appender =
                tracing_appender::rolling::daily(&file_config.directory, &file_config.file_prefix);
            let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);
            guard._file_guard = Some(file_guard);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::config(format!("Failed to install tracing subscriber: {}", e)))?;

    Ok(guard)
}

/// Routes tracing output to the browser console
#[cfg(target_arch = "wasm32")]
pub fn init(_config: &LoggingConfig, level: LogLevel) -> Result<LoggingGuard> {
    let wasm_config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(level.into())
        .build();
    tracing_wasm::set_as_global_default_with_config(wasm_config);
    Ok(LoggingGuard::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_parsing() {
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_flags_override_configured_level() {
        assert_eq!(LogLevel::from_flags(false, true, LogLevel::Info), LogLevel::Trace);
        assert_eq!(LogLevel::from_flags(true, false, LogLevel::Info), LogLevel::Debug);
        assert_eq!(LogLevel::from_flags(false, false, LogLevel::Warn), LogLevel::Warn);
    }

    #[test]
    fn test_tracing_level_round_trip() {
        let level: tracing::Level = LogLevel::Error.into();
        assert_eq!(LogLevel::from(level), LogLevel::Error);
    }

    #[test]
    fn test_init_with_file_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            file: Some(crate::config::FileLogConfig {
                directory: dir.path().join("logs"),
                file_prefix: "test.log".to_string(),
            }),
            ..LoggingConfig::default()
        };

        // a second global subscriber in the same test binary is rejected
        let result = init(&config, LogLevel::Info);
        assert!(dir.path().join("logs").exists());
        if let Ok(guard) = result {
            tracing::info!("logging initialized");
            drop(guard);
        }
    }
}
