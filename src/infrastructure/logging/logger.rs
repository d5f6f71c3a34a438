use super::config::{LogConfig, LogFormat};
use crate::domain::models::LogLevel;
use anyhow::{anyhow, Result};
use std::io;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Layer, Registry};

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
        }
    }
}

type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Logger implementation using tracing
///
/// The level filter is reloadable: the logger is installed before any
/// configuration is read, then raised or lowered to the configured `LOG_LEVEL`.
pub struct LoggerImpl {
    handle: FilterHandle,
    level: LogLevel,
}

impl LoggerImpl {
    /// Install the global subscriber.
    ///
    /// Logs go to stderr so command output on stdout stays machine readable.
    /// `RUST_LOG` directives still override the configured level.
    ///
    /// # Errors
    /// Returns an error if a global subscriber is already installed
    pub fn init(config: &LogConfig) -> Result<Self> {
        let (filter, handle) = reload::Layer::new(level_filter(config.level));

        let layer = match config.format {
            LogFormat::Json => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_target(true)
                .boxed(),
            LogFormat::Pretty => tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(config.ansi)
                .with_target(true)
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(filter)
            .with(layer)
            .try_init()
            .map_err(|e| anyhow!("Failed to initialize logger: {e}"))?;

        tracing::debug!(
            level = %config.level,
            format = ?config.format,
            "logger initialized"
        );

        Ok(Self::from_handle(handle, config.level))
    }

    const fn from_handle(handle: FilterHandle, level: LogLevel) -> Self {
        Self { handle, level }
    }

    /// Switch the installed subscriber to `level`
    pub fn set_level(&mut self, level: LogLevel) -> Result<()> {
        if level == self.level {
            return Ok(());
        }
        self.handle
            .reload(level_filter(level))
            .map_err(|e| anyhow!("Failed to change log level: {e}"))?;
        self.level = level;
        tracing::debug!(level = %level, "log level changed");
        Ok(())
    }

    pub const fn level(&self) -> LogLevel {
        self.level
    }
}

fn level_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(Level::from(level).into())
        .from_env_lossy()
}

// Re-export tracing macros for convenience
pub use tracing::{debug, error, info, trace, warn};
