use anyhow::{Context, Result};
use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::models::{LogLevel, LoggingConfig};

/// Logging configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    /// Bot log level from `LOG_LEVEL`
    pub level: LogLevel,

    /// Output format (json, pretty)
    pub format: LogFormat,

    /// Colorize pretty output
    pub ansi: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

/// Output settings of the logger itself, independent of the bot environment.
///
/// Precedence (lowest to highest):
/// 1. Programmatic defaults (Serialized)
/// 2. Environment variables (`EUPHORIA_LOG_*` prefix)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_true")]
    pub ansi: bool,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            ansi: default_true(),
        }
    }
}

const fn default_true() -> bool {
    true
}

impl LogSettings {
    pub fn load() -> Result<Self> {
        Self::figment()
            .extract()
            .context("Failed to extract logging settings from figment")
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed("EUPHORIA_LOG_"))
    }
}

impl LogConfig {
    pub const fn new(level: LogLevel, settings: LogSettings) -> Self {
        Self {
            level,
            format: settings.format,
            ansi: settings.ansi,
        }
    }

    /// Logger setup for a loaded configuration section
    pub const fn from_section(section: &LoggingConfig, settings: LogSettings) -> Self {
        Self::new(section.level, settings)
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::new(LogLevel::default(), LogSettings::default())
    }
}
