pub mod config;
pub mod legacy;

pub use config::{
    Config, DatabaseConfig, HumanDesignConfig, LogLevel, LoggingConfig, OpenAiConfig,
    ReanalysisConfig, SupportConfig, TelegramConfig, REDACTED,
};
pub use legacy::LegacyAliases;
