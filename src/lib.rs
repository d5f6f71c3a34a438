//! Euphoria - environment configuration for the Euphoria bot
//!
//! Validates process environment variables against a declarative schema and
//! assembles one immutable, sectioned [`Config`] for the rest of the bot.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): the configuration object and error model
//! - **Infrastructure Layer** (`infrastructure`): env file loading, schema
//!   validation, assembly and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use euphoria::{ConfigLoader, LoadOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load(&LoadOptions::default())?;
//!     println!("connecting to {}", config.redacted().database.uri);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::{EnvVarError, ValidationError};
pub use domain::models::{
    Config, DatabaseConfig, HumanDesignConfig, LegacyAliases, LogLevel, LoggingConfig,
    OpenAiConfig, ReanalysisConfig, SupportConfig, TelegramConfig,
};
pub use infrastructure::config::{
    assemble, load_configuration, validate, ConfigLoader, EnvFileLoader, LoadOptions,
    LoadOutcome, RawEnv, RunMode, ValidatedEnv, ValidationMode, SCHEMA,
};
