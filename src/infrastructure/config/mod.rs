//! Configuration management infrastructure
//!
//! Environment driven configuration pipeline:
//! - `.env` file loading (defaults only, never overrides)
//! - Declarative schema with typed defaults
//! - Validation collecting every failure
//! - Assembly into the sectioned config object

pub mod assembler;
pub mod env_file;
pub mod loader;
pub mod schema;
pub mod validator;

pub use assembler::{assemble, connection_uri};
pub use env_file::{EnvFileLoader, LoadReport, RunMode};
pub use loader::{ConfigLoader, LoadOptions, LoadOutcome};
pub use schema::{coerce, parse_id_list, EnvValue, Fallback, SchemaEntry, VarKind, SCHEMA};
pub use validator::{validate, RawEnv, ValidatedEnv, ValidationMode};

/// Load configuration with default options.
///
/// Reads `./.env` (or `./.env.production` when `APP_ENV=production`) and
/// returns the validation failure instead of exiting.
pub fn load_configuration() -> Result<crate::Config, crate::ValidationError> {
    ConfigLoader::load(&LoadOptions::default())
}
