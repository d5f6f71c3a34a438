//! Domain layer: the configuration object and its error model.

pub mod errors;
pub mod models;

pub use errors::{EnvVarError, ValidationError};
