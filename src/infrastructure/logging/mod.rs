//! Logging infrastructure
//!
//! Structured logging using tracing and tracing-subscriber:
//! - Level driven by the numeric `LOG_LEVEL`
//! - JSON or pretty formatting
//! - `RUST_LOG` overrides

pub mod config;
pub mod logger;

pub use config::{LogConfig, LogFormat, LogSettings};
pub use logger::LoggerImpl;
