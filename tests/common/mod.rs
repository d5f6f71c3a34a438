//! Common test utilities for integration tests
//!
//! Provides environment fixtures shared across the integration test files.

use euphoria::{RawEnv, SCHEMA};

/// Variable list for `temp_env::with_vars` that unsets every schema variable
/// and then applies `overrides`.
///
/// Keeps tests independent of whatever the host environment exports.
#[allow(dead_code)]
pub fn isolated_env(overrides: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
    let mut vars: Vec<(String, Option<String>)> = SCHEMA
        .iter()
        .filter(|e| !overrides.iter().any(|(k, _)| *k == e.name))
        .map(|e| (e.name.to_string(), None))
        .collect();
    if !overrides.iter().any(|(k, _)| *k == "APP_ENV") {
        vars.push(("APP_ENV".to_string(), None));
    }
    vars.extend(
        overrides
            .iter()
            .map(|(k, v)| ((*k).to_string(), Some((*v).to_string()))),
    );
    vars
}

/// Raw environment with the two required credentials set
#[allow(dead_code)]
pub fn required_env() -> RawEnv {
    [
        ("TELEGRAM_API_TOKEN", "test-token"),
        ("OPENAI_API_KEY", "test-key"),
    ]
    .into_iter()
    .collect()
}
