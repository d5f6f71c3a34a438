//! Schema validation of the raw environment.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

use tracing::{debug, error, warn};

use super::schema::{coerce, EnvValue, SchemaEntry, VarKind};
use crate::domain::errors::{EnvVarError, ValidationError};
use crate::domain::models::LogLevel;

const NON_UTF8_VALUE: &str = "<non-UTF-8>";

/// Owned snapshot of string environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEnv {
    vars: BTreeMap<String, String>,

    /// Set variables whose value could not be read as UTF-8
    non_utf8: BTreeSet<String>,
}

impl RawEnv {
    /// Snapshot the process environment
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build from OS strings.
    ///
    /// Keys that are not UTF-8 cannot name a schema variable and are dropped.
    /// Values that are not UTF-8 are remembered so validation can reject them.
    pub fn from_os_vars(vars: impl IntoIterator<Item = (OsString, OsString)>) -> Self {
        let mut raw = Self::default();
        for (key, value) in vars {
            let Ok(key) = key.into_string() else {
                continue;
            };
            match value.into_string() {
                Ok(value) => raw.insert(key, value),
                Err(_) => {
                    warn!(name = %key, "environment value is not valid UTF-8");
                    raw.vars.remove(&key);
                    raw.non_utf8.insert(key);
                }
            }
        }
        raw
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Whether `name` is set to a value that is not valid UTF-8
    pub fn is_non_utf8(&self, name: &str) -> bool {
        self.non_utf8.contains(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.non_utf8.remove(&name);
        self.vars.insert(name, value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.non_utf8.remove(name);
        self.vars.remove(name)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            non_utf8: BTreeSet::new(),
        }
    }
}

/// What to do when validation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Return the aggregate error to the caller
    #[default]
    Throwing,
    /// Print diagnostics and exit the process with status 1
    Terminating,
}

/// Read-only, fully coerced environment.
///
/// Only produced by [`validate`]; holds a value for every schema entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEnv {
    values: BTreeMap<&'static str, EnvValue>,
}

impl ValidatedEnv {
    pub fn get(&self, name: &str) -> Option<&EnvValue> {
        self.values.get(name)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            EnvValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<i64> {
        match self.values.get(name)? {
            EnvValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn port(&self, name: &str) -> Option<u16> {
        match self.values.get(name)? {
            EnvValue::Port(p) => Some(*p),
            _ => None,
        }
    }

    pub fn log_level(&self, name: &str) -> Option<LogLevel> {
        match self.values.get(name)? {
            EnvValue::LogLevel(level) => Some(*level),
            _ => None,
        }
    }

    pub fn id_list(&self, name: &str) -> Option<&[i64]> {
        match self.values.get(name)? {
            EnvValue::IdList(ids) => Some(ids),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EnvValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Validate `raw` against `schema`.
///
/// Every entry is checked independently and all failures are collected before
/// reporting. Variables absent from the schema are ignored.
pub fn validate(
    raw: &RawEnv,
    schema: &[SchemaEntry],
    mode: ValidationMode,
) -> Result<ValidatedEnv, ValidationError> {
    let mut values = BTreeMap::new();
    let mut errors = Vec::new();

    for entry in schema {
        match validate_entry(raw, entry) {
            Ok(value) => {
                values.insert(entry.name, value);
            }
            Err(err) => errors.push(err),
        }
    }

    match ValidationError::from_errors(errors) {
        None => {
            debug!(variables = values.len(), "environment validated");
            Ok(ValidatedEnv { values })
        }
        Some(err) => match mode {
            ValidationMode::Throwing => Err(err),
            ValidationMode::Terminating => report_and_exit(&err),
        },
    }
}

fn validate_entry(raw: &RawEnv, entry: &SchemaEntry) -> Result<EnvValue, EnvVarError> {
    if raw.is_non_utf8(entry.name) {
        return Err(EnvVarError::InvalidValue {
            name: entry.name.to_string(),
            value: NON_UTF8_VALUE.to_string(),
            reason: "value is not valid UTF-8".to_string(),
        });
    }

    let value = raw
        .get(entry.name)
        .filter(|v| !(entry.is_required() && v.trim().is_empty()));

    match (value, entry.default) {
        (Some(v), _) => coerce(entry.kind, v).map_err(|reason| EnvVarError::InvalidValue {
            name: entry.name.to_string(),
            value: display_value(entry.kind, v),
            reason,
        }),
        (None, Some(default)) => Ok(default.into()),
        (None, None) => Err(EnvVarError::MissingRequired {
            name: entry.name.to_string(),
        }),
    }
}

// Raw text of string kinds stays out of error messages.
fn display_value(kind: VarKind, raw: &str) -> String {
    match kind {
        VarKind::String => String::new(),
        _ => raw.to_string(),
    }
}

fn report_and_exit(err: &ValidationError) -> ! {
    error!(
        invalid = ?err.names(),
        "environment validation failed, refusing to start"
    );
    eprintln!("{err}");
    eprintln!("\nExiting with error code 1");
    std::process::exit(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::schema::{Fallback, SCHEMA};

    fn required_only() -> RawEnv {
        [
            ("TELEGRAM_API_TOKEN", "test-token"),
            ("OPENAI_API_KEY", "test-key"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_defaults_applied_when_absent() {
        let env = validate(&required_only(), SCHEMA, ValidationMode::Throwing).unwrap();

        assert_eq!(env.str("GPT_VERSION"), Some("gpt-4-turbo"));
        assert_eq!(env.str("MONGODB_HOST"), Some("localhost"));
        assert_eq!(env.port("MONGODB_PORT"), Some(27017));
        assert_eq!(env.port("MONGO_EXPRESS_PORT"), Some(8081));
        assert_eq!(env.log_level("LOG_LEVEL"), Some(LogLevel::Info));
        assert_eq!(env.int("MAX_VOICE_MESSAGE_LENGTH_SECONDS"), Some(300));
        assert_eq!(env.id_list("ADMIN_IDS"), Some(&[][..]));
        assert_eq!(env.int("REANALYSIS_BATCH_SIZE"), Some(5));
        assert_eq!(env.int("REANALYSIS_PROGRESS_INTERVAL"), Some(10));
        assert_eq!(env.len(), SCHEMA.len());
    }

    #[test]
    fn test_every_default_round_trips() {
        let env = validate(&required_only(), SCHEMA, ValidationMode::Throwing).unwrap();
        for entry in SCHEMA {
            if let Some(default) = entry.default {
                assert_eq!(env.get(entry.name), Some(&EnvValue::from(default)));
            }
        }
    }

    #[test]
    fn test_missing_required_collects_all() {
        let err = validate(&RawEnv::default(), SCHEMA, ValidationMode::Throwing).unwrap_err();

        assert_eq!(err.names(), vec!["TELEGRAM_API_TOKEN", "OPENAI_API_KEY"]);
        assert!(err.errors().iter().all(EnvVarError::is_missing));
    }

    #[test]
    fn test_empty_required_counts_as_missing() {
        let mut raw = required_only();
        raw.insert("TELEGRAM_API_TOKEN", "   ");

        let err = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap_err();
        assert_eq!(
            err.errors(),
            &[EnvVarError::MissingRequired {
                name: "TELEGRAM_API_TOKEN".to_string()
            }]
        );
    }

    #[test]
    fn test_empty_optional_string_passes_through() {
        let mut raw = required_only();
        raw.insert("MONGODB_HOST", "");

        let env = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap();
        assert_eq!(env.str("MONGODB_HOST"), Some(""));
    }

    #[test]
    fn test_missing_and_invalid_reported_together() {
        let raw: RawEnv = [
            ("OPENAI_API_KEY", "test-key"),
            ("MONGODB_PORT", "invalid-port"),
            ("LOG_LEVEL", "5"),
        ]
        .into_iter()
        .collect();

        let err = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap_err();
        assert_eq!(err.len(), 3);
        assert!(err.contains("TELEGRAM_API_TOKEN"));
        assert!(err.contains("MONGODB_PORT"));
        assert!(err.contains("LOG_LEVEL"));
        assert!(matches!(
            &err.errors()[1],
            EnvVarError::InvalidValue { name, value, .. }
                if name == "MONGODB_PORT" && value == "invalid-port"
        ));
    }

    #[test]
    fn test_log_level_debug() {
        let mut raw = required_only();
        raw.insert("LOG_LEVEL", "3");

        let env = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap();
        assert_eq!(env.log_level("LOG_LEVEL"), Some(LogLevel::Debug));
    }

    #[test]
    fn test_unknown_variables_ignored() {
        let mut raw = required_only();
        raw.insert("SOMETHING_ELSE", "whatever");

        let env = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap();
        assert!(env.get("SOMETHING_ELSE").is_none());
    }

    #[test]
    fn test_custom_schema() {
        let schema = [SchemaEntry {
            name: "WORKERS",
            kind: VarKind::Integer,
            default: Some(Fallback::Int(4)),
            description: "",
        }];

        let env = validate(&RawEnv::default(), &schema, ValidationMode::Throwing).unwrap();
        assert_eq!(env.int("WORKERS"), Some(4));
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_typed_getters_reject_wrong_kind() {
        let env = validate(&required_only(), SCHEMA, ValidationMode::Throwing).unwrap();
        assert_eq!(env.int("MONGODB_PORT"), None);
        assert_eq!(env.str("LOG_LEVEL"), None);
    }

    #[test]
    fn test_raw_env_from_process() {
        temp_env::with_var("EUPHORIA_RAW_ENV_MARKER", Some("marker"), || {
            let raw = RawEnv::from_process();
            assert_eq!(raw.get("EUPHORIA_RAW_ENV_MARKER"), Some("marker"));
        });
    }

    #[cfg(unix)]
    fn non_utf8() -> OsString {
        use std::os::unix::ffi::OsStringExt;
        OsString::from_vec(vec![b't', 0xff, 0xfe])
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_required_value_is_invalid_not_missing() {
        let raw = RawEnv::from_os_vars([
            (OsString::from("TELEGRAM_API_TOKEN"), non_utf8()),
            (OsString::from("OPENAI_API_KEY"), OsString::from("test-key")),
        ]);
        assert!(raw.is_non_utf8("TELEGRAM_API_TOKEN"));
        assert_eq!(raw.get("TELEGRAM_API_TOKEN"), None);

        let err = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap_err();
        assert_eq!(
            err.errors(),
            &[EnvVarError::InvalidValue {
                name: "TELEGRAM_API_TOKEN".to_string(),
                value: NON_UTF8_VALUE.to_string(),
                reason: "value is not valid UTF-8".to_string(),
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_optional_value_does_not_fall_back_to_default() {
        let mut raw = RawEnv::from_os_vars([(OsString::from("MONGODB_HOST"), non_utf8())]);
        raw.insert("TELEGRAM_API_TOKEN", "test-token");
        raw.insert("OPENAI_API_KEY", "test-key");

        let err = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap_err();
        assert_eq!(err.names(), vec!["MONGODB_HOST"]);

        raw.insert("MONGODB_HOST", "db");
        assert!(validate(&raw, SCHEMA, ValidationMode::Throwing).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_process_value_is_reported() {
        temp_env::with_vars(
            [
                ("TELEGRAM_API_TOKEN", Some(OsString::from("test-token"))),
                ("OPENAI_API_KEY", Some(non_utf8())),
            ],
            || {
                let raw = RawEnv::from_process();
                assert!(raw.is_non_utf8("OPENAI_API_KEY"));

                let err = validate(&raw, SCHEMA, ValidationMode::Throwing).unwrap_err();
                assert_eq!(err.names(), vec!["OPENAI_API_KEY"]);
                assert!(!err.errors()[0].is_missing());
            },
        );
    }
}
