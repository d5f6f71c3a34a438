//! Declarative environment schema.
//!
//! One [`SchemaEntry`] per variable the bot consumes. Variables not listed here
//! are ignored by the validator.

use crate::domain::models::LogLevel;

/// Expected kind of an environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VarKind {
    /// Passed through unchanged
    String,
    /// Signed integer
    Integer,
    /// Integer in `1..=65535`
    Port,
    /// Integer in `0..=3`
    LogLevel,
    /// Comma-separated integers
    IdList,
}

impl VarKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Port => "port",
            Self::LogLevel => "log level (0-3)",
            Self::IdList => "integer list",
        }
    }
}

/// Default value of a schema entry, already in its coerced form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    Str(&'static str),
    Int(i64),
    Port(u16),
    LogLevel(LogLevel),
    IdList(&'static [i64]),
}

/// Declarative rule for one environment variable.
///
/// An entry without a default is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaEntry {
    pub name: &'static str,
    pub kind: VarKind,
    pub default: Option<Fallback>,
    pub description: &'static str,
}

impl SchemaEntry {
    pub const fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// Coerced value of a validated variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvValue {
    Str(String),
    Int(i64),
    Port(u16),
    LogLevel(LogLevel),
    IdList(Vec<i64>),
}

impl From<Fallback> for EnvValue {
    fn from(fallback: Fallback) -> Self {
        match fallback {
            Fallback::Str(s) => Self::Str(s.to_string()),
            Fallback::Int(n) => Self::Int(n),
            Fallback::Port(p) => Self::Port(p),
            Fallback::LogLevel(level) => Self::LogLevel(level),
            Fallback::IdList(ids) => Self::IdList(ids.to_vec()),
        }
    }
}

impl std::fmt::Display for EnvValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "\"{s}\""),
            Self::Int(n) => write!(f, "{n}"),
            Self::Port(p) => write!(f, "{p}"),
            Self::LogLevel(level) => write!(f, "{level}"),
            Self::IdList(ids) => {
                let joined = ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "[{joined}]")
            }
        }
    }
}

const fn entry(
    name: &'static str,
    kind: VarKind,
    default: Option<Fallback>,
    description: &'static str,
) -> SchemaEntry {
    SchemaEntry {
        name,
        kind,
        default,
        description,
    }
}

/// Every variable the bot reads
pub const SCHEMA: &[SchemaEntry] = &[
    entry(
        "TELEGRAM_API_TOKEN",
        VarKind::String,
        None,
        "Telegram Bot API token",
    ),
    entry("OPENAI_API_KEY", VarKind::String, None, "OpenAI API key"),
    entry(
        "GPT_VERSION",
        VarKind::String,
        Some(Fallback::Str("gpt-4-turbo")),
        "OpenAI model used for analysis",
    ),
    entry(
        "HUMAN_DESIGN_API_KEY",
        VarKind::String,
        Some(Fallback::Str("")),
        "Human Design API key",
    ),
    entry(
        "HUMAN_DESIGN_API_BASE_URL",
        VarKind::String,
        Some(Fallback::Str("")),
        "Human Design API base URL",
    ),
    entry(
        "MONGODB_HOST",
        VarKind::String,
        Some(Fallback::Str("localhost")),
        "MongoDB host",
    ),
    entry(
        "MONGODB_PORT",
        VarKind::Port,
        Some(Fallback::Port(27017)),
        "MongoDB port",
    ),
    entry(
        "MONGODB_USER",
        VarKind::String,
        Some(Fallback::Str("")),
        "MongoDB user",
    ),
    entry(
        "MONGODB_PASSWORD",
        VarKind::String,
        Some(Fallback::Str("")),
        "MongoDB password, empty disables authentication",
    ),
    entry(
        "MONGODB_DATABASE",
        VarKind::String,
        Some(Fallback::Str("euphoria")),
        "MongoDB database name",
    ),
    entry(
        "MONGO_EXPRESS_PORT",
        VarKind::Port,
        Some(Fallback::Port(8081)),
        "mongo-express admin UI port",
    ),
    entry(
        "LOG_LEVEL",
        VarKind::LogLevel,
        Some(Fallback::LogLevel(LogLevel::Info)),
        "0 error, 1 warn, 2 info, 3 debug",
    ),
    entry(
        "MAX_VOICE_MESSAGE_LENGTH_SECONDS",
        VarKind::Integer,
        Some(Fallback::Int(300)),
        "Longest voice message accepted",
    ),
    entry(
        "SUPPORT_CHAT_ID",
        VarKind::String,
        Some(Fallback::Str("")),
        "Chat receiving support requests",
    ),
    entry(
        "ADMIN_CHAT_ID",
        VarKind::String,
        Some(Fallback::Str("")),
        "Chat receiving admin notifications",
    ),
    entry(
        "ADMIN_IDS",
        VarKind::IdList,
        Some(Fallback::IdList(&[])),
        "Comma-separated Telegram user ids with admin rights",
    ),
    entry(
        "NOTIFICATION_ALERT_THRESHOLD",
        VarKind::Integer,
        Some(Fallback::Int(3)),
        "Failed notifications before alerting admins",
    ),
    entry(
        "MAX_NOTIFICATION_RETRIES",
        VarKind::Integer,
        Some(Fallback::Int(3)),
        "Delivery attempts per notification",
    ),
    entry(
        "REANALYSIS_BATCH_SIZE",
        VarKind::Integer,
        Some(Fallback::Int(5)),
        "Users reanalysed per batch",
    ),
    entry(
        "REANALYSIS_PROGRESS_INTERVAL",
        VarKind::Integer,
        Some(Fallback::Int(10)),
        "Progress report interval during reanalysis",
    ),
];

/// Find a schema entry by variable name
pub fn lookup(schema: &[SchemaEntry], name: &str) -> Option<SchemaEntry> {
    schema.iter().find(|e| e.name == name).copied()
}

/// Coerce a raw string to the declared kind.
///
/// The error is a human readable reason; the caller attaches the variable name.
pub fn coerce(kind: VarKind, raw: &str) -> Result<EnvValue, String> {
    match kind {
        VarKind::String => Ok(EnvValue::Str(raw.to_string())),
        VarKind::Integer => parse_integer(raw).map(EnvValue::Int),
        VarKind::Port => {
            let port = parse_integer(raw)?;
            u16::try_from(port)
                .ok()
                .filter(|p| *p != 0)
                .map(EnvValue::Port)
                .ok_or_else(|| format!("port must be between 1 and 65535, got {port}"))
        }
        VarKind::LogLevel => {
            let level = parse_integer(raw)?;
            LogLevel::try_from(level)
                .map(EnvValue::LogLevel)
                .map_err(|n| format!("log level must be one of 0, 1, 2, 3, got {n}"))
        }
        VarKind::IdList => parse_id_list(raw).map(EnvValue::IdList),
    }
}

fn parse_integer(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| "expected an integer".to_string())
}

/// Split a comma-separated id list.
///
/// Pieces are trimmed and empty pieces skipped, so `""` is the empty list.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| {
            piece
                .parse::<i64>()
                .map_err(|_| format!("\"{piece}\" is not an integer id"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_schema_names_are_unique() {
        let names: HashSet<_> = SCHEMA.iter().map(|e| e.name).collect();
        assert_eq!(names.len(), SCHEMA.len());
    }

    #[test]
    fn test_only_credentials_are_required() {
        let required: Vec<_> = SCHEMA
            .iter()
            .filter(|e| e.is_required())
            .map(|e| e.name)
            .collect();
        assert_eq!(required, vec!["TELEGRAM_API_TOKEN", "OPENAI_API_KEY"]);
    }

    #[test]
    fn test_defaults_match_declared_kind() {
        for entry in SCHEMA {
            let Some(default) = entry.default else {
                continue;
            };
            let matches = matches!(
                (entry.kind, default),
                (VarKind::String, Fallback::Str(_))
                    | (VarKind::Integer, Fallback::Int(_))
                    | (VarKind::Port, Fallback::Port(_))
                    | (VarKind::LogLevel, Fallback::LogLevel(_))
                    | (VarKind::IdList, Fallback::IdList(_))
            );
            assert!(matches, "default of {} has the wrong kind", entry.name);
        }
    }

    #[test]
    fn test_coerce_port() {
        assert_eq!(coerce(VarKind::Port, "12345"), Ok(EnvValue::Port(12345)));
        assert_eq!(coerce(VarKind::Port, " 80 "), Ok(EnvValue::Port(80)));
        assert!(coerce(VarKind::Port, "invalid-port").is_err());
        assert!(coerce(VarKind::Port, "0").is_err());
        assert!(coerce(VarKind::Port, "65536").is_err());
        assert!(coerce(VarKind::Port, "-1").is_err());
        assert!(coerce(VarKind::Port, "").is_err());
    }

    #[test]
    fn test_coerce_log_level() {
        assert_eq!(
            coerce(VarKind::LogLevel, "3"),
            Ok(EnvValue::LogLevel(LogLevel::Debug))
        );
        assert_eq!(
            coerce(VarKind::LogLevel, "0"),
            Ok(EnvValue::LogLevel(LogLevel::Error))
        );
        let err = coerce(VarKind::LogLevel, "5").unwrap_err();
        assert!(err.contains("0, 1, 2, 3"));
        assert!(coerce(VarKind::LogLevel, "debug").is_err());
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(coerce(VarKind::Integer, "300"), Ok(EnvValue::Int(300)));
        assert_eq!(coerce(VarKind::Integer, "-2"), Ok(EnvValue::Int(-2)));
        assert!(coerce(VarKind::Integer, "12.5").is_err());
        assert!(coerce(VarKind::Integer, "ten").is_err());
    }

    #[test]
    fn test_coerce_string_passes_through() {
        assert_eq!(
            coerce(VarKind::String, "  keep spaces "),
            Ok(EnvValue::Str("  keep spaces ".to_string()))
        );
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("123,456"), Ok(vec![123, 456]));
        assert_eq!(parse_id_list(" 123 , 456 "), Ok(vec![123, 456]));
        assert_eq!(parse_id_list(""), Ok(vec![]));
        assert_eq!(parse_id_list("123,"), Ok(vec![123]));
        assert!(parse_id_list("123,abc").is_err());
    }

    #[test]
    fn test_lookup() {
        let entry = lookup(SCHEMA, "MONGODB_PORT").unwrap();
        assert_eq!(entry.kind, VarKind::Port);
        assert_eq!(entry.default, Some(Fallback::Port(27017)));
        assert!(lookup(SCHEMA, "UNKNOWN").is_none());
    }
}
