use thiserror::Error;

/// A single environment variable that failed validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnvVarError {
    #[error("{name}: required variable is not set")]
    MissingRequired { name: String },

    #[error("{name}: invalid value \"{value}\" ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

impl EnvVarError {
    /// Name of the offending variable
    pub fn name(&self) -> &str {
        match self {
            Self::MissingRequired { name } | Self::InvalidValue { name, .. } => name,
        }
    }

    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingRequired { .. })
    }
}

/// Aggregate failure of one validation pass.
///
/// Holds every broken or missing variable in schema order, never just the first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid environment variables:\n{}", format_errors(.errors))]
pub struct ValidationError {
    errors: Vec<EnvVarError>,
}

fn format_errors(errors: &[EnvVarError]) -> String {
    errors
        .iter()
        .map(|e| format!("    {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationError {
    /// Build an aggregate from collected failures, `None` when there are none
    pub fn from_errors(errors: Vec<EnvVarError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    pub fn errors(&self) -> &[EnvVarError] {
        &self.errors
    }

    /// Names of every offending variable
    pub fn names(&self) -> Vec<&str> {
        self.errors.iter().map(EnvVarError::name).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.errors.iter().any(|e| e.name() == name)
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always false, an aggregate is never built from zero failures
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
