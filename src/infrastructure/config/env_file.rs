//! `.env` file loading.
//!
//! File values act as defaults: a variable already present in the process
//! environment is never overwritten. Loading never fails; a missing or broken
//! file only means fewer variables.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

/// Which environment file to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    #[default]
    Default,
    Production,
}

impl RunMode {
    /// Name of the variable holding the mode indicator
    pub const INDICATOR_VAR: &'static str = "APP_ENV";

    /// `production` (any case, surrounding whitespace ignored) selects production
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        match indicator {
            Some(value) if value.trim().eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Default,
        }
    }

    /// Mode indicated by the current process environment
    pub fn from_process() -> Self {
        Self::from_indicator(std::env::var(Self::INDICATOR_VAR).ok().as_deref())
    }

    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Default => ".env",
            Self::Production => ".env.production",
        }
    }
}

/// Outcome of one load pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub path: PathBuf,
    pub found: bool,
    /// Variables set from the file
    pub applied: Vec<String>,
    /// Variables left untouched because the process already had them
    pub skipped: Vec<String>,
    pub malformed_lines: usize,
}

impl LoadReport {
    fn empty(path: PathBuf) -> Self {
        Self {
            path,
            found: false,
            applied: Vec::new(),
            skipped: Vec::new(),
            malformed_lines: 0,
        }
    }
}

/// Loads `KEY=value` files into the process environment
#[derive(Debug, Clone)]
pub struct EnvFileLoader {
    dir: PathBuf,
}

impl EnvFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, mode: RunMode) -> PathBuf {
        self.dir.join(mode.file_name())
    }

    /// Load the file selected by `mode`
    pub fn load(&self, mode: RunMode) -> LoadReport {
        load_file(&self.path_for(mode))
    }
}

/// Merge one env file into the process environment
pub fn load_file(path: &Path) -> LoadReport {
    let mut report = LoadReport::empty(path.to_path_buf());

    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            debug!(path = %path.display(), "no env file, nothing to load");
            return report;
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "env file unreadable, skipping");
            return report;
        }
    };
    report.found = true;

    for item in iter {
        match item {
            Ok((key, value)) => {
                if std::env::var_os(&key).is_some() {
                    report.skipped.push(key);
                } else {
                    std::env::set_var(&key, value);
                    report.applied.push(key);
                }
            }
            Err(dotenvy::Error::LineParse(line, index)) => {
                warn!(
                    path = %path.display(),
                    line = %line,
                    index,
                    "ignoring malformed env file line"
                );
                report.malformed_lines += 1;
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "stopped reading env file");
                break;
            }
        }
    }

    debug!(
        path = %path.display(),
        applied = report.applied.len(),
        skipped = report.skipped.len(),
        malformed = report.malformed_lines,
        "env file loaded"
    );
    report
}
