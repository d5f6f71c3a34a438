use std::path::PathBuf;

use tracing::{debug, info};

use super::assembler::assemble;
use super::env_file::{EnvFileLoader, LoadReport, RunMode};
use super::schema::SCHEMA;
use super::validator::{validate, RawEnv, ValidationMode};
use crate::domain::errors::ValidationError;
use crate::domain::models::Config;

/// Options for one startup load
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Directory holding `.env` / `.env.production`
    pub env_dir: PathBuf,

    /// Explicit mode, `None` reads the `APP_ENV` indicator
    pub mode: Option<RunMode>,

    /// Read the env file before validating
    pub load_env_file: bool,

    pub validation: ValidationMode,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            env_dir: PathBuf::from("."),
            mode: None,
            load_env_file: true,
            validation: ValidationMode::Throwing,
        }
    }
}

impl LoadOptions {
    pub fn resolved_mode(&self) -> RunMode {
        self.mode.unwrap_or_else(RunMode::from_process)
    }
}

/// Everything one pipeline run produced
#[derive(Debug)]
pub struct LoadOutcome {
    pub mode: RunMode,

    /// `None` when env file loading was disabled
    pub report: Option<LoadReport>,

    pub result: Result<Config, ValidationError>,
}

/// Configuration pipeline: Load, Validate, Assemble.
///
/// Run it once from the program bootstrap and pass the returned [`Config`]
/// down to collaborators explicitly.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the process environment
    pub fn load(options: &LoadOptions) -> Result<Config, ValidationError> {
        Self::load_with_report(options).map(|(config, _)| config)
    }

    /// Like [`Self::load`], also returning what the env file step did
    pub fn load_with_report(
        options: &LoadOptions,
    ) -> Result<(Config, Option<LoadReport>), ValidationError> {
        let outcome = Self::run(options);
        outcome.result.map(|config| (config, outcome.report))
    }

    /// Run the whole pipeline, keeping the env file report on failure too
    pub fn run(options: &LoadOptions) -> LoadOutcome {
        let mode = options.resolved_mode();
        let report = options
            .load_env_file
            .then(|| EnvFileLoader::new(&options.env_dir).load(mode));

        let raw = RawEnv::from_process();
        let result = Self::from_raw(&raw, options.validation);

        if let Ok(config) = &result {
            info!(
                mode = ?mode,
                env_file_found = report.as_ref().is_some_and(|r| r.found),
                log_level = config.logging.level.as_u8(),
                "configuration loaded"
            );
        }
        LoadOutcome {
            mode,
            report,
            result,
        }
    }

    /// Validate and assemble an already collected environment
    pub fn from_raw(raw: &RawEnv, mode: ValidationMode) -> Result<Config, ValidationError> {
        let env = validate(raw, SCHEMA, mode)?;
        let config = assemble(&env);
        debug!(database = %config.redacted().database.uri, "configuration assembled");
        Ok(config)
    }
}
