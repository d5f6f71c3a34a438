//! Implementation of the `euphoria check` command.

use anyhow::{bail, Result};
use console::style;
use serde::Serialize;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::cli::Cli;
use crate::domain::errors::{EnvVarError, ValidationError};
use crate::infrastructure::config::{
    ConfigLoader, LoadOutcome, LoadReport, RunMode, ValidationMode, SCHEMA,
};
use crate::infrastructure::logging::LoggerImpl;

#[derive(Debug, Serialize)]
pub struct CheckOutput {
    pub valid: bool,
    pub mode: RunMode,
    pub env_file: Option<LoadReport>,
    pub variables: usize,
    pub problems: Vec<Problem>,
}

#[derive(Debug, Serialize)]
pub struct Problem {
    pub name: String,
    pub kind: &'static str,
    pub message: String,
}

impl From<&EnvVarError> for Problem {
    fn from(err: &EnvVarError) -> Self {
        Self {
            name: err.name().to_string(),
            kind: if err.is_missing() {
                "missing_required"
            } else {
                "invalid_value"
            },
            message: err.to_string(),
        }
    }
}

impl CommandOutput for CheckOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();
        match &self.env_file {
            Some(report) if report.found => lines.push(format!(
                "Loaded {} ({} applied, {} already set, {} malformed lines)",
                report.path.display(),
                report.applied.len(),
                report.skipped.len(),
                report.malformed_lines
            )),
            Some(report) => lines.push(format!("No env file at {}", report.path.display())),
            None => lines.push("Env file loading disabled".to_string()),
        }

        if self.valid {
            lines.push(format!(
                "{} {} variables valid",
                style("OK").green().bold(),
                self.variables
            ));
        } else {
            let mut table = list_table(&["variable", "problem"]);
            for problem in &self.problems {
                table.add_row(vec![problem.name.clone(), problem.message.clone()]);
            }
            lines.push(format!(
                "{} {} problem(s):",
                style("INVALID").red().bold(),
                self.problems.len()
            ));
            lines.push(table.to_string());
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl CheckOutput {
    pub fn new(
        mode: RunMode,
        env_file: Option<LoadReport>,
        failure: Option<&ValidationError>,
    ) -> Self {
        Self {
            valid: failure.is_none(),
            mode,
            env_file,
            variables: SCHEMA.len(),
            problems: failure
                .map(|e| e.errors().iter().map(Problem::from).collect())
                .unwrap_or_default(),
        }
    }
}

pub fn execute(cli: &Cli, logger: &mut LoggerImpl) -> Result<()> {
    let LoadOutcome {
        mode,
        report,
        result,
    } = ConfigLoader::run(&cli.load_options(ValidationMode::Throwing));

    match result {
        Ok(config) => {
            logger.set_level(config.logging.level)?;
            tracing::info!(mode = ?mode, "environment is valid");
            output(&CheckOutput::new(mode, report, None), cli.json);
            Ok(())
        }
        Err(err) => {
            output(&CheckOutput::new(mode, report, Some(&err)), cli.json);
            bail!("{} invalid environment variable(s)", err.len())
        }
    }
}
