//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::infrastructure::config::{LoadOptions, RunMode, ValidationMode};

#[derive(Parser, Debug)]
#[command(name = "euphoria")]
#[command(about = "Euphoria bot configuration tool", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Environment mode; `production` reads `.env.production`
    #[arg(long, global = true, env = "APP_ENV", value_parser = parse_mode)]
    pub mode: Option<RunMode>,

    /// Directory containing the env files
    #[arg(long, global = true, default_value = ".")]
    pub env_dir: PathBuf,

    /// Only use variables already set in the process environment
    #[arg(long, global = true)]
    pub no_env_file: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Validate the environment and report every problem
    Check,

    /// Print the assembled configuration with secrets masked
    Show {
        /// Show legacy flat variable names instead of sections
        #[arg(long)]
        flat: bool,
    },

    /// List every environment variable the bot reads
    Schema,
}

#[allow(clippy::unnecessary_wraps)]
fn parse_mode(value: &str) -> Result<RunMode, String> {
    Ok(RunMode::from_indicator(Some(value)))
}

impl Cli {
    pub fn load_options(&self, validation: ValidationMode) -> LoadOptions {
        LoadOptions {
            env_dir: self.env_dir.clone(),
            mode: self.mode,
            load_env_file: !self.no_env_file,
            validation,
        }
    }
}
