//! Command-line interface.

pub mod commands;
pub mod output;
pub mod types;

use anyhow::{Context, Result};
use console::style;

pub use types::{Cli, Commands};

use crate::domain::models::LogLevel;
use crate::infrastructure::logging::{LogConfig, LogSettings, LoggerImpl};

/// Run the parsed command.
///
/// The logger starts at the default level so the pipeline's own events are
/// recorded; commands raise or lower it once `LOG_LEVEL` is known.
pub fn run(cli: &Cli) -> Result<()> {
    let mut logger = init_logging(LogLevel::default())?;
    match &cli.command {
        Commands::Check => commands::check::execute(cli, &mut logger),
        Commands::Show { flat } => commands::show::execute(cli, *flat, &mut logger),
        Commands::Schema => commands::schema::execute(cli),
    }
}

/// Install the global logger at `level`, output settings from `EUPHORIA_LOG_*`
pub fn init_logging(level: LogLevel) -> Result<LoggerImpl> {
    let settings = LogSettings::load()?;
    LoggerImpl::init(&LogConfig::new(level, settings)).context("Failed to set up logging")
}

/// Report a command failure on stderr and exit with status 1
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", style("Error:").red().bold());
    }
    std::process::exit(1)
}
