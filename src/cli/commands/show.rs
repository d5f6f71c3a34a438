//! Implementation of the `euphoria show` command.

use std::collections::BTreeMap;

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{list_table, or_unset, output, CommandOutput};
use crate::cli::Cli;
use crate::domain::models::Config;
use crate::infrastructure::config::{ConfigLoader, ValidationMode};
use crate::infrastructure::logging::LoggerImpl;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShowOutput {
    Sections(Config),
    Flat(BTreeMap<&'static str, String>),
}

impl ShowOutput {
    /// Secrets are always masked before anything is printed
    pub fn new(config: &Config, flat: bool) -> Self {
        let redacted = config.redacted();
        if flat {
            Self::Flat(redacted.legacy().to_map())
        } else {
            Self::Sections(redacted)
        }
    }
}

fn section_rows(config: &Config) -> Vec<[String; 3]> {
    let row = |section: &str, key: &str, value: String| {
        [section.to_string(), key.to_string(), value]
    };
    let ids = config
        .support
        .admin_ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    vec![
        row("telegram", "token", or_unset(&config.telegram.token)),
        row(
            "telegram",
            "max_voice_message_length_seconds",
            config.telegram.max_voice_message_length_seconds.to_string(),
        ),
        row("openai", "api_key", or_unset(&config.openai.api_key)),
        row("openai", "gpt_version", config.openai.gpt_version.clone()),
        row("human_design", "api_key", or_unset(&config.human_design.api_key)),
        row("human_design", "base_url", or_unset(&config.human_design.base_url)),
        row("database", "host", config.database.host.clone()),
        row("database", "port", config.database.port.clone()),
        row("database", "user", or_unset(&config.database.user)),
        row("database", "password", or_unset(&config.database.password)),
        row("database", "database", config.database.database.clone()),
        row(
            "database",
            "mongo_express_port",
            config.database.mongo_express_port.clone(),
        ),
        row("database", "uri", config.database.uri.clone()),
        row("logging", "level", config.logging.level.to_string()),
        row("support", "chat_id", or_unset(&config.support.chat_id)),
        row("support", "admin_chat_id", or_unset(&config.support.admin_chat_id)),
        row("support", "admin_ids", or_unset(&ids)),
        row(
            "support",
            "notification_alert_threshold",
            config.support.notification_alert_threshold.to_string(),
        ),
        row(
            "support",
            "max_notification_retries",
            config.support.max_notification_retries.to_string(),
        ),
        row(
            "reanalysis",
            "batch_size",
            config.reanalysis.batch_size.to_string(),
        ),
        row(
            "reanalysis",
            "progress_interval",
            config.reanalysis.progress_interval.to_string(),
        ),
    ]
}

impl CommandOutput for ShowOutput {
    fn to_human(&self) -> String {
        match self {
            Self::Sections(config) => {
                let mut table = list_table(&["section", "key", "value"]);
                for row in section_rows(config) {
                    table.add_row(row.to_vec());
                }
                table.to_string()
            }
            Self::Flat(aliases) => {
                let mut table = list_table(&["variable", "value"]);
                for (name, value) in aliases {
                    table.add_row(vec![(*name).to_string(), or_unset(value)]);
                }
                table.to_string()
            }
        }
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(cli: &Cli, flat: bool, logger: &mut LoggerImpl) -> Result<()> {
    let config = ConfigLoader::load(&cli.load_options(ValidationMode::Terminating))?;
    logger.set_level(config.logging.level)?;

    output(&ShowOutput::new(&config, flat), cli.json);
    Ok(())
}
