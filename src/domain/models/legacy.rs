//! Flat, upper-case aliases for every configuration field.
//!
//! Older call sites read settings by their environment variable name instead of
//! going through the sections. The aliases borrow from [`Config`], so they can
//! never disagree with it.

use std::collections::BTreeMap;

use super::config::{Config, LogLevel};

/// Read-only flat view over a [`Config`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(non_snake_case)]
#[allow(missing_docs)]
pub struct LegacyAliases<'a> {
    pub TELEGRAM_API_TOKEN: &'a str,
    pub MAX_VOICE_MESSAGE_LENGTH_SECONDS: i64,
    pub OPENAI_API_KEY: &'a str,
    pub GPT_VERSION: &'a str,
    pub HUMAN_DESIGN_API_KEY: &'a str,
    pub HUMAN_DESIGN_API_BASE_URL: &'a str,
    pub MONGODB_HOST: &'a str,
    pub MONGODB_PORT: &'a str,
    pub MONGODB_USER: &'a str,
    pub MONGODB_PASSWORD: &'a str,
    pub MONGODB_DATABASE: &'a str,
    pub MONGO_EXPRESS_PORT: &'a str,
    pub MONGODB_URI: &'a str,
    pub LOG_LEVEL: LogLevel,
    pub SUPPORT_CHAT_ID: &'a str,
    pub ADMIN_CHAT_ID: &'a str,
    pub ADMIN_IDS: &'a [i64],
    pub NOTIFICATION_ALERT_THRESHOLD: i64,
    pub MAX_NOTIFICATION_RETRIES: i64,
    pub REANALYSIS_BATCH_SIZE: i64,
    pub REANALYSIS_PROGRESS_INTERVAL: i64,
}

impl<'a> LegacyAliases<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            TELEGRAM_API_TOKEN: &config.telegram.token,
            MAX_VOICE_MESSAGE_LENGTH_SECONDS: config.telegram.max_voice_message_length_seconds,
            OPENAI_API_KEY: &config.openai.api_key,
            GPT_VERSION: &config.openai.gpt_version,
            HUMAN_DESIGN_API_KEY: &config.human_design.api_key,
            HUMAN_DESIGN_API_BASE_URL: &config.human_design.base_url,
            MONGODB_HOST: &config.database.host,
            MONGODB_PORT: &config.database.port,
            MONGODB_USER: &config.database.user,
            MONGODB_PASSWORD: &config.database.password,
            MONGODB_DATABASE: &config.database.database,
            MONGO_EXPRESS_PORT: &config.database.mongo_express_port,
            MONGODB_URI: &config.database.uri,
            LOG_LEVEL: config.logging.level,
            SUPPORT_CHAT_ID: &config.support.chat_id,
            ADMIN_CHAT_ID: &config.support.admin_chat_id,
            ADMIN_IDS: &config.support.admin_ids,
            NOTIFICATION_ALERT_THRESHOLD: config.support.notification_alert_threshold,
            MAX_NOTIFICATION_RETRIES: config.support.max_notification_retries,
            REANALYSIS_BATCH_SIZE: config.reanalysis.batch_size,
            REANALYSIS_PROGRESS_INTERVAL: config.reanalysis.progress_interval,
        }
    }

    /// Every alias rendered as text, keyed by its legacy name
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        let ids = self
            .ADMIN_IDS
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");

        BTreeMap::from([
            ("TELEGRAM_API_TOKEN", self.TELEGRAM_API_TOKEN.to_string()),
            (
                "MAX_VOICE_MESSAGE_LENGTH_SECONDS",
                self.MAX_VOICE_MESSAGE_LENGTH_SECONDS.to_string(),
            ),
            ("OPENAI_API_KEY", self.OPENAI_API_KEY.to_string()),
            ("GPT_VERSION", self.GPT_VERSION.to_string()),
            ("HUMAN_DESIGN_API_KEY", self.HUMAN_DESIGN_API_KEY.to_string()),
            (
                "HUMAN_DESIGN_API_BASE_URL",
                self.HUMAN_DESIGN_API_BASE_URL.to_string(),
            ),
            ("MONGODB_HOST", self.MONGODB_HOST.to_string()),
            ("MONGODB_PORT", self.MONGODB_PORT.to_string()),
            ("MONGODB_USER", self.MONGODB_USER.to_string()),
            ("MONGODB_PASSWORD", self.MONGODB_PASSWORD.to_string()),
            ("MONGODB_DATABASE", self.MONGODB_DATABASE.to_string()),
            ("MONGO_EXPRESS_PORT", self.MONGO_EXPRESS_PORT.to_string()),
            ("MONGODB_URI", self.MONGODB_URI.to_string()),
            ("LOG_LEVEL", self.LOG_LEVEL.as_u8().to_string()),
            ("SUPPORT_CHAT_ID", self.SUPPORT_CHAT_ID.to_string()),
            ("ADMIN_CHAT_ID", self.ADMIN_CHAT_ID.to_string()),
            ("ADMIN_IDS", ids),
            (
                "NOTIFICATION_ALERT_THRESHOLD",
                self.NOTIFICATION_ALERT_THRESHOLD.to_string(),
            ),
            (
                "MAX_NOTIFICATION_RETRIES",
                self.MAX_NOTIFICATION_RETRIES.to_string(),
            ),
            (
                "REANALYSIS_BATCH_SIZE",
                self.REANALYSIS_BATCH_SIZE.to_string(),
            ),
            (
                "REANALYSIS_PROGRESS_INTERVAL",
                self.REANALYSIS_PROGRESS_INTERVAL.to_string(),
            ),
        ])
    }

    /// Look up one alias by its legacy name
    pub fn get(&self, name: &str) -> Option<String> {
        self.to_map().remove(name)
    }
}

impl Config {
    /// Flat legacy view of this configuration
    pub fn legacy(&self) -> LegacyAliases<'_> {
        LegacyAliases::new(self)
    }
}
