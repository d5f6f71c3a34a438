//! Maps a validated environment onto the sectioned [`Config`].

use super::validator::ValidatedEnv;
use crate::domain::models::config::{
    Config, DatabaseConfig, HumanDesignConfig, LoggingConfig, OpenAiConfig, ReanalysisConfig,
    SupportConfig, TelegramConfig,
};

/// Build the configuration object.
///
/// Pure and infallible: `env` is expected to come from [`super::validate`] run
/// against [`super::SCHEMA`]. A variable of the wrong kind would fall back to
/// its zero value, which cannot happen for that schema.
pub fn assemble(env: &ValidatedEnv) -> Config {
    let port = port_string(env, "MONGODB_PORT");
    let host = text(env, "MONGODB_HOST");
    let user = text(env, "MONGODB_USER");
    let password = text(env, "MONGODB_PASSWORD");
    let database = text(env, "MONGODB_DATABASE");
    let uri = connection_uri(&host, &port, &user, &password, &database);

    Config {
        telegram: TelegramConfig {
            token: text(env, "TELEGRAM_API_TOKEN"),
            max_voice_message_length_seconds: int(env, "MAX_VOICE_MESSAGE_LENGTH_SECONDS"),
        },
        openai: OpenAiConfig {
            api_key: text(env, "OPENAI_API_KEY"),
            gpt_version: text(env, "GPT_VERSION"),
        },
        human_design: HumanDesignConfig {
            api_key: text(env, "HUMAN_DESIGN_API_KEY"),
            base_url: text(env, "HUMAN_DESIGN_API_BASE_URL"),
        },
        database: DatabaseConfig {
            host,
            port,
            user,
            password,
            database,
            mongo_express_port: port_string(env, "MONGO_EXPRESS_PORT"),
            uri,
        },
        logging: LoggingConfig {
            level: env.log_level("LOG_LEVEL").unwrap_or_default(),
        },
        support: SupportConfig {
            chat_id: text(env, "SUPPORT_CHAT_ID"),
            admin_chat_id: text(env, "ADMIN_CHAT_ID"),
            admin_ids: env.id_list("ADMIN_IDS").map(<[i64]>::to_vec).unwrap_or_default(),
            notification_alert_threshold: int(env, "NOTIFICATION_ALERT_THRESHOLD"),
            max_notification_retries: int(env, "MAX_NOTIFICATION_RETRIES"),
        },
        reanalysis: ReanalysisConfig {
            batch_size: int(env, "REANALYSIS_BATCH_SIZE"),
            progress_interval: int(env, "REANALYSIS_PROGRESS_INTERVAL"),
        },
    }
}

/// MongoDB connection string.
///
/// With a password the credentials are embedded and `authSource=admin` is set.
/// Without one the user is dropped as well, even when it is non-empty.
pub fn connection_uri(host: &str, port: &str, user: &str, password: &str, database: &str) -> String {
    if password.is_empty() {
        format!("mongodb://{host}:{port}/{database}")
    } else {
        format!("mongodb://{user}:{password}@{host}:{port}/{database}?authSource=admin")
    }
}

fn text(env: &ValidatedEnv, name: &str) -> String {
    debug_assert!(env.str(name).is_some(), "{name} is not a validated string");
    env.str(name).unwrap_or_default().to_string()
}

fn int(env: &ValidatedEnv, name: &str) -> i64 {
    debug_assert!(env.int(name).is_some(), "{name} is not a validated integer");
    env.int(name).unwrap_or_default()
}

fn port_string(env: &ValidatedEnv, name: &str) -> String {
    debug_assert!(env.port(name).is_some(), "{name} is not a validated port");
    env.port(name).unwrap_or_default().to_string()
}
