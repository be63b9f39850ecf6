use std::env::var;
use std::str::FromStr;
use std::time::Duration;

use dotenvy::dotenv;
use thiserror::Error;

use crate::{
    application::usecases::execute_broadcast::BroadcastConfig,
    domain::value_objects::RecipientId,
    infrastructure::{messaging::telegram::DEFAULT_API_URL, scheduling::worker::WorkerConfig},
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("An error occured while getting {0} env param")]
    Missing(&'static str),
    #[error("An error occured while parsing {key} env param: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub scheme: String,
    pub host: String,
    pub database_url: String,
    pub redis_url: String,
    pub jobs_namespace: String,
    pub telegram_bot_token: String,
    pub telegram_api_url: String,
    pub admin_ids: Vec<RecipientId>,
    pub jwt_secret: String,
    pub jwt_expiration: Duration,
    pub broadcast_delay: Duration,
    pub delivery_timeout: Option<Duration>,
    pub scheduler_poll_interval: Duration,
    pub misfire_grace: Duration,
}

impl Config {
    pub fn try_parse() -> Result<Config, ConfigError> {
        let _ = dotenv();
        Self::from_lookup(|key| var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        let delivery_timeout_secs: u64 = parse_or(&lookup, "DELIVERY_TIMEOUT_SECS", 30)?;

        Ok(Config {
            port: parse(&required("PORT")?, "PORT")?,
            scheme: required("SCHEME")?,
            host: required("HOST")?,
            database_url: required("DATABASE_URL")?,
            redis_url: required("REDIS_URL")?,
            jobs_namespace: lookup("JOBS_NAMESPACE").unwrap_or_else(|| "broadcaster".to_string()),
            telegram_bot_token: required("TELEGRAM_BOT_TOKEN")?,
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            admin_ids: parse_admin_ids(lookup("ADMIN_IDS").as_deref().unwrap_or_default())?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expiration: Duration::from_secs(parse_or(&lookup, "JWT_EXPIRATION_SECS", 3600)?),
            broadcast_delay: Duration::from_millis(parse_or(&lookup, "BROADCAST_DELAY_MS", 500)?),
            delivery_timeout: (delivery_timeout_secs > 0)
                .then(|| Duration::from_secs(delivery_timeout_secs)),
            scheduler_poll_interval: Duration::from_millis(parse_or(
                &lookup,
                "SCHEDULER_POLL_MS",
                1000,
            )?),
            misfire_grace: Duration::from_secs(parse_or(&lookup, "MISFIRE_GRACE_SECS", 10_000)?),
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    pub fn broadcast(&self) -> BroadcastConfig {
        BroadcastConfig {
            delay: self.broadcast_delay,
            delivery_timeout: self.delivery_timeout,
        }
    }

    pub fn worker(&self) -> WorkerConfig {
        WorkerConfig {
            poll_interval: self.scheduler_poll_interval,
            misfire_grace: self.misfire_grace,
        }
    }
}

fn parse<T: FromStr>(value: &str, key: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_or<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(value) => parse(&value, key),
        None => Ok(default),
    }
}

fn parse_admin_ids(value: &str) -> Result<Vec<RecipientId>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| parse::<i64>(id, "ADMIN_IDS").map(RecipientId))
        .collect()
}
