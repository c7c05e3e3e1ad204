use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Everything the gateway and the worker read from the environment.
///
/// Resolved once at startup; a missing or malformed value is fatal before any
/// request is served, never a per-request error.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub redis_url: String,
    pub kafka_brokers: String,
    pub order_queue_topic: String,
    pub dead_letter_topic: String,
    /// Format string for the `Location` header on order acceptance, with a
    /// single `{}` placeholder for the order number.
    pub status_uri_format: String,
    pub cache_ttl: Duration,
    pub consumer_group: String,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = required("DATABASE_URL")?;
        let redis_url = required("REDIS_URL")?;
        let kafka_brokers = required("KAFKA_BROKERS")?;
        let order_queue_topic = required("ORDER_QUEUE_TOPIC")?;
        let status_uri_format = required("ORDER_STATUS_URI_FORMAT")?;

        if !status_uri_format.contains("{}") {
            return Err(ConfigError::Invalid(
                "ORDER_STATUS_URI_FORMAT",
                "must contain a '{}' placeholder for the order number".to_string(),
            ));
        }

        let dead_letter_topic = env::var("DEAD_LETTER_TOPIC")
            .unwrap_or_else(|_| format!("{}.dlq", order_queue_topic));

        let ttl_minutes: u64 = env::var("CACHE_TTL_MINUTES")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|e| ConfigError::Invalid("CACHE_TTL_MINUTES", format!("{e}")))?;

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|e| ConfigError::Invalid("PORT", format!("{e}")))?;

        Ok(AppConfig {
            database_url,
            redis_url,
            kafka_brokers,
            order_queue_topic,
            dead_letter_topic,
            status_uri_format,
            cache_ttl: Duration::from_secs(ttl_minutes * 60),
            consumer_group: env::var("CONSUMER_GROUP")
                .unwrap_or_else(|_| "fulfillment-worker".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
        })
    }

    /// Expand the status URI format with an order number.
    pub fn status_location(&self, order_number: &str) -> String {
        self.status_uri_format.replacen("{}", order_number, 1)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}
