use dotenv::dotenv;
use std::env;
use thiserror::Error;
use tracing::{Level, info};

const ORDER_CACHE_CAPACITY: &str = "ORDER_CACHE_CAPACITY";
const ORDER_CACHE_LOG_LEVEL: &str = "ORDER_CACHE_LOG_LEVEL";

/// Slots reserved up front for orders, identifiers and securities.
pub const DEFAULT_CAPACITY: usize = 1_000_000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to parse ORDER_CACHE_CAPACITY: {0}")]
    InvalidCapacity(String),

    #[error("failed to parse ORDER_CACHE_LOG_LEVEL: {0}")]
    InvalidLogLevel(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Initial reservation for the order store and its indices. Zero reserves nothing.
    pub initial_capacity: usize,
    pub log_level: Level,
}

impl CacheConfig {
    pub fn try_from_env() -> Result<CacheConfig, ConfigError> {
        // Load .env file
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> Result<CacheConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let initial_capacity = match lookup(ORDER_CACHE_CAPACITY) {
            Some(raw) => {
                let trimmed = raw.trim();
                trimmed
                    .replace('_', "")
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidCapacity(trimmed.to_string()))?
            }
            None => DEFAULT_CAPACITY,
        };

        let log_level = match lookup(ORDER_CACHE_LOG_LEVEL) {
            Some(raw) => {
                let trimmed = raw.trim();
                trimmed
                    .parse::<Level>()
                    .map_err(|_| ConfigError::InvalidLogLevel(trimmed.to_string()))?
            }
            None => Level::INFO,
        };

        info!("Order cache capacity: {}, log level: {}", initial_capacity, log_level);

        Ok(CacheConfig {
            initial_capacity,
            log_level,
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            initial_capacity: DEFAULT_CAPACITY,
            log_level: Level::INFO,
        }
    }
}
