//! Load configuration from environment variables, falling back to local-development defaults.

use crate::config::types::{AppConfig, ServerConfig, StoreConfig};
use crate::error::ConfigError;
use std::str::FromStr;

impl AppConfig {
    /// Read configuration from the process environment. Call after `dotenvy::dotenv()`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_defaults = StoreConfig::default();
        let server_defaults = ServerConfig::default();
        let text = |key: &str, default: String| lookup(key).unwrap_or(default);

        let store = StoreConfig {
            host: text("DB_HOST", store_defaults.host),
            database: text("DB_NAME", store_defaults.database),
            user: text("DB_USER", store_defaults.user),
            password: text("DB_PASSWORD", store_defaults.password),
            port: parsed(&lookup, "DB_PORT", store_defaults.port)?,
        };
        let server = ServerConfig {
            bind_addr: parsed(&lookup, "BIND_ADDR", server_defaults.bind_addr)?,
            body_limit: parsed(&lookup, "BODY_LIMIT_BYTES", server_defaults.body_limit)?,
        };
        Ok(AppConfig { store, server })
    }
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
    }
}
