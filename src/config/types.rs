//! Runtime configuration types. Values are read once at startup and never change afterwards.

use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;

/// Connection parameters for the relational store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl StoreConfig {
    /// Options for a connection to the configured database.
    pub fn connect_options(&self) -> PgConnectOptions {
        self.connect_options_for(&self.database)
    }

    /// Same server and credentials, different database (used to reach `postgres` for bootstrap).
    pub fn connect_options_for(&self, database: &str) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(database)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            host: "localhost".into(),
            database: "student_db".into(),
            user: "postgres".into(),
            password: "password".into(),
            port: 5432,
        }
    }
}

/// HTTP listener settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Largest accepted request body, in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            body_limit: 1024 * 1024,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub server: ServerConfig,
}
