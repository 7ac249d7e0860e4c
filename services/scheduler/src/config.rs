use anyhow::Result;

use crate::db::DbConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Buffer size of the in-process broadcast channel.
    pub broadcast_capacity: usize,
    pub database: DbConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let log_level =
            std::env::var("BARCAMP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let broadcast_capacity = std::env::var("BARCAMP_BROADCAST_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(64);

        let database = DbConfig::from_env();

        Ok(Self {
            log_level,
            broadcast_capacity,
            database,
        })
    }
}
