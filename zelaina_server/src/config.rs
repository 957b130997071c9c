use std::{env, time::Duration};

use log::*;

const DEFAULT_ZSF_HOST: &str = "127.0.0.1";
const DEFAULT_ZSF_PORT: u16 = 3000;
const DEFAULT_ZSF_DATABASE_URL: &str = "sqlite://data/zelaina.db";
const DEFAULT_DB_RECONNECT_DELAY: Duration = Duration::from_secs(5);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// How long to wait before retrying when the database cannot be reached. The retry loop
    /// never gives up; the delay is the only knob.
    pub db_reconnect_delay: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_ZSF_HOST.to_string(),
            port: DEFAULT_ZSF_PORT,
            database_url: DEFAULT_ZSF_DATABASE_URL.to_string(),
            db_reconnect_delay: DEFAULT_DB_RECONNECT_DELAY,
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("ZSF_HOST").ok().unwrap_or_else(|| DEFAULT_ZSF_HOST.into());
        let port = env::var("ZSF_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for ZSF_PORT. {e} Using the default, {DEFAULT_ZSF_PORT}, instead."
                    );
                    DEFAULT_ZSF_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_ZSF_PORT);
        let database_url = env::var("ZSF_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ ZSF_DATABASE_URL is not set. Using the default, {DEFAULT_ZSF_DATABASE_URL}.");
            DEFAULT_ZSF_DATABASE_URL.to_string()
        });
        let db_reconnect_delay = env::var("ZSF_DB_RECONNECT_SECS")
            .ok()
            .and_then(|s| {
                s.parse::<u64>()
                    .map_err(|e| warn!("🪛️ Invalid configuration value for ZSF_DB_RECONNECT_SECS. {e}"))
                    .ok()
            })
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_DB_RECONNECT_DELAY);
        Self { host, port, database_url, db_reconnect_delay }
    }
}
