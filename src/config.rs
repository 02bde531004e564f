use std::{env, fs, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;

use crate::feed_client::DEFAULT_FEED_URL;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Service settings: a JSON file, then `.env` / environment overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub port: String,
    pub db_connection: String,
    pub feed_url: String,
    pub feed_timeout_secs: Option<u64>,
    pub db_max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: "8080".to_owned(),
            db_connection: String::new(),
            feed_url: DEFAULT_FEED_URL.to_owned(),
            feed_timeout_secs: None,
            db_max_connections: 5,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let config = match env::var("CONFIG_FILE") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            Err(_) => Self::default(),
        };

        config.with_overrides(|key| env::var(key).ok())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading config file {}", path.display());
        let text = fs::read_to_string(path)
            .with_context(|| format!("Can't read config file {}", path.display()))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Can't parse config file {}", path.display()))
    }

    /// Applies `PORT`, `DATABASE_URL`, `FEED_URL`, `FEED_TIMEOUT_SECS` and
    /// `DB_MAX_CONNECTIONS` from `lookup`, then checks the result.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.port = port;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.db_connection = url;
        }
        if let Some(url) = lookup("FEED_URL") {
            self.feed_url = url;
        }
        if let Some(secs) = lookup("FEED_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .with_context(|| format!("FEED_TIMEOUT_SECS is not a number: {secs}"))?;
            self.feed_timeout_secs = Some(secs);
        }
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            self.db_max_connections = max
                .parse::<u32>()
                .with_context(|| format!("DB_MAX_CONNECTIONS is not a number: {max}"))?;
        }

        if self.db_connection.is_empty() {
            bail!("Database connection string is not set (db_connection or DATABASE_URL)");
        }
        if self.port.is_empty() {
            bail!("Port is not set");
        }

        Ok(self)
    }

    pub fn feed_timeout(&self) -> Option<Duration> {
        self.feed_timeout_secs.map(Duration::from_secs)
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
