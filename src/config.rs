use std::env;

use thiserror::Error;

const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} has invalid value {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind_address: String,
    /// `None` selects the in-memory store.
    pub database: Option<DatabaseConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_address = lookup("BIND_ADDRESS")
            .filter(|addr| !addr.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let database = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
                    Some(raw) => raw
                        .trim()
                        .parse::<u32>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or(ConfigError::Invalid {
                            key: "DATABASE_MAX_CONNECTIONS",
                            value: raw,
                        })?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                let run_migrations = match lookup("RUN_MIGRATIONS") {
                    Some(raw) => parse_bool(&raw).ok_or(ConfigError::Invalid {
                        key: "RUN_MIGRATIONS",
                        value: raw,
                    })?,
                    None => true,
                };
                Some(DatabaseConfig {
                    url,
                    max_connections,
                    run_migrations,
                })
            }
            None => None,
        };

        Ok(Config {
            bind_address,
            database,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
