use std::num::{NonZeroU32, NonZeroUsize};

/// Maximum number of characters accepted in a message body.
pub const MESSAGE_MAX_LENGTH: usize = 1000;

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{0} must be set in .env file or environment variable")]
    Missing(&'static str),
    #[error("{name} must be a valid {expected}, got {value:?}")]
    Invalid { name: &'static str, expected: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone)]
pub struct Env {
    pub database: DatabaseConfig,
    pub ip: String,
    pub port: u16,
    pub workers: NonZeroUsize,
}

impl Env {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", "5", "positive integer")?;

        let ip = lookup("IP").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or(&lookup, "PORT", "8080", "u16 integer")?;
        let workers = parse_or(&lookup, "WORKERS", "2", "positive integer")?;

        Ok(Env { database: DatabaseConfig { url, max_connections }, ip, port, workers })
    }
}

fn parse_or<F, T>(
    lookup: &F,
    name: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    let value = raw.trim();
    value
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { name, expected, value: value.to_string() })
}
