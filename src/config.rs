use std::{net::SocketAddr, str::FromStr, time::Duration};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_TOKEN_EXPIRATION_DAYS: u64 = 10;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("environment variable is not set: {name}")]
    MissingEnvironmentVariable { name: &'static str },

    #[error("environment variable {name} has invalid value: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Process settings, read once at startup and passed into constructors.
#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub secret_key: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
    pub token_expiration: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::MissingEnvironmentVariable { name })
        };

        let bind_addr = parse_or(&lookup, "CONDUIT_BIND_ADDR", DEFAULT_BIND_ADDR)?;
        let max_connections = parse_or(
            &lookup,
            "CONDUIT_MAX_CONNECTIONS",
            &DEFAULT_MAX_CONNECTIONS.to_string(),
        )?;
        let expiration_days: u64 = parse_or(
            &lookup,
            "CONDUIT_TOKEN_EXPIRATION_DAYS",
            &DEFAULT_TOKEN_EXPIRATION_DAYS.to_string(),
        )?;

        // token expiry is an i64 unix timestamp
        let expiration_secs = expiration_days
            .checked_mul(SECONDS_PER_DAY)
            .filter(|secs| i64::try_from(*secs).is_ok())
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "CONDUIT_TOKEN_EXPIRATION_DAYS",
                reason: format!("{expiration_days} days is out of range"),
            })?;

        Ok(Self {
            database_url: required("CONDUIT_DATABASE_URL")?,
            secret_key: required("CONDUIT_SECRET_KEY")?,
            bind_addr,
            max_connections,
            token_expiration: Duration::from_secs(expiration_secs),
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(name).unwrap_or_else(|| default.to_string());
    raw.parse().map_err(|err: T::Err| ConfigError::InvalidValue {
        name,
        reason: err.to_string(),
    })
}
