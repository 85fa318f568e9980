use crate::core::{Result, RosterError};
use std::env;

/// Connection settings resolved from the standard PG environment variables.
///
/// Every key is optional and falls back to a documented default:
///
/// | Variable     | Default     |
/// |--------------|-------------|
/// | `PGHOST`     | `localhost` |
/// | `PGPORT`     | `5432`      |
/// | `PGUSER`     | `postgres`  |
/// | `PGPASSWORD` | (empty)     |
/// | `PGDATABASE` | `school`    |
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionSettings {
    /// Resolves settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolves settings from an arbitrary key lookup.
    ///
    /// `PGPORT` must parse as a positive integer; anything else is a
    /// configuration error, reported before any connection is attempted.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port_raw = lookup("PGPORT").unwrap_or_else(|| "5432".to_string());
        let port = port_raw.parse::<u16>().map_err(|_| {
            RosterError::Config(format!(
                "PGPORT must be a positive integer, got {port_raw:?}"
            ))
        })?;
        if port == 0 {
            return Err(RosterError::Config(
                "PGPORT must be a positive integer, got 0".to_string(),
            ));
        }

        Ok(ConnectionSettings {
            host: lookup("PGHOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            user: lookup("PGUSER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("PGPASSWORD").unwrap_or_default(),
            database: lookup("PGDATABASE").unwrap_or_else(|| "school".to_string()),
        })
    }
}
