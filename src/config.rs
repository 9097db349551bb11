//! Startup configuration from environment variables (after `.env` is loaded by the binary).

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::net::SocketAddr;
use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8010";

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseSource {
    /// `DATABASE_URL`, used verbatim.
    Url(String),
    /// Assembled from the `APP_DB_*` variables.
    Parts {
        host: String,
        port: u16,
        username: String,
        password: String,
        database: String,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub database: DatabaseSource,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database = match lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()) {
            Some(url) => DatabaseSource::Url(url),
            None => DatabaseSource::Parts {
                host: get("APP_DB_HOST", "localhost"),
                port: parse("APP_DB_PORT", &get("APP_DB_PORT", "5432"))?,
                username: get("APP_DB_USERNAME", "postgres"),
                password: get("APP_DB_PASSWORD", ""),
                database: get("APP_DB_NAME", "postgres"),
            },
        };
        let max_connections: u32 = parse("APP_DB_MAX_CONNECTIONS", &get("APP_DB_MAX_CONNECTIONS", "5"))?;
        if max_connections == 0 {
            return Err(ConfigError::Invalid {
                var: "APP_DB_MAX_CONNECTIONS",
                reason: "must be at least 1".into(),
            });
        }
        let bind_addr = parse("APP_BIND_ADDR", &get("APP_BIND_ADDR", DEFAULT_BIND_ADDR))?;

        Ok(Config {
            database,
            max_connections,
            bind_addr,
        })
    }

    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.database {
            DatabaseSource::Url(url) => PgConnectOptions::from_str(url).map_err(|e| ConfigError::Invalid {
                var: "DATABASE_URL",
                reason: e.to_string(),
            }),
            DatabaseSource::Parts {
                host,
                port,
                username,
                password,
                database,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(username)
                .password(password)
                .database(database)),
        }
    }
}

fn parse<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: format!("'{}': {}", raw, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let c = config(&[]).unwrap();
        assert_eq!(c.max_connections, 5);
        assert_eq!(c.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(
            c.database,
            DatabaseSource::Parts {
                host: "localhost".into(),
                port: 5432,
                username: "postgres".into(),
                password: String::new(),
                database: "postgres".into(),
            }
        );
    }

    #[test]
    fn app_db_parts_are_read() {
        let c = config(&[
            ("APP_DB_USERNAME", "shop"),
            ("APP_DB_PASSWORD", "s3cret"),
            ("APP_DB_NAME", "catalog"),
            ("APP_DB_PORT", "6543"),
        ])
        .unwrap();
        match c.database {
            DatabaseSource::Parts { username, password, database, port, .. } => {
                assert_eq!((username.as_str(), password.as_str(), database.as_str(), port), ("shop", "s3cret", "catalog", 6543));
            }
            other => panic!("expected parts, got {:?}", other),
        }
    }

    #[test]
    fn database_url_wins() {
        let c = config(&[("DATABASE_URL", "postgres://u:p@db/x"), ("APP_DB_NAME", "ignored")]).unwrap();
        assert_eq!(c.database, DatabaseSource::Url("postgres://u:p@db/x".into()));
        assert!(c.connect_options().is_ok());
    }

    #[test]
    fn invalid_values_are_reported() {
        let err = config(&[("APP_DB_PORT", "port")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APP_DB_PORT", .. }));
        let err = config(&[("APP_BIND_ADDR", "nowhere")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APP_BIND_ADDR", .. }));
        let err = config(&[("APP_DB_MAX_CONNECTIONS", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APP_DB_MAX_CONNECTIONS", .. }));
    }
}
