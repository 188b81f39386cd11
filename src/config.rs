use std::str::FromStr;

use sqlx::postgres::PgSslMode;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    /// SSL mode forced onto the connection. `None` leaves the `sslmode` of
    /// the connection string in charge.
    pub database_ssl_mode: Option<PgSslMode>,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let database_ssl_mode = match lookup("DATABASE_SSLMODE") {
            Some(v) => Some(parse_var::<PgSslMode>("DATABASE_SSLMODE", v)?),
            None if url_sets_sslmode(&database_url) => None,
            None => Some(PgSslMode::Require),
        };
        let db_max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(v) => parse_var("DB_MAX_CONNECTIONS", v)?,
            None => 10,
        };
        let port = match lookup("APP_PORT") {
            Some(v) => parse_var("APP_PORT", v)?,
            None => 10000,
        };

        Ok(Self {
            database_url,
            database_ssl_mode,
            db_max_connections,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn url_sets_sslmode(url: &str) -> bool {
    url.split_once('?')
        .map(|(_, query)| query.split('&').any(|param| param.starts_with("sslmode=")))
        .unwrap_or(false)
}

fn parse_var<T: FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid { var, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let err = AppConfig::from_lookup(lookup_from(&[("APP_PORT", "8080")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
        assert_eq!(err.to_string(), "DATABASE_URL environment variable not set");
    }

    #[test]
    fn blank_database_url_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "  ")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn defaults_apply() {
        let cfg =
            AppConfig::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/db")]))
                .expect("config");
        assert_eq!(cfg.database_url, "postgres://localhost/db");
        assert!(matches!(cfg.database_ssl_mode, Some(PgSslMode::Require)));
        assert_eq!(cfg.db_max_connections, 10);
        assert_eq!(cfg.bind_addr(), "0.0.0.0:10000");
    }

    #[test]
    fn overrides_are_read() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_SSLMODE", "require"),
            ("DB_MAX_CONNECTIONS", "4"),
            ("APP_HOST", "127.0.0.1"),
            ("APP_PORT", "8080"),
        ]))
        .expect("config");
        assert!(matches!(cfg.database_ssl_mode, Some(PgSslMode::Require)));
        assert_eq!(cfg.db_max_connections, 4);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn sslmode_in_url_wins_over_default() {
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "DATABASE_URL",
            "postgres://u:p@localhost/db?application_name=x&sslmode=disable",
        )]))
        .expect("config");
        assert!(cfg.database_ssl_mode.is_none());
    }

    #[test]
    fn env_sslmode_wins_over_url() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://u:p@localhost/db?sslmode=require"),
            ("DATABASE_SSLMODE", "disable"),
        ]))
        .expect("config");
        assert!(matches!(cfg.database_ssl_mode, Some(PgSslMode::Disable)));
    }

    #[test]
    fn bad_port_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("APP_PORT", "http"),
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "APP_PORT",
                value: "http".into()
            }
        );
    }

    #[test]
    fn bad_ssl_mode_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/db"),
            ("DATABASE_SSLMODE", "sometimes"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DATABASE_SSLMODE", .. }));
    }
}
