//! Centralized configuration (environment variables + defaults).

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::query::sanitizer::DEFAULT_MAX_PAGE_SIZE;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub backend: StoreBackend,
    /// Required when `backend` is `Postgres`.
    pub database_url: Option<String>,
    pub max_connections: u32,
    /// Budget for a single store call made by the service.
    pub query_timeout: Duration,
    pub max_page_size: i64,
    pub bind_addr: String,
}

/// Defaults describe an in-process catalog; `from_env` defaults to Postgres instead.
impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 5,
            query_timeout: Duration::from_millis(5_000),
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            bind_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = parse_or("CATALOG_STORE", &lookup, StoreBackend::Postgres)?;
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        if backend == StoreBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let max_connections: u32 =
            parse_or("DB_MAX_CONNECTIONS", &lookup, defaults.max_connections)?;
        let timeout_ms: u64 = parse_or("QUERY_TIMEOUT_MS", &lookup, 5_000)?;
        let max_page_size: i64 = parse_or("MAX_PAGE_SIZE", &lookup, defaults.max_page_size)?;
        if max_page_size < 1 {
            return Err(ConfigError::Invalid {
                name: "MAX_PAGE_SIZE",
                value: max_page_size.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(Self {
            backend,
            database_url,
            max_connections: max_connections.max(1),
            query_timeout: Duration::from_millis(timeout_ms.max(1)),
            max_page_size,
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
        })
    }
}

fn parse_or<T, F>(name: &'static str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CatalogConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn postgres_requires_database_url() {
        let err = config_from(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("DATABASE_URL")));
    }

    #[test]
    fn memory_backend_needs_nothing_else() {
        let cfg = config_from(&[("CATALOG_STORE", "memory")]).unwrap();
        assert_eq!(cfg.backend, StoreBackend::Memory);
        assert_eq!(cfg.max_page_size, DEFAULT_MAX_PAGE_SIZE);
        assert_eq!(cfg.query_timeout, Duration::from_secs(5));
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config_from(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("DB_MAX_CONNECTIONS", "12"),
            ("QUERY_TIMEOUT_MS", "250"),
            ("MAX_PAGE_SIZE", "200"),
            ("BIND_ADDR", "127.0.0.1:8080"),
        ])
        .unwrap();
        assert_eq!(cfg.backend, StoreBackend::Postgres);
        assert_eq!(cfg.max_connections, 12);
        assert_eq!(cfg.query_timeout, Duration::from_millis(250));
        assert_eq!(cfg.max_page_size, 200);
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn bad_numbers_are_reported_not_panicked() {
        let err = config_from(&[("CATALOG_STORE", "memory"), ("QUERY_TIMEOUT_MS", "soon")])
            .unwrap_err();
        assert!(err.to_string().contains("QUERY_TIMEOUT_MS"));

        let err = config_from(&[("CATALOG_STORE", "memory"), ("MAX_PAGE_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MAX_PAGE_SIZE", .. }));

        assert!(config_from(&[("CATALOG_STORE", "sqlite")]).is_err());
    }
}
