use std::env;

use anyhow::{Context, Result, bail};
use deadpool_postgres::{Config, Pool, Runtime};
use tokio_postgres::NoTls;

use crate::services::pagination::DEFAULT_PER_PAGE;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub secret_key: String,
    pub session_ttl_secs: i64,
    pub posts_per_page: u32,
    pub allowed_origins: Vec<String>,
    pub store: StoreBackend,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .context("SECRET_KEY not set")?;

        let port = match lookup("PORT") {
            Some(p) => p.trim().parse().context("PORT is not a valid port")?,
            None => DEFAULT_PORT,
        };

        let session_ttl_secs = match lookup("SESSION_TTL_SECS") {
            Some(v) => v
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|t| *t > 0)
                .context("SESSION_TTL_SECS must be a positive number of seconds")?,
            None => DEFAULT_SESSION_TTL_SECS,
        };

        let posts_per_page = match lookup("POSTS_PER_PAGE") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .context("POSTS_PER_PAGE must be a positive integer")?,
            None => DEFAULT_PER_PAGE,
        };

        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGINS.to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let store = match lookup("STORE_BACKEND").as_deref().map(str::trim) {
            None | Some("") | Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("unknown STORE_BACKEND {:?} (expected postgres or memory)", other),
        };

        Ok(Self {
            port,
            secret_key,
            session_ttl_secs,
            posts_per_page,
            allowed_origins,
            store,
        })
    }
}

pub fn get_pg_pool() -> Result<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(env::var("PG_HOST").context("PG_HOST not set")?);
    cfg.port = match env::var("PG_PORT") {
        Ok(p) => Some(p.trim().parse().context("PG_PORT is not a valid port")?),
        Err(_) => None,
    };
    cfg.user = Some(env::var("PG_USER").context("PG_USER not set")?);
    cfg.password = env::var("PG_PASS").ok();
    cfg.dbname = Some(env::var("PG_DB").context("PG_DB not set")?);

    let mut pool_cfg = cfg.pool.unwrap_or_default();
    pool_cfg.max_size = 16;
    cfg.pool = Some(pool_cfg);

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .context("failed to create postgres pool")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[("SECRET_KEY", "s3cret")]).unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.posts_per_page, 5);
        assert_eq!(cfg.session_ttl_secs, 604_800);
        assert_eq!(cfg.store, StoreBackend::Postgres);
        assert_eq!(cfg.allowed_origins.len(), 2);
    }

    #[test]
    fn secret_is_required() {
        assert!(config(&[]).is_err());
        assert!(config(&[("SECRET_KEY", "  ")]).is_err());
    }

    #[test]
    fn overrides_are_parsed() {
        let cfg = config(&[
            ("SECRET_KEY", "s3cret"),
            ("PORT", "9000"),
            ("POSTS_PER_PAGE", "10"),
            ("STORE_BACKEND", "memory"),
            ("ALLOWED_ORIGINS", "https://blog.example, "),
        ])
        .unwrap();
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.posts_per_page, 10);
        assert_eq!(cfg.store, StoreBackend::Memory);
        assert_eq!(cfg.allowed_origins, vec!["https://blog.example".to_string()]);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(config(&[("SECRET_KEY", "s"), ("PORT", "http")]).is_err());
        assert!(config(&[("SECRET_KEY", "s"), ("POSTS_PER_PAGE", "0")]).is_err());
        assert!(config(&[("SECRET_KEY", "s"), ("STORE_BACKEND", "sqlite")]).is_err());
    }
}
