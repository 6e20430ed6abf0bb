//! Server Configuration
//!
//! Read once at startup from the process environment.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};

const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_DB_MAX_OPEN: u32 = 10;
const DEFAULT_JWT_TTL: Duration = Duration::from_secs(15 * 60);
const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime configuration of the API server
#[derive(Clone)]
pub struct AppConfig {
    pub http_addr: SocketAddr,
    pub shutdown_timeout: Duration,
    pub request_timeout: Duration,
    /// Allowed CORS origins; empty allows none
    pub cors_origins: Vec<String>,
    pub db_dsn: String,
    pub db_max_open: u32,
    pub jwt_secret: Vec<u8>,
    pub jwt_ttl: Duration,
    pub log_level: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary variable source
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let http_addr = get("HTTP_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("HTTP_ADDR must be a socket address")?;

        let shutdown_timeout =
            duration_or(get("HTTP_SHUTDOWN_TIMEOUT"), DEFAULT_SHUTDOWN_TIMEOUT)
                .context("HTTP_SHUTDOWN_TIMEOUT must be a duration such as 5s")?;

        let request_timeout = duration_or(get("HTTP_REQUEST_TIMEOUT"), DEFAULT_REQUEST_TIMEOUT)
            .context("HTTP_REQUEST_TIMEOUT must be a duration such as 10s")?;

        let cors_origins = get("HTTP_CORS_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let db_dsn = get("DB_DSN").context("DB_DSN must be set")?;

        let db_max_open = match get("DB_MAX_OPEN") {
            Some(v) => v
                .parse::<u32>()
                .context("DB_MAX_OPEN must be a positive integer")?,
            None => DEFAULT_DB_MAX_OPEN,
        };
        if db_max_open == 0 {
            bail!("DB_MAX_OPEN must be a positive integer");
        }

        let jwt_secret = get("JWT_SECRET")
            .context("JWT_SECRET must be set")?
            .into_bytes();

        let jwt_ttl = duration_or(get("JWT_TTL"), DEFAULT_JWT_TTL)
            .context("JWT_TTL must be a duration such as 15m")?;
        if jwt_ttl.is_zero() {
            bail!("JWT_TTL must be greater than zero");
        }

        let log_level = get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self {
            http_addr,
            shutdown_timeout,
            request_timeout,
            cors_origins,
            db_dsn,
            db_max_open,
            jwt_secret,
            jwt_ttl,
            log_level,
        })
    }
}

fn duration_or(value: Option<String>, default: Duration) -> anyhow::Result<Duration> {
    match value {
        Some(v) => Ok(humantime::parse_duration(v.trim())?),
        None => Ok(default),
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("http_addr", &self.http_addr)
            .field("shutdown_timeout", &self.shutdown_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("cors_origins", &self.cors_origins)
            .field("db_dsn", &"[REDACTED]")
            .field("db_max_open", &self.db_max_open)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_ttl", &self.jwt_ttl)
            .field("log_level", &self.log_level)
            .finish()
    }
}
