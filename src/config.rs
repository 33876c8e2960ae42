use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use once_cell::sync::OnceCell;
use thiserror::Error;

/// Storage connection helpers
pub mod database;

/// Marker URL selecting the in-process booking store.
pub const MEMORY_DATABASE_URL: &str = "memory://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" | "test" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(ConfigError::Invalid {
                key: "APP_ENV",
                reason: format!("unknown environment `{other}`"),
            }),
        }
    }
}

static ENVIRONMENT: OnceCell<Environment> = OnceCell::new();

/// Record the environment for the lifetime of the process. Later calls are ignored.
pub fn init_environment(env: Environment) {
    let _ = ENVIRONMENT.set(env);
}

/// The process environment, `Development` until `init_environment` runs.
pub fn environment() -> Environment {
    ENVIRONMENT.get().copied().unwrap_or(Environment::Development)
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "DATABASE_URL is not set. Copy `.env.example` to `.env` and update credentials, \
         or set DATABASE_URL=memory:// to run without MySQL"
    )]
    MissingDatabaseUrl,

    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub connect_timeout: Duration,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.url.starts_with(MEMORY_DATABASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub cors_allowed_origins: Option<String>,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = var("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?;

        let environment = match var("APP_ENV").or_else(|| var("NODE_ENV")) {
            Some(raw) => raw.parse()?,
            None => Environment::Development,
        };

        Ok(Self {
            host: var("APP_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or("APP_PORT", 5000)?,
            environment,
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS").or_else(|| var("FRONTEND_URL")),
            database: DatabaseConfig {
                url,
                connect_timeout: Duration::from_secs(parse_or("DB_CONNECT_TIMEOUT_SECS", 5)?),
                max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            },
        })
    }

    /// Configuration for an in-process instance, used by tests and local tooling.
    pub fn in_memory() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: Environment::Development,
            cors_allowed_origins: None,
            database: DatabaseConfig {
                url: MEMORY_DATABASE_URL.to_string(),
                connect_timeout: Duration::from_secs(5),
                max_connections: 1,
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Empty values count as unset.
fn var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_or<T>(key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match var(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => {
            tracing::debug!("{key} not set, using default");
            Ok(default)
        }
    }
}
