/**
 * Server Configuration
 *
 * All settings are read once, in `main`, and passed down as a
 * `ServerConfig` value. Nothing below `main` reads the process environment.
 *
 * # Configuration Sources
 *
 * | Variable | Default |
 * |---|---|
 * | `PORT` | `5000` |
 * | `DATABASE_URL` | unset: database endpoints answer 503 |
 * | `JWT_SECRET`, `JWT_REFRESH_SECRET` | required in production |
 * | `JWT_ACCESS_EXPIRY` | `15m` |
 * | `JWT_REFRESH_EXPIRY` | `7d` |
 * | `GEMINI_API_KEY` | unset: AI calls fail with `AI_ERROR` |
 * | `GEMINI_MODEL` | `gemini-1.5-flash` |
 * | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` |
 * | `AI_TIMEOUT_SECS` | no timeout |
 * | `FRONTEND_URL` | `http://localhost:5173` |
 * | `APP_ENV` or `NODE_ENV` | `development` |
 *
 * # Error Handling
 *
 * Malformed values are a `ConfigError`. A missing database is not: the
 * server starts without it and the affected handlers report 503.
 */

use std::time::Duration;

use sqlx::PgPool;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_ACCESS_EXPIRY: &str = "15m";
pub const DEFAULT_REFRESH_EXPIRY: &str = "7d";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:5173";

const DEV_ACCESS_SECRET: &str = "dev-access-secret-change-me";
const DEV_REFRESH_SECRET: &str = "dev-refresh-secret-change-me";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// JWT signing settings
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

/// Language model settings
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: Option<String>,
    pub environment: Environment,
    pub frontend_url: String,
    pub auth: AuthConfig,
    pub ai: AiConfig,
}

/// Parse a token lifetime such as `30s`, `15m`, `12h` or `7d`
///
/// A bare number is taken as seconds.
pub fn parse_expiry(key: &'static str, value: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    };
    let value = value.trim();
    let (digits, unit) = match value.char_indices().last() {
        Some((i, c)) if c.is_ascii_alphabetic() => (&value[..i], Some(c)),
        Some(_) => (value, None),
        None => return Err(invalid()),
    };
    let amount: u64 = digits.parse().map_err(|_| invalid())?;
    let unit_secs: u64 = match unit {
        None | Some('s') => 1,
        Some('m') => 60,
        Some('h') => 60 * 60,
        Some('d') => 24 * 60 * 60,
        Some(_) => return Err(invalid()),
    };
    let seconds = amount.checked_mul(unit_secs).ok_or_else(invalid)?;
    Ok(Duration::from_secs(seconds))
}

impl ServerConfig {
    /// Create a new ServerConfigBuilder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();

        let port = match get("PORT") {
            Some(v) => v.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT",
                value: v,
            })?,
            None => DEFAULT_PORT,
        };

        let secret = |key: &'static str, fallback: &str| -> Result<String, ConfigError> {
            match get(key) {
                Some(v) => Ok(v),
                None if environment == Environment::Production => Err(ConfigError::MissingValue(key)),
                None => {
                    tracing::warn!("{} not set, using an insecure development secret", key);
                    Ok(fallback.to_string())
                }
            }
        };

        let auth = AuthConfig {
            access_secret: secret("JWT_SECRET", DEV_ACCESS_SECRET)?,
            refresh_secret: secret("JWT_REFRESH_SECRET", DEV_REFRESH_SECRET)?,
            access_ttl: parse_expiry(
                "JWT_ACCESS_EXPIRY",
                &get("JWT_ACCESS_EXPIRY").unwrap_or_else(|| DEFAULT_ACCESS_EXPIRY.to_string()),
            )?,
            refresh_ttl: parse_expiry(
                "JWT_REFRESH_EXPIRY",
                &get("JWT_REFRESH_EXPIRY").unwrap_or_else(|| DEFAULT_REFRESH_EXPIRY.to_string()),
            )?,
        };

        let api_key = get("GEMINI_API_KEY");
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set. AI parsing requests will fail.");
        }

        let timeout = match get("AI_TIMEOUT_SECS") {
            Some(v) => Some(Duration::from_secs(v.parse().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "AI_TIMEOUT_SECS",
                    value: v.clone(),
                }
            })?)),
            None => None,
        };

        let ai = AiConfig {
            api_key,
            model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
            timeout,
        };

        Ok(Self {
            port,
            database_url: get("DATABASE_URL"),
            environment,
            frontend_url: get("FRONTEND_URL").unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            auth,
            ai,
        })
    }
}

/// Builder for ServerConfig
///
/// Starts from development defaults; mostly used by tests.
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    environment: Environment,
    frontend_url: Option<String>,
    access_secret: Option<String>,
    refresh_secret: Option<String>,
    access_ttl: Option<Duration>,
    refresh_ttl: Option<Duration>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    gemini_base_url: Option<String>,
    ai_timeout: Option<Duration>,
}

impl ServerConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn frontend_url(mut self, url: impl Into<String>) -> Self {
        self.frontend_url = Some(url.into());
        self
    }

    /// Set the access and refresh token secrets
    pub fn jwt_secrets(mut self, access: impl Into<String>, refresh: impl Into<String>) -> Self {
        self.access_secret = Some(access.into());
        self.refresh_secret = Some(refresh.into());
        self
    }

    pub fn access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = Some(ttl);
        self
    }

    pub fn refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = Some(ttl);
        self
    }

    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(key.into());
        self
    }

    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    pub fn gemini_base_url(mut self, url: impl Into<String>) -> Self {
        self.gemini_base_url = Some(url.into());
        self
    }

    pub fn ai_timeout(mut self, timeout: Duration) -> Self {
        self.ai_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let production = self.environment == Environment::Production;
        let access_secret = match self.access_secret {
            Some(s) => s,
            None if production => return Err(ConfigError::MissingValue("JWT_SECRET")),
            None => DEV_ACCESS_SECRET.to_string(),
        };
        let refresh_secret = match self.refresh_secret {
            Some(s) => s,
            None if production => return Err(ConfigError::MissingValue("JWT_REFRESH_SECRET")),
            None => DEV_REFRESH_SECRET.to_string(),
        };

        Ok(ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self.database_url,
            environment: self.environment,
            frontend_url: self.frontend_url.unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            auth: AuthConfig {
                access_secret,
                refresh_secret,
                access_ttl: self.access_ttl.unwrap_or(Duration::from_secs(15 * 60)),
                refresh_ttl: self.refresh_ttl.unwrap_or(Duration::from_secs(7 * 24 * 60 * 60)),
            },
            ai: AiConfig {
                api_key: self.gemini_api_key,
                model: self.gemini_model.unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                base_url: self
                    .gemini_base_url
                    .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string()),
                timeout: self.ai_timeout,
            },
        })
    }
}

/// Connect to PostgreSQL and apply pending migrations
///
/// # Returns
///
/// - `Some(PgPool)` if the database is reachable
/// - `None` if `database_url` is unset or the connection fails
///
/// # Errors
///
/// Failures are logged and leave the server running without database
/// features. A failed migration is logged and the pool is still returned.
pub async fn load_database(database_url: Option<&str>) -> Option<PgPool> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
