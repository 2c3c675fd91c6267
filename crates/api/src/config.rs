//! Orders API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TOGETHER_API_KEY` - API key for the Together inference endpoint
//!
//! ## Optional
//! - `API_HOST` - Bind address (default: 0.0.0.0)
//! - `API_PORT` - Listen port (default: 8000)
//! - `API_ALLOWED_ORIGINS` - Comma-separated CORS origins (default: http://localhost:5173)
//! - `DATABASE_URL` - `PostgreSQL` connection string; orders are kept in memory when unset
//! - `TOGETHER_MODEL` - Model name (default: mistralai/Mixtral-8x7B-Instruct-v0.1)
//! - `TOGETHER_ENDPOINT` - Inference endpoint (default: https://api.together.xyz/inference)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

/// Default inference endpoint.
pub const DEFAULT_TOGETHER_ENDPOINT: &str = "https://api.together.xyz/inference";

/// Default model used to interpret customer requests.
pub const DEFAULT_TOGETHER_MODEL: &str = "mistralai/Mixtral-8x7B-Instruct-v0.1";

/// Inference calls give up after this long.
const TOGETHER_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Orders API configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Browser origins allowed to call the API with credentials
    pub allowed_origins: Vec<HeaderValue>,
    /// `PostgreSQL` connection URL; `None` selects the in-memory store
    pub database_url: Option<SecretString>,
    /// Order interpreter configuration
    pub together: TogetherConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Together inference configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct TogetherConfig {
    pub api_key: SecretString,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for TogetherConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TogetherConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the API key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("API_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("API_PORT", "8000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("API_PORT".to_string(), e.to_string()))?;
        let allowed_origins = parse_origins(&get_env_or_default(
            "API_ALLOWED_ORIGINS",
            "http://localhost:5173",
        ))?;

        Ok(Self {
            host,
            port,
            allowed_origins,
            database_url: get_optional_env("DATABASE_URL").map(SecretString::from),
            together: TogetherConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl TogetherConfig {
    /// Configuration for the public endpoint and default model.
    #[must_use]
    pub fn new(api_key: SecretString) -> Self {
        Self {
            api_key,
            model: DEFAULT_TOGETHER_MODEL.to_string(),
            endpoint: DEFAULT_TOGETHER_ENDPOINT.to_string(),
            timeout: TOGETHER_TIMEOUT,
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let api_key = get_required_env("TOGETHER_API_KEY")?;
        validate_not_placeholder(&api_key, "TOGETHER_API_KEY")?;

        Ok(Self {
            model: get_env_or_default("TOGETHER_MODEL", DEFAULT_TOGETHER_MODEL),
            endpoint: get_env_or_default("TOGETHER_ENDPOINT", DEFAULT_TOGETHER_ENDPOINT),
            ..Self::new(SecretString::from(api_key))
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    get_optional_env(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a sample rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Parse a comma-separated origin list into header values.
fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            let origin = origin.trim_end_matches('/');
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::InvalidEnvVar(
                    "API_ALLOWED_ORIGINS".to_string(),
                    format!("origin must start with http:// or https:// (got '{origin}')"),
                ));
            }
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("API_ALLOWED_ORIGINS".to_string(), e.to_string())
            })
        })
        .collect()
}

/// Reject values that are obviously copied from an example file.
fn validate_not_placeholder(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}
