//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults describe a local development setup.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 5173)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:5173)
//! - `VITE_API_URL` - Orders API base URL (default: http://localhost:8000)
//! - `ORDERS_API_TIMEOUT_SECS` - Timeout for orders API calls (default: transport default)
//! - `PUBLIC_CLERK_PUBLISHABLE_KEY` - Identity provider publishable key
//! - `AUTH_SIGN_IN_URL` - Sign-in page (default: /sign-in)
//! - `AUTH_SIGN_UP_URL` - Sign-up page (default: /sign-up)
//! - `AUTH_AFTER_SIGN_IN_URL` - Redirect after sign-in (default: /orders)
//! - `AUTH_AFTER_SIGN_UP_URL` - Redirect after sign-up (default: /orders)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Orders API base URL used when `VITE_API_URL` is not set.
pub const DEFAULT_ORDERS_API_URL: &str = "http://localhost:8000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Orders API client configuration
    pub orders_api: OrdersApiConfig,
    /// Identity provider client settings
    pub auth: AuthConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Where and how the page loader reaches the orders API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrdersApiConfig {
    base_url: String,
    /// Per-request timeout; `None` leaves it to the HTTP transport.
    pub timeout: Option<Duration>,
}

/// Identity provider settings handed to the browser at bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Publishable (browser-safe) key for the identity provider
    pub publishable_key: Option<String>,
    pub sign_in_url: String,
    pub sign_up_url: String,
    pub after_sign_in_url: String,
    pub after_sign_up_url: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "5173")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_string(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:5173");
        Url::parse(&base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), e.to_string())
        })?;

        let orders_api = OrdersApiConfig::from_env()?;
        let auth = AuthConfig::from_env();

        Ok(Self {
            host,
            port,
            base_url,
            orders_api,
            auth,
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

    /// Whether the storefront is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5173,
            base_url: "http://localhost:5173".to_string(),
            orders_api: OrdersApiConfig::default(),
            auth: AuthConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl OrdersApiConfig {
    /// Build a configuration for the orders API at `base_url`.
    ///
    /// Trailing slashes are dropped so that request paths can be appended
    /// directly.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute
    /// `http`/`https` URL, or if it carries a query string or fragment.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEnvVar("VITE_API_URL".to_string(), reason);

        let url = Url::parse(base_url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("must not contain a query or fragment".to_string()));
        }

        Ok(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            timeout: None,
        })
    }

    /// Resolve the base URL from an optional override, falling back to
    /// [`DEFAULT_ORDERS_API_URL`] when the override is absent or blank.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the override is present but invalid.
    pub fn resolve(override_url: Option<&str>) -> Result<Self, ConfigError> {
        match override_url.map(str::trim).filter(|url| !url.is_empty()) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    /// Set the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn from_env() -> Result<Self, ConfigError> {
        let config = Self::resolve(get_optional_env("VITE_API_URL").as_deref())?;

        match get_optional_env("ORDERS_API_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.parse::<u64>().map_err(|e| {
                    ConfigError::InvalidEnvVar("ORDERS_API_TIMEOUT_SECS".to_string(), e.to_string())
                })?;
                Ok(config.with_timeout(Duration::from_secs(secs)))
            }
            None => Ok(config),
        }
    }
}

impl Default for OrdersApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_ORDERS_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl AuthConfig {
    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            publishable_key: get_optional_env("PUBLIC_CLERK_PUBLISHABLE_KEY"),
            sign_in_url: get_optional_env("AUTH_SIGN_IN_URL").unwrap_or(defaults.sign_in_url),
            sign_up_url: get_optional_env("AUTH_SIGN_UP_URL").unwrap_or(defaults.sign_up_url),
            after_sign_in_url: get_optional_env("AUTH_AFTER_SIGN_IN_URL")
                .unwrap_or(defaults.after_sign_in_url),
            after_sign_up_url: get_optional_env("AUTH_AFTER_SIGN_UP_URL")
                .unwrap_or(defaults.after_sign_up_url),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            publishable_key: None,
            sign_in_url: "/sign-in".to_string(),
            sign_up_url: "/sign-up".to_string(),
            after_sign_in_url: "/orders".to_string(),
            after_sign_up_url: "/orders".to_string(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

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

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_orders_api_defaults_to_localhost() {
        let config = OrdersApiConfig::resolve(None).unwrap();
        assert_eq!(config.base_url(), "http://localhost:8000");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_orders_api_blank_override_falls_back() {
        let config = OrdersApiConfig::resolve(Some("")).unwrap();
        assert_eq!(config.base_url(), DEFAULT_ORDERS_API_URL);

        let config = OrdersApiConfig::resolve(Some("   ")).unwrap();
        assert_eq!(config.base_url(), DEFAULT_ORDERS_API_URL);
    }

    #[test]
    fn test_orders_api_override() {
        let config = OrdersApiConfig::resolve(Some("https://api.example.com")).unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_orders_api_trailing_slash_trimmed() {
        let config = OrdersApiConfig::new("https://api.example.com/").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");

        let config = OrdersApiConfig::new("https://example.com/backend/").unwrap();
        assert_eq!(config.base_url(), "https://example.com/backend");
    }

    #[test]
    fn test_orders_api_rejects_invalid_urls() {
        assert!(matches!(
            OrdersApiConfig::new("not a url"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(OrdersApiConfig::new("ftp://files.example.com").is_err());
        assert!(OrdersApiConfig::new("https://api.example.com/?debug=1").is_err());
        assert!(OrdersApiConfig::new("https://api.example.com/#frag").is_err());
    }

    #[test]
    fn test_orders_api_with_timeout() {
        let config = OrdersApiConfig::default().with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_auth_defaults() {
        let auth = AuthConfig::default();
        assert_eq!(auth.sign_in_url, "/sign-in");
        assert_eq!(auth.sign_up_url, "/sign-up");
        assert_eq!(auth.after_sign_in_url, "/orders");
        assert_eq!(auth.after_sign_up_url, "/orders");
        assert!(auth.publishable_key.is_none());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            port: 4000,
            ..StorefrontConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 4000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());

        config.base_url = "https://drive-thru.example.com".to_string();
        assert!(config.is_secure());
    }
}
