//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MEDUSA_BACKEND_URL` - Base URL of the Medusa backend (e.g., <https://api.example.com>)
//! - `MEDUSA_PUBLISHABLE_KEY` - Publishable API key scoping store requests to a sales channel
//!
//! ## Optional
//! - `MEDUSA_REGION_ID` - Region used when creating carts and pricing products
//! - `MEDUSA_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `MEDUSA_CACHE_TTL_SECS` - Product/collection cache lifetime (default: 300)
//! - `STOREFRONT_LOCALE` - Display locale, `en-US` or `id-ID` (default: en-US)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use medusa_storefront_core::RegionId;

use crate::i18n::Locale;

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "fixme",
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

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Medusa Store API configuration
    pub medusa: MedusaConfig,
    /// Locale used for customer-facing messages
    pub locale: Locale,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Medusa Store API configuration.
///
/// Implements `Debug` manually to redact the publishable key.
#[derive(Clone)]
pub struct MedusaConfig {
    /// Backend base URL
    pub backend_url: Url,
    /// Publishable API key sent with every store request
    pub publishable_key: SecretString,
    /// Region for new carts and product pricing
    pub region_id: Option<RegionId>,
    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,
    /// How long products and collections stay cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for MedusaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MedusaConfig")
            .field("backend_url", &self.backend_url.as_str())
            .field("publishable_key", &"[REDACTED]")
            .field("region_id", &self.region_id)
            .field("request_timeout", &self.request_timeout)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

impl MedusaConfig {
    /// Configuration for a backend at `backend_url` with default timeouts.
    #[must_use]
    pub fn new(backend_url: Url, publishable_key: SecretString) -> Self {
        Self {
            backend_url,
            publishable_key,
            region_id: None,
            request_timeout: Duration::from_secs(30),
            cache_ttl: Duration::from_secs(300),
        }
    }

    fn from_source(env: &EnvSource<'_>) -> Result<Self, ConfigError> {
        let backend_url = env.required("MEDUSA_BACKEND_URL")?;
        let backend_url = Url::parse(&backend_url).map_err(|e| {
            ConfigError::InvalidEnvVar("MEDUSA_BACKEND_URL".to_string(), e.to_string())
        })?;

        let publishable_key = env.required("MEDUSA_PUBLISHABLE_KEY")?;
        validate_secret_strength(&publishable_key, "MEDUSA_PUBLISHABLE_KEY")?;

        Ok(Self {
            backend_url,
            publishable_key: SecretString::from(publishable_key),
            region_id: env.optional("MEDUSA_REGION_ID").map(RegionId::new),
            request_timeout: Duration::from_secs(env.parsed_or("MEDUSA_REQUEST_TIMEOUT_SECS", 30)?),
            cache_ttl: Duration::from_secs(env.parsed_or("MEDUSA_CACHE_TTL_SECS", 300)?),
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the publishable key looks like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(&|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: &dyn Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = EnvSource { lookup };

        let medusa = MedusaConfig::from_source(&env)?;
        let locale = env
            .optional("STOREFRONT_LOCALE")
            .map_or(Ok(Locale::default()), |tag| {
                tag.parse::<Locale>().map_err(|e| {
                    ConfigError::InvalidEnvVar("STOREFRONT_LOCALE".to_string(), e.to_string())
                })
            })?;

        Ok(Self {
            medusa,
            locale,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: env.parsed_or("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: env.parsed_or("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Variable lookup shared by the loaders.
struct EnvSource<'a> {
    lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl EnvSource<'_> {
    /// Get a required variable; blank counts as missing.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; blank counts as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |value| {
            value
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a key is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    if let Some(pattern) = PLACEHOLDER_PATTERNS
        .iter()
        .find(|pattern| lower.contains(*pattern))
    {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the key from the Medusa admin."
            ),
        ));
    }

    Ok(())
}
