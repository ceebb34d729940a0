//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `environment` - Environment detection and logging configuration
//! - `otp` - Passcode lifetime, attempt cap and numbering plan
//! - `server` - HTTP server binding
//! - `sms` - SMS gateway credentials and endpoints
//! - `store` - OTP record storage backend
//!
//! Everything is read once at startup and treated as immutable afterwards.

pub mod environment;
pub mod otp;
pub mod server;
pub mod sms;
pub mod store;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::{NumberingPlanConfig, OtpConfig};
pub use server::ServerConfig;
pub use sms::{BeemConfig, SmsProvidersConfig, TigoConfig, TwilioConfig};
pub use store::{StoreBackend, StoreConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// OTP lifecycle configuration
    pub otp: OtpConfig,

    /// SMS gateway configuration
    pub providers: SmsProvidersConfig,

    /// Record storage configuration
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            logging: LoggingConfig::for_environment(env),
            otp: OtpConfig::default(),
            providers: SmsProvidersConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Some(level) = env_opt("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            logging,
            otp: OtpConfig::from_env(),
            providers: SmsProvidersConfig::from_env(),
            store: StoreConfig::from_env(),
        }
    }
}

/// Read a non-empty environment variable.
pub(crate) fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse an environment variable, falling back to `default` when
/// it is unset or unparsable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env_opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Like [`env_or`], but zero and negative values also fall back to `default`.
pub(crate) fn env_positive<T: FromStr + PartialOrd + Default>(key: &str, default: T) -> T {
    env_opt(key)
        .and_then(|v| v.parse().ok())
        .filter(|v| *v > T::default())
        .unwrap_or(default)
}
