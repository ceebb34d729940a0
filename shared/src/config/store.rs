//! OTP record storage configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_or};

/// Storage backend for OTP records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Embedded store, single process only
    #[default]
    Memory,
    /// Shared Redis store
    Redis,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "in-memory" => Ok(StoreBackend::Memory),
            "redis" => Ok(StoreBackend::Redis),
            _ => Err(format!("Invalid OTP store backend: {}", s)),
        }
    }
}

/// OTP storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Which backend holds OTP records
    pub backend: StoreBackend,

    /// Redis connection URL
    pub redis_url: String,

    /// Prefix for every Redis key written by the store
    pub key_prefix: String,

    /// Seconds a record is retained past its expiry before Redis evicts it
    pub retention_secs: u64,

    /// Maximum optimistic transaction retries on contention
    pub max_transaction_retries: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            redis_url: String::from("redis://localhost:6379"),
            key_prefix: String::from("otp"),
            retention_secs: 3600,
            max_transaction_retries: 5,
        }
    }
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend: env_or("OTP_STORE", defaults.backend),
            redis_url: env_opt("REDIS_URL").unwrap_or(defaults.redis_url),
            key_prefix: env_opt("REDIS_KEY_PREFIX").unwrap_or(defaults.key_prefix),
            retention_secs: env_or("OTP_RETENTION_SECS", defaults.retention_secs),
            max_transaction_retries: env_or(
                "OTP_STORE_MAX_RETRIES",
                defaults.max_transaction_retries,
            ),
        }
    }

    /// Redis key holding the record for `phone`
    pub fn record_key(&self, phone: &str) -> String {
        format!("{}:record:{}", self.key_prefix, phone)
    }
}
