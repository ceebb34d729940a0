//! # Infrastructure Layer
//!
//! Concrete implementations of the outbound ports defined in `mt_core`:
//!
//! - **SMS**: Beem, Tigo and Twilio gateway adapters and the
//!   `CascadeSmsService` that tries them in priority order
//! - **Cache**: Redis client and the Redis-backed `OtpStore`
//!
//! ## Features
//!
//! - `redis-cache`: Enable the Redis OTP store (default)

use mt_core::errors::DomainError;

/// SMS service module - external SMS gateways
pub mod sms;

/// Cache module - Redis client and OTP record storage
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[cfg(feature = "redis-cache")]
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Stored data could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        DomainError::Internal {
            message: err.to_string(),
        }
    }
}
