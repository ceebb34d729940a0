//! Shared utilities and common types for the MtaaSuite OTP server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded once at startup
//! - Error codes and the error response structure
//! - Utility functions (phone masking and normalisation)

pub mod config;
pub mod errors;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment, LoggingConfig, OtpConfig, ServerConfig, SmsProvidersConfig,
    StoreBackend, StoreConfig,
};
pub use errors::{ErrorCode, ErrorResponse};
pub use utils::phone;
