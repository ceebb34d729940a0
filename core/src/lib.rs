//! # MtaaSuite Core
//!
//! Core domain layer for the MtaaSuite OTP service.
//! This crate contains the OTP record entity, delivery value objects, the
//! `OtpStore` repository interface with its embedded implementation, the OTP
//! services, and the error types the outer layers map to responses.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
