//! OTP service module for SMS-based phone verification
//!
//! This module provides the complete passcode workflow:
//! - Recipient validation against the regional numbering plan
//! - Cryptographically secure code generation
//! - Delivery through the SMS provider cascade under an overall deadline
//! - Attempt-limited, single-use verification on top of the OTP store
//! - Read-only health and provider status reporting

mod code_generator;
mod config;
mod phone_validator;
mod service;
mod status;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code_generator::CodeGenerator;
pub use config::OtpServiceConfig;
pub use phone_validator::PhoneValidator;
pub use service::OtpService;
pub use status::StatusReporter;
pub use traits::SmsDispatcher;
pub use types::{IssueResult, VerifyResult};
