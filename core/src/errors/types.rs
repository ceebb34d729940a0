//! OTP lifecycle and SMS delivery error types

use mt_shared::ErrorCode;
use thiserror::Error;

use crate::domain::value_objects::DeliveryAttempt;

/// Rejections produced by the verification state machine.
///
/// Display strings are the caller-facing messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("OTP not found. Please request a new one.")]
    NotFound,

    #[error("OTP has expired. Please request a new one.")]
    Expired,

    #[error("OTP has already been used.")]
    AlreadyVerified,

    #[error("Too many failed attempts. Please request a new OTP.")]
    AttemptsExhausted,

    /// Supplied code did not match; `attempts` is the failed count after this call
    #[error("Invalid OTP. Please check and try again.")]
    Mismatch { attempts: u32 },
}

impl OtpError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OtpError::NotFound => ErrorCode::NotFound,
            OtpError::Expired => ErrorCode::DeadlineExceeded,
            OtpError::AlreadyVerified => ErrorCode::AlreadyExists,
            OtpError::AttemptsExhausted => ErrorCode::ResourceExhausted,
            OtpError::Mismatch { .. } => ErrorCode::InvalidArgument,
        }
    }
}

/// SMS delivery failures surfaced by Issue
#[derive(Error, Debug, Clone)]
pub enum DeliveryError {
    #[error("All {} SMS providers failed", attempts.len())]
    AllProvidersFailed { attempts: Vec<DeliveryAttempt> },

    #[error("SMS delivery did not complete within {elapsed_ms}ms")]
    DeadlineExceeded { elapsed_ms: u64 },

    #[error("No SMS providers configured")]
    NoProvidersConfigured,
}

impl DeliveryError {
    pub fn user_message(&self) -> &'static str {
        "Failed to send SMS via all providers. Please try again later."
    }
}
