//! Domain-specific error types and error handling.

mod types;

pub use types::{DeliveryError, OtpError};

use mt_shared::ErrorCode;
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl DomainError {
    /// Shorthand for a validation failure with a caller-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for an internal failure
    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal {
            message: message.into(),
        }
    }

    /// Stable error code reported to callers
    pub fn code(&self) -> ErrorCode {
        match self {
            DomainError::Validation { .. } => ErrorCode::InvalidArgument,
            DomainError::Internal { .. } => ErrorCode::Internal,
            DomainError::Otp(err) => err.code(),
            DomainError::Delivery(_) => ErrorCode::Internal,
        }
    }

    /// Message safe to return to the caller.
    ///
    /// Internal details (store errors, provider responses) stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation { message } => message.clone(),
            DomainError::Internal { .. } => {
                "Internal server error. Please try again later.".to_string()
            }
            DomainError::Otp(err) => err.to_string(),
            DomainError::Delivery(err) => err.user_message().to_string(),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            DomainError::validation("Phone number is required").code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(DomainError::from(OtpError::NotFound).code(), ErrorCode::NotFound);
        assert_eq!(DomainError::from(OtpError::Expired).code(), ErrorCode::DeadlineExceeded);
        assert_eq!(
            DomainError::from(OtpError::AlreadyVerified).code(),
            ErrorCode::AlreadyExists
        );
        assert_eq!(
            DomainError::from(OtpError::AttemptsExhausted).code(),
            ErrorCode::ResourceExhausted
        );
        assert_eq!(
            DomainError::from(OtpError::Mismatch { attempts: 1 }).code(),
            ErrorCode::InvalidArgument
        );
        assert_eq!(
            DomainError::from(DeliveryError::DeadlineExceeded { elapsed_ms: 35_000 }).code(),
            ErrorCode::Internal
        );
        assert_eq!(DomainError::internal("boom").code(), ErrorCode::Internal);
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            DomainError::from(OtpError::NotFound).user_message(),
            "OTP not found. Please request a new one."
        );
        assert_eq!(
            DomainError::from(OtpError::Mismatch { attempts: 2 }).user_message(),
            "Invalid OTP. Please check and try again."
        );
        assert_eq!(
            DomainError::from(DeliveryError::AllProvidersFailed { attempts: Vec::new() })
                .user_message(),
            "Failed to send SMS via all providers. Please try again later."
        );

        let internal = DomainError::internal("redis connection refused");
        assert!(!internal.user_message().contains("redis"));
    }
}
