//! Domain entities representing core business objects.

pub mod otp_record;

// Re-export commonly used types
pub use otp_record::{
    OtpRecord, VerifyVerdict, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, DEFAULT_MAX_ATTEMPTS,
};
