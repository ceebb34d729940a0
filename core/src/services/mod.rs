//! Business services containing domain logic and use cases.

pub mod otp;

// Re-export commonly used types
pub use otp::{
    CodeGenerator, IssueResult, OtpService, OtpServiceConfig, PhoneValidator, SmsDispatcher,
    StatusReporter, VerifyResult,
};
