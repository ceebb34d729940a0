pub mod otp;

pub use mt_shared::errors::{ErrorBody, ErrorResponse};
pub use otp::{
    ProviderState, ProviderStatusResponse, SendOtpRequest, SendOtpResponse, VerifyOtpRequest,
    VerifyOtpResponse,
};
