//! OTP route handlers
//!
//! - `POST /api/v1/otp/send` - issue a passcode over SMS
//! - `POST /api/v1/otp/verify` - check a passcode
//! - `GET /api/v1/otp/providers` - provider configuration status

pub mod providers;
pub mod send;
pub mod verify;

pub use providers::provider_status;
pub use send::send_otp;
pub use verify::verify_otp;
