pub mod otp;

pub use otp::{InMemoryOtpStore, OtpStore, Transition};
