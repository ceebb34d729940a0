//! Route handlers
//!
//! - `otp` - passcode issue, verify and provider status
//! - `health` - liveness report

pub mod health;
pub mod otp;
