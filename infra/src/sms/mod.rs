//! SMS Service Module
//!
//! Gateway adapters and the cascade that strings them together.
//!
//! ## Features
//!
//! - **SmsProvider Trait**: Uniform `send(recipient, message)` capability
//! - **Beem / Tigo**: Local Tanzanian gateways
//! - **Twilio**: International fallback
//! - **Cascade**: Priority-ordered, sequential failover
//! - **Mock Implementation**: Scripted provider for tests

pub mod beem;
pub mod cascade;
pub mod mock_sms;
pub mod sms_service;
pub mod tigo;
pub mod twilio;

// Re-export commonly used types
pub use beem::BeemSmsService;
pub use cascade::CascadeSmsService;
pub use mock_sms::MockSmsProvider;
pub use sms_service::SmsProvider;
pub use tigo::TigoSmsService;
pub use twilio::TwilioSmsService;

#[cfg(test)]
mod tests;
