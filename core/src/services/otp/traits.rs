//! Traits for SMS delivery integration

use async_trait::async_trait;

use crate::domain::value_objects::CascadeOutcome;

/// Uniform delivery capability the OTP service depends on.
///
/// Implementations try their providers and report every attempt. Delivery
/// failure is data in the outcome, never an `Err`.
#[async_trait]
pub trait SmsDispatcher: Send + Sync {
    /// Send `message` to `recipient`
    async fn dispatch(&self, recipient: &str, message: &str) -> CascadeOutcome;
}
