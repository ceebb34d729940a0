//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::value_objects::DeliveryAttempt;

/// Result of issuing a passcode
#[derive(Debug, Clone, Serialize)]
pub struct IssueResult {
    /// Identifier of the provider that delivered the SMS
    pub provider_id: String,
    /// Display name of that provider
    pub provider_name: String,
    /// Confirmation message for the caller
    pub message: String,
    pub issued_at: DateTime<Utc>,
    /// Full cascade log, failed attempts first
    pub attempts: Vec<DeliveryAttempt>,
}

/// Result of a successful verification
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResult {
    pub message: String,
    pub verified_at: DateTime<Utc>,
}
