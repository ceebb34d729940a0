//! SMS delivery results exchanged between the cascade and the OTP service

use serde::{Deserialize, Serialize};

/// Result of one provider send call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// Whether the provider's success predicate held
    pub delivered: bool,

    /// Provider-side message identifier, when the response carried one
    pub message_id: Option<String>,

    /// Failure detail (transport error, status, response body)
    pub error: Option<String>,
}

impl DeliveryReport {
    pub fn delivered(message_id: Option<String>) -> Self {
        Self {
            delivered: true,
            message_id,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            delivered: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}

/// One entry of the cascade log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    /// Stable provider identifier (`beem`, `tigo`, `twilio`)
    pub provider_id: String,

    /// Human-readable provider name
    pub provider_name: String,

    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    pub elapsed_ms: u64,
}

/// Ordered per-provider results of one cascade send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeOutcome {
    pub attempts: Vec<DeliveryAttempt>,
}

impl CascadeOutcome {
    /// The attempt that delivered the message, if any
    pub fn delivered_by(&self) -> Option<&DeliveryAttempt> {
        self.attempts.iter().find(|a| a.success)
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered_by().is_some()
    }
}
