//! Request and response bodies of the OTP endpoints
//!
//! Field names are camelCase on the wire to match the mobile client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

use mt_core::domain::value_objects::ProviderStatus;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Recipient in E.164 format, e.g. `+255712345678`
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone_number: String,

    /// Replaces the default message template when present
    #[validate(length(max = 640, message = "Custom message is too long"))]
    pub custom_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[validate(length(max = 32, message = "Phone number is too long"))]
    pub phone_number: String,

    #[serde(default)]
    #[validate(length(max = 16, message = "OTP is too long"))]
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    /// Display name of the gateway that delivered the code
    pub provider: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderState {
    pub configured: bool,
    pub status: String,
}

/// Provider configuration keyed by provider id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderStatusResponse {
    pub providers: BTreeMap<String, ProviderState>,
    pub timestamp: DateTime<Utc>,
}

impl ProviderStatusResponse {
    pub fn from_statuses(statuses: Vec<ProviderStatus>) -> Self {
        Self {
            providers: statuses
                .into_iter()
                .map(|s| {
                    (
                        s.id,
                        ProviderState {
                            configured: s.configured,
                            status: s.status,
                        },
                    )
                })
                .collect(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_request_wire_names() {
        let request: SendOtpRequest = serde_json::from_value(json!({
            "phoneNumber": "+255712345678",
            "customMessage": "Code 123456"
        }))
        .unwrap();

        assert_eq!(request.phone_number, "+255712345678");
        assert_eq!(request.custom_message.as_deref(), Some("Code 123456"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: VerifyOtpRequest = serde_json::from_value(json!({})).unwrap();
        assert!(request.phone_number.is_empty());
        assert!(request.otp.is_empty());
    }

    #[test]
    fn test_oversized_fields_fail_validation() {
        let request = VerifyOtpRequest {
            phone_number: "+255712345678".to_string(),
            otp: "1".repeat(17),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_provider_status_keyed_by_id() {
        let response = ProviderStatusResponse::from_statuses(vec![ProviderStatus {
            id: "beem".to_string(),
            configured: true,
            status: "unknown".to_string(),
        }]);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["providers"]["beem"]["configured"], true);
        assert_eq!(value["providers"]["beem"]["status"], "unknown");
    }
}
