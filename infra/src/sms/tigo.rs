//! Tigo Business SMS Service Implementation
//!
//! Local secondary gateway for Tanzanian numbers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use mt_core::domain::value_objects::DeliveryReport;
use mt_shared::config::TigoConfig;
use mt_shared::phone::{mask_phone_number, to_msisdn};

use super::sms_service::{build_http_client, execute_json, SmsProvider};
use crate::InfrastructureError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TigoSendRequest {
    /// MSISDN without the leading `+`
    pub msisdn: String,
    pub message: String,
    pub sender_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TigoSendResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TigoSendResponse {
    /// Delivered when `status == "success"`
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Tigo SMS adapter
pub struct TigoSmsService {
    client: reqwest::Client,
    api_token: String,
    sender_id: String,
    api_url: String,
}

impl TigoSmsService {
    /// Create the adapter; fails if the API token is missing
    pub fn new(config: &TigoConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let api_token = config
            .api_token
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TIGO_API_TOKEN not set".to_string()))?;

        Ok(Self {
            client: build_http_client(timeout)?,
            api_token,
            sender_id: config.sender_id.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub fn build_payload(&self, recipient: &str, message: &str) -> TigoSendRequest {
        TigoSendRequest {
            msisdn: to_msisdn(recipient),
            message: message.to_string(),
            sender_id: self.sender_id.clone(),
        }
    }
}

#[async_trait]
impl SmsProvider for TigoSmsService {
    fn id(&self) -> &str {
        "tigo"
    }

    fn display_name(&self) -> &str {
        "Tigo"
    }

    async fn send(&self, recipient: &str, message: &str) -> DeliveryReport {
        let request = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_token)
            .json(&self.build_payload(recipient, message));

        let body = match execute_json(request).await {
            Ok(body) => body,
            Err(detail) => {
                warn!(phone = %mask_phone_number(recipient), error = %detail, "Tigo SMS failed");
                return DeliveryReport::failed(detail);
            }
        };

        match serde_json::from_value::<TigoSendResponse>(body.clone()) {
            Ok(response) if response.is_success() => {
                debug!(phone = %mask_phone_number(recipient), "Tigo accepted SMS");
                DeliveryReport::delivered(response.message_id)
            }
            Ok(response) => DeliveryReport::failed(format!(
                "Tigo rejected message: {}",
                response
                    .message
                    .or(response.status)
                    .unwrap_or_else(|| body.to_string())
            )),
            Err(e) => DeliveryReport::failed(format!("Unexpected Tigo response ({}): {}", e, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> TigoConfig {
        TigoConfig {
            api_token: Some("token".to_string()),
            sender_id: "Mtaa".to_string(),
            ..TigoConfig::default()
        }
    }

    #[test]
    fn test_requires_token() {
        let result = TigoSmsService::new(&TigoConfig::default(), Duration::from_secs(10));
        assert!(matches!(result, Err(InfrastructureError::Config(_))));
    }

    #[test]
    fn test_payload_shape() {
        let service = TigoSmsService::new(&config(), Duration::from_secs(10)).unwrap();
        let payload = service.build_payload("+255612345678", "Hello");

        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"msisdn": "255612345678", "message": "Hello", "sender_id": "Mtaa"})
        );
    }

    #[test]
    fn test_success_predicate() {
        let parse = |v: serde_json::Value| serde_json::from_value::<TigoSendResponse>(v).unwrap();

        assert!(parse(json!({"status": "success", "message_id": "abc"})).is_success());
        assert!(!parse(json!({"status": "failed"})).is_success());
        assert!(!parse(json!({"status": "SUCCESS"})).is_success());
        assert!(!parse(json!({})).is_success());
    }
}
