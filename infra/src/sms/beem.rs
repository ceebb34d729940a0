//! Beem Africa SMS Service Implementation
//!
//! Local primary gateway for Tanzanian numbers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use mt_core::domain::value_objects::DeliveryReport;
use mt_shared::config::BeemConfig;
use mt_shared::phone::{mask_phone_number, to_msisdn};

use super::sms_service::{build_http_client, execute_json, SmsProvider};
use crate::InfrastructureError;

/// Request body for `POST /v1/send`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeemSendRequest {
    pub source_addr: String,
    pub schedule_time: String,
    pub encoding: u8,
    pub message: String,
    pub recipients: Vec<BeemRecipient>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeemRecipient {
    pub recipient_id: u32,
    /// MSISDN without the leading `+`
    pub dest_addr: String,
}

/// Response body; `successful` is a count or a boolean depending on the API version
#[derive(Debug, Clone, Deserialize)]
pub struct BeemSendResponse {
    #[serde(default)]
    pub successful: serde_json::Value,
    #[serde(default)]
    pub request_id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl BeemSendResponse {
    /// Delivered when `successful > 0`
    pub fn is_success(&self) -> bool {
        match &self.successful {
            serde_json::Value::Bool(ok) => *ok,
            serde_json::Value::Number(n) => n.as_f64().map_or(false, |v| v > 0.0),
            _ => false,
        }
    }

    fn message_id(&self) -> Option<String> {
        self.request_id.as_ref().map(|id| match id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}

/// Beem Africa SMS adapter
pub struct BeemSmsService {
    client: reqwest::Client,
    api_key: String,
    secret_key: String,
    sender_name: String,
    api_url: String,
}

impl BeemSmsService {
    /// Create the adapter; fails if either credential is missing
    pub fn new(config: &BeemConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("BEEM_API_KEY not set".to_string()))?;
        let secret_key = config
            .secret_key
            .clone()
            .ok_or_else(|| InfrastructureError::Config("BEEM_SECRET_KEY not set".to_string()))?;

        Ok(Self {
            client: build_http_client(timeout)?,
            api_key,
            secret_key,
            sender_name: config.sender_name.clone(),
            api_url: config.api_url.clone(),
        })
    }

    pub fn build_payload(&self, recipient: &str, message: &str) -> BeemSendRequest {
        BeemSendRequest {
            source_addr: self.sender_name.clone(),
            schedule_time: String::new(),
            encoding: 0,
            message: message.to_string(),
            recipients: vec![BeemRecipient {
                recipient_id: 1,
                dest_addr: to_msisdn(recipient),
            }],
        }
    }
}

#[async_trait]
impl SmsProvider for BeemSmsService {
    fn id(&self) -> &str {
        "beem"
    }

    fn display_name(&self) -> &str {
        "Beem"
    }

    async fn send(&self, recipient: &str, message: &str) -> DeliveryReport {
        let request = self
            .client
            .post(&self.api_url)
            .basic_auth(&self.api_key, Some(&self.secret_key))
            .json(&self.build_payload(recipient, message));

        let body = match execute_json(request).await {
            Ok(body) => body,
            Err(detail) => {
                warn!(phone = %mask_phone_number(recipient), error = %detail, "Beem SMS failed");
                return DeliveryReport::failed(detail);
            }
        };

        match serde_json::from_value::<BeemSendResponse>(body.clone()) {
            Ok(response) if response.is_success() => {
                debug!(phone = %mask_phone_number(recipient), "Beem accepted SMS");
                DeliveryReport::delivered(response.message_id())
            }
            Ok(response) => DeliveryReport::failed(format!(
                "Beem rejected message: {}",
                response.message.unwrap_or_else(|| body.to_string())
            )),
            Err(e) => DeliveryReport::failed(format!("Unexpected Beem response ({}): {}", e, body)),
        }
    }
}
