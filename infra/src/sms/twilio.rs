//! Twilio SMS Service Implementation
//!
//! International fallback gateway, called through the Programmable Messaging
//! REST API.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use mt_core::domain::value_objects::DeliveryReport;
use mt_shared::config::TwilioConfig;
use mt_shared::phone::mask_phone_number;

use super::sms_service::{build_http_client, execute_json, SmsProvider};
use crate::InfrastructureError;

/// Message resource returned by `POST /Accounts/{sid}/Messages.json`
#[derive(Debug, Clone, Deserialize)]
pub struct TwilioMessageResponse {
    #[serde(default)]
    pub sid: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl TwilioMessageResponse {
    /// Delivered when the message is `queued` or `sent`
    pub fn is_success(&self) -> bool {
        matches!(self.status.as_deref(), Some("queued") | Some("sent"))
    }
}

/// Twilio SMS adapter
pub struct TwilioSmsService {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
    messages_url: String,
}

impl TwilioSmsService {
    /// Create the adapter; fails if any credential or the sender number is missing
    pub fn new(config: &TwilioConfig, timeout: Duration) -> Result<Self, InfrastructureError> {
        let account_sid = config
            .account_sid
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = config
            .auth_token
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = config
            .from_number
            .clone()
            .ok_or_else(|| InfrastructureError::Config("TWILIO_PHONE_NUMBER not set".to_string()))?;

        // Validate from number format
        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_PHONE_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let messages_url = format!(
            "{}/Accounts/{}/Messages.json",
            config.api_base.trim_end_matches('/'),
            account_sid
        );

        info!(
            "Twilio SMS service initialized with from number: {}",
            mask_phone_number(&from_number)
        );

        Ok(Self {
            client: build_http_client(timeout)?,
            account_sid,
            auth_token,
            from_number,
            messages_url,
        })
    }

    pub fn messages_url(&self) -> &str {
        &self.messages_url
    }

    /// Form fields of the request
    pub fn build_form<'a>(&'a self, recipient: &'a str, message: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("From", self.from_number.as_str()),
            ("To", recipient),
            ("Body", message),
        ]
    }
}

#[async_trait]
impl SmsProvider for TwilioSmsService {
    fn id(&self) -> &str {
        "twilio"
    }

    fn display_name(&self) -> &str {
        "Twilio"
    }

    async fn send(&self, recipient: &str, message: &str) -> DeliveryReport {
        let request = self
            .client
            .post(&self.messages_url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&self.build_form(recipient, message));

        let body = match execute_json(request).await {
            Ok(body) => body,
            Err(detail) => {
                warn!(phone = %mask_phone_number(recipient), error = %detail, "Twilio SMS failed");
                return DeliveryReport::failed(detail);
            }
        };

        match serde_json::from_value::<TwilioMessageResponse>(body.clone()) {
            Ok(response) if response.is_success() => {
                debug!(
                    phone = %mask_phone_number(recipient),
                    sid = ?response.sid,
                    "Twilio accepted SMS"
                );
                DeliveryReport::delivered(response.sid)
            }
            Ok(response) => DeliveryReport::failed(format!(
                "Twilio message status {}: {}",
                response.status.as_deref().unwrap_or("unknown"),
                response.error_message.unwrap_or_default()
            )),
            Err(e) => DeliveryReport::failed(format!("Unexpected Twilio response ({}): {}", e, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config() -> TwilioConfig {
        TwilioConfig {
            account_sid: Some("AC123".to_string()),
            auth_token: Some("token".to_string()),
            from_number: Some("+15005550006".to_string()),
            ..TwilioConfig::default()
        }
    }

    #[test]
    fn test_requires_credentials() {
        let missing = TwilioConfig {
            from_number: None,
            ..config()
        };
        assert!(matches!(
            TwilioSmsService::new(&missing, Duration::from_secs(10)),
            Err(InfrastructureError::Config(_))
        ));

        let bad_from = TwilioConfig {
            from_number: Some("15005550006".to_string()),
            ..config()
        };
        assert!(TwilioSmsService::new(&bad_from, Duration::from_secs(10)).is_err());
    }

    #[test]
    fn test_request_shape() {
        let service = TwilioSmsService::new(&config(), Duration::from_secs(10)).unwrap();
        assert_eq!(
            service.messages_url(),
            "https://api.twilio.com/2010-04-01/Accounts/AC123/Messages.json"
        );
        assert_eq!(
            service.build_form("+255712345678", "Hello"),
            [("From", "+15005550006"), ("To", "+255712345678"), ("Body", "Hello")]
        );
    }

    #[test]
    fn test_success_predicate() {
        let parse =
            |v: serde_json::Value| serde_json::from_value::<TwilioMessageResponse>(v).unwrap();

        assert!(parse(json!({"sid": "SM1", "status": "queued"})).is_success());
        assert!(parse(json!({"sid": "SM1", "status": "sent"})).is_success());
        assert!(!parse(json!({"sid": "SM1", "status": "failed"})).is_success());
        assert!(!parse(json!({"code": 21211, "message": "Invalid 'To'"})).is_success());
    }
}
