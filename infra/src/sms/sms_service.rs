//! SMS Provider Interface
//!
//! Defines the uniform capability every SMS gateway adapter implements, plus
//! the HTTP plumbing the adapters share.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::time::Duration;

use mt_core::domain::value_objects::DeliveryReport;

use crate::InfrastructureError;

/// Longest response body excerpt kept in an error detail
const MAX_ERROR_BODY_CHARS: usize = 256;

/// SMS gateway adapter
///
/// Implementations include:
/// - Beem Africa (local primary)
/// - Tigo Business SMS (local secondary)
/// - Twilio (international fallback)
/// - Mock implementation for tests
///
/// Each adapter owns its payload shape and success predicate. Delivery
/// failure of any kind (transport error, timeout, non-2xx status, predicate
/// not met) is reported as `delivered = false`, never as an error.
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Stable identifier (`beem`, `tigo`, `twilio`)
    fn id(&self) -> &str;

    /// Human-readable provider name
    fn display_name(&self) -> &str;

    /// Send an SMS message to a phone number
    ///
    /// # Arguments
    ///
    /// * `recipient` - The recipient's phone number (E.164 format)
    /// * `message` - The message content to send
    async fn send(&self, recipient: &str, message: &str) -> DeliveryReport;
}

/// Build the HTTP client shared by one adapter, bounded by `timeout` per call
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client, InfrastructureError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(InfrastructureError::Http)
}

/// Send `request` and parse a successful response body as JSON.
///
/// Non-2xx statuses and unparsable bodies come back as an error detail.
pub(crate) async fn execute_json(request: RequestBuilder) -> Result<serde_json::Value, String> {
    let response = request.send().await.map_err(|e| describe_transport_error(&e))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| describe_transport_error(&e))?;

    if !status.is_success() {
        return Err(format!("HTTP {}: {}", status.as_u16(), excerpt(&body)));
    }

    serde_json::from_str(&body)
        .map_err(|e| format!("Invalid JSON response ({}): {}", e, excerpt(&body)))
}

pub(crate) fn describe_transport_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        format!("Connection failed: {}", error)
    } else {
        format!("Request failed: {}", error)
    }
}

fn excerpt(body: &str) -> String {
    if body.chars().count() <= MAX_ERROR_BODY_CHARS {
        body.to_string()
    } else {
        let cut: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let cut = excerpt(&body);
        assert_eq!(cut.len(), MAX_ERROR_BODY_CHARS + 3);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }
}
