//! Mock SMS Provider Implementation
//!
//! Scripted provider for tests and local development. Nothing leaves the
//! process; accepted messages are kept in memory.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::info;

use mt_core::domain::value_objects::DeliveryReport;
use mt_shared::phone::mask_phone_number;

use super::sms_service::SmsProvider;

/// Mock SMS provider
///
/// This implementation:
/// - Succeeds or fails as configured
/// - Optionally sleeps before answering, to stand in for a slow gateway
/// - Records every message it accepts
#[derive(Clone)]
pub struct MockSmsProvider {
    id: String,
    /// Whether to simulate failures
    simulate_failure: bool,
    delay: Option<Duration>,
    /// Counter for tracking number of send calls
    call_count: Arc<AtomicU64>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockSmsProvider {
    /// Create a mock provider that accepts every message
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            simulate_failure: false,
            delay: None,
            call_count: Arc::new(AtomicU64::new(0)),
            sent: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock provider that rejects every message
    pub fn failing(id: impl Into<String>) -> Self {
        Self {
            simulate_failure: true,
            ..Self::new(id)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get the total number of send calls
    pub fn get_call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Messages accepted so far as `(recipient, message)` pairs
    pub fn sent_messages(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SmsProvider for MockSmsProvider {
    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.id
    }

    async fn send(&self, recipient: &str, message: &str) -> DeliveryReport {
        let call = self.call_count.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.simulate_failure {
            return DeliveryReport::failed(format!("{} simulated failure", self.id));
        }

        if let Ok(mut sent) = self.sent.lock() {
            sent.push((recipient.to_string(), message.to_string()));
        }
        info!(
            provider = %self.id,
            phone = %mask_phone_number(recipient),
            "Mock SMS accepted"
        );
        DeliveryReport::delivered(Some(format!("mock_{}_{}", self.id, call)))
    }
}
