//! Cascade SMS Service Implementation
//!
//! Tries a fixed, priority-ordered list of SMS gateways one after another
//! until one accepts the message.
//!
//! ## Behaviour
//!
//! - Providers are tried strictly in order, never in parallel
//! - Each provider gets exactly one attempt per send
//! - The first accepted delivery stops the cascade
//! - Every attempt is recorded in the outcome

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

use mt_core::domain::value_objects::{CascadeOutcome, DeliveryAttempt};
use mt_core::services::otp::SmsDispatcher;
use mt_shared::config::SmsProvidersConfig;
use mt_shared::phone::mask_phone_number;

use super::beem::BeemSmsService;
use super::sms_service::SmsProvider;
use super::tigo::TigoSmsService;
use super::twilio::TwilioSmsService;
use crate::InfrastructureError;

/// SMS dispatcher trying several gateways in priority order
pub struct CascadeSmsService {
    providers: Vec<Box<dyn SmsProvider>>,
}

impl CascadeSmsService {
    /// Create a cascade over `providers`, highest priority first
    pub fn new(providers: Vec<Box<dyn SmsProvider>>) -> Self {
        info!(
            providers = ?providers.iter().map(|p| p.id()).collect::<Vec<_>>(),
            "Initializing SMS cascade"
        );
        Self { providers }
    }

    /// Build the cascade from configuration.
    ///
    /// Order is Beem, Tigo, Twilio. Providers without credentials are left
    /// out; an empty cascade is allowed and fails every send.
    pub fn from_config(config: &SmsProvidersConfig) -> Result<Self, InfrastructureError> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let mut providers: Vec<Box<dyn SmsProvider>> = Vec::new();

        if config.beem.is_configured() {
            providers.push(Box::new(BeemSmsService::new(&config.beem, timeout)?));
        }
        if config.tigo.is_configured() {
            providers.push(Box::new(TigoSmsService::new(&config.tigo, timeout)?));
        }
        if config.twilio.is_configured() {
            providers.push(Box::new(TwilioSmsService::new(&config.twilio, timeout)?));
        }

        if providers.is_empty() {
            warn!("No SMS providers configured, every OTP send will fail");
        }

        Ok(Self::new(providers))
    }

    /// Identifiers of the providers this cascade tries, in order
    pub fn provider_ids(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.id()).collect()
    }

    /// Send `message` to `recipient` through the cascade
    pub async fn send(&self, recipient: &str, message: &str) -> CascadeOutcome {
        let masked = mask_phone_number(recipient);
        let mut outcome = CascadeOutcome::default();

        for provider in &self.providers {
            let started = Instant::now();
            let report = provider.send(recipient, message).await;
            let elapsed_ms = started.elapsed().as_millis() as u64;

            outcome.attempts.push(DeliveryAttempt {
                provider_id: provider.id().to_string(),
                provider_name: provider.display_name().to_string(),
                success: report.delivered,
                error_detail: report.error.clone(),
                message_id: report.message_id.clone(),
                elapsed_ms,
            });

            if report.delivered {
                info!(
                    phone = %masked,
                    provider = provider.id(),
                    elapsed_ms,
                    "SMS sent successfully via {}",
                    provider.display_name()
                );
                return outcome;
            }

            warn!(
                phone = %masked,
                provider = provider.id(),
                elapsed_ms,
                error = report.error.as_deref().unwrap_or("not delivered"),
                "SMS provider failed, trying next"
            );
        }

        error!(
            phone = %masked,
            attempts = outcome.attempts.len(),
            "All SMS providers failed"
        );
        outcome
    }
}

#[async_trait]
impl SmsDispatcher for CascadeSmsService {
    async fn dispatch(&self, recipient: &str, message: &str) -> CascadeOutcome {
        self.send(recipient, message).await
    }
}
