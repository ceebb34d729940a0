//! Main OTP service implementation

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tokio::time::Instant;

use mt_shared::phone::mask_phone_number;

use crate::domain::entities::otp_record::{OtpRecord, VerifyVerdict};
use crate::errors::{DeliveryError, DomainError, DomainResult, OtpError};
use crate::repositories::otp::{OtpStore, Transition};

use super::code_generator::CodeGenerator;
use super::config::OtpServiceConfig;
use super::phone_validator::PhoneValidator;
use super::traits::SmsDispatcher;
use super::types::{IssueResult, VerifyResult};

/// OTP service composing validation, generation, delivery and storage
pub struct OtpService<S: OtpStore, D: SmsDispatcher> {
    /// Record storage
    store: Arc<S>,
    /// SMS provider cascade
    dispatcher: Arc<D>,
    /// Service configuration
    config: OtpServiceConfig,
    validator: PhoneValidator,
    generator: CodeGenerator,
}

impl<S: OtpStore, D: SmsDispatcher> OtpService<S, D> {
    /// Create a new OTP service
    ///
    /// # Errors
    ///
    /// Fails if the configured numbering plan cannot be compiled.
    pub fn new(store: Arc<S>, dispatcher: Arc<D>, config: OtpServiceConfig) -> DomainResult<Self> {
        let validator = PhoneValidator::new(&config.numbering_plan)?;
        Ok(Self {
            store,
            dispatcher,
            config,
            validator,
            generator: CodeGenerator::new(),
        })
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a passcode to a phone number
    ///
    /// This method:
    /// 1. Validates the phone number against the numbering plan
    /// 2. Generates a new code and composes the message
    /// 3. Sends it through the provider cascade under the issue deadline
    /// 4. Stores the record only once a provider accepted delivery
    ///
    /// A stored record for the same phone is replaced, which invalidates the
    /// previous code. Nothing is stored when delivery fails or times out.
    pub async fn issue(&self, phone: &str, custom_message: Option<&str>) -> DomainResult<IssueResult> {
        if phone.trim().is_empty() {
            return Err(DomainError::validation("Phone number is required"));
        }

        let masked = mask_phone_number(phone);
        if !self.validator.validate(phone) {
            tracing::warn!(
                phone = %masked,
                event = "invalid_phone_number",
                "Rejected OTP request for invalid phone number"
            );
            return Err(DomainError::validation(self.validator.rejection_message()));
        }

        let code = self.generator.generate();
        let message = self.compose_message(&code, custom_message);

        tracing::info!(
            phone = %masked,
            event = "otp_generated",
            custom_message = custom_message.is_some(),
            "Attempting to send OTP"
        );

        let started = Instant::now();
        let outcome = match tokio::time::timeout(
            self.config.issue_deadline,
            self.dispatcher.dispatch(phone, &message),
        )
        .await
        {
            Ok(outcome) => outcome,
            Err(_) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
                tracing::error!(
                    phone = %masked,
                    elapsed_ms,
                    event = "otp_delivery_deadline_exceeded",
                    "SMS cascade did not finish within the issue deadline"
                );
                return Err(DeliveryError::DeadlineExceeded { elapsed_ms }.into());
            }
        };

        if outcome.attempts.is_empty() {
            tracing::error!(event = "otp_no_providers", "No SMS providers configured");
            return Err(DeliveryError::NoProvidersConfigured.into());
        }

        let Some(delivered) = outcome.delivered_by() else {
            tracing::error!(
                phone = %masked,
                attempts = outcome.attempts.len(),
                event = "otp_delivery_failed",
                "All SMS providers failed"
            );
            return Err(DeliveryError::AllProvidersFailed {
                attempts: outcome.attempts,
            }
            .into());
        };
        let provider_id = delivered.provider_id.clone();
        let provider_name = delivered.provider_name.clone();

        let now = Utc::now();
        let record = OtpRecord::issue(
            phone,
            code,
            provider_id.clone(),
            now,
            Duration::minutes(self.config.code_expiration_minutes),
        );

        self.store.put(record).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                provider = %provider_id,
                error = %e,
                event = "otp_storage_failed",
                "SMS delivered but the OTP record could not be stored"
            );
            e
        })?;

        tracing::info!(
            phone = %masked,
            provider = %provider_id,
            attempts = outcome.attempts.len(),
            event = "otp_issued",
            "OTP sent successfully"
        );

        Ok(IssueResult {
            message: format!("OTP sent successfully via {} SMS", provider_name),
            provider_id,
            provider_name,
            issued_at: now,
            attempts: outcome.attempts,
        })
    }

    /// Verify a passcode
    ///
    /// The whole check runs as one store transaction on the phone's record,
    /// so concurrent calls for the same phone cannot both consume an attempt
    /// slot or both succeed.
    pub async fn verify(&self, phone: &str, code: &str) -> DomainResult<VerifyResult> {
        if phone.trim().is_empty() || code.trim().is_empty() {
            return Err(DomainError::validation("Phone number and OTP are required"));
        }

        let now = Utc::now();
        let max_attempts = self.config.max_attempts;
        let outcome = self
            .store
            .apply(phone, |current| verify_transition(current, code, now, max_attempts))
            .await?;

        let masked = mask_phone_number(phone);
        match outcome {
            Ok(()) => {
                tracing::info!(phone = %masked, event = "otp_verified", "OTP verified successfully");
                Ok(VerifyResult {
                    message: "OTP verified successfully".to_string(),
                    verified_at: now,
                })
            }
            Err(err) => {
                match &err {
                    OtpError::Mismatch { attempts } => tracing::warn!(
                        phone = %masked,
                        attempts = *attempts,
                        max_attempts,
                        event = "otp_mismatch",
                        "Invalid OTP supplied"
                    ),
                    OtpError::AttemptsExhausted => tracing::warn!(
                        phone = %masked,
                        event = "otp_attempts_exhausted",
                        "OTP invalidated after too many failed attempts"
                    ),
                    other => tracing::info!(
                        phone = %masked,
                        reason = ?other,
                        event = "otp_rejected",
                        "OTP verification rejected"
                    ),
                }
                Err(err.into())
            }
        }
    }

    fn compose_message(&self, code: &str, custom_message: Option<&str>) -> String {
        match custom_message.filter(|m| !m.trim().is_empty()) {
            Some(custom) => custom.to_string(),
            None => format!(
                "Your {} verification code is: {}. Valid for {} minutes. Do not share this code.",
                self.config.app_name, code, self.config.code_expiration_minutes
            ),
        }
    }
}

/// Verification state machine, evaluated inside the store transaction.
///
/// Expired and exhausted records are deleted; a mismatch stores one more
/// failed attempt; a match marks the record verified.
pub(crate) fn verify_transition(
    current: Option<&OtpRecord>,
    supplied: &str,
    now: DateTime<Utc>,
    max_attempts: u32,
) -> Transition<Result<(), OtpError>> {
    let Some(record) = current else {
        return Transition::Keep(Err(OtpError::NotFound));
    };

    match record.check(supplied, now, max_attempts) {
        VerifyVerdict::Expired => Transition::Delete(Err(OtpError::Expired)),
        VerifyVerdict::AlreadyVerified => Transition::Keep(Err(OtpError::AlreadyVerified)),
        VerifyVerdict::AttemptsExhausted => Transition::Delete(Err(OtpError::AttemptsExhausted)),
        VerifyVerdict::Mismatch => {
            let next = record.with_failed_attempt();
            let attempts = next.attempts;
            Transition::Put(next, Err(OtpError::Mismatch { attempts }))
        }
        VerifyVerdict::Match => Transition::Put(record.with_verified(now), Ok(())),
    }
}
