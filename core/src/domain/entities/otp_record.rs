//! OTP record entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};

/// Default number of failed comparisons before the record is invalidated
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Length of the passcode
pub const CODE_LENGTH: usize = 6;

/// Default validity window (10 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 10;

/// One pending-or-resolved passcode, keyed by recipient phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Recipient phone number in E.164 format
    pub phone: String,

    /// The 6-digit passcode
    pub code: String,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp after which the record can no longer be verified
    pub expires_at: DateTime<Utc>,

    /// Number of failed comparisons so far
    pub attempts: u32,

    /// Whether the passcode has been successfully used
    pub verified: bool,

    /// Timestamp of the successful verification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,

    /// SMS provider that accepted delivery
    pub provider_used: String,
}

/// Outcome of checking a supplied code against a record, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyVerdict {
    Expired,
    AlreadyVerified,
    AttemptsExhausted,
    Mismatch,
    Match,
}

impl OtpRecord {
    /// Creates a pending record issued at `now`
    pub fn issue(
        phone: impl Into<String>,
        code: impl Into<String>,
        provider_used: impl Into<String>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            phone: phone.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + ttl,
            attempts: 0,
            verified: false,
            verified_at: None,
            provider_used: provider_used.into(),
        }
    }

    /// A record is expired strictly after `expires_at`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn attempts_exhausted(&self, max_attempts: u32) -> bool {
        self.attempts >= max_attempts
    }

    /// Checks a supplied code without mutating the record.
    ///
    /// Expiry wins over every other state, then single use, then the attempt
    /// cap. The code comparison runs in constant time.
    pub fn check(&self, supplied: &str, now: DateTime<Utc>, max_attempts: u32) -> VerifyVerdict {
        if self.is_expired_at(now) {
            VerifyVerdict::Expired
        } else if self.verified {
            VerifyVerdict::AlreadyVerified
        } else if self.attempts_exhausted(max_attempts) {
            VerifyVerdict::AttemptsExhausted
        } else if !constant_time_eq(self.code.as_bytes(), supplied.as_bytes()) {
            VerifyVerdict::Mismatch
        } else {
            VerifyVerdict::Match
        }
    }

    /// Copy of this record with one more failed attempt
    pub fn with_failed_attempt(&self) -> Self {
        Self {
            attempts: self.attempts.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this record marked verified at `now`
    pub fn with_verified(&self, now: DateTime<Utc>) -> Self {
        Self {
            verified: true,
            verified_at: Some(now),
            ..self.clone()
        }
    }
}
