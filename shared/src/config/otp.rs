//! OTP lifecycle configuration

use serde::{Deserialize, Serialize};

use super::{env_opt, env_positive};

/// Configuration for passcode issuance and verification
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// Minutes a passcode stays valid after issue
    pub ttl_minutes: i64,

    /// Failed comparisons allowed before the record is invalidated
    pub max_attempts: u32,

    /// Overall deadline for one Issue call (whole cascade), in seconds
    pub issue_deadline_secs: u64,

    /// Application name embedded in the default message template
    pub app_name: String,

    /// Accepted recipient numbering plan
    pub numbering_plan: NumberingPlanConfig,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: 10,
            max_attempts: 3,
            issue_deadline_secs: 35,
            app_name: String::from("MtaaSuite"),
            numbering_plan: NumberingPlanConfig::default(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables.
    ///
    /// Zero or negative TTL, attempt cap and deadline keep their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            ttl_minutes: env_positive("OTP_TTL_MINUTES", defaults.ttl_minutes),
            max_attempts: env_positive("OTP_MAX_ATTEMPTS", defaults.max_attempts),
            issue_deadline_secs: env_positive(
                "OTP_ISSUE_DEADLINE_SECS",
                defaults.issue_deadline_secs,
            ),
            app_name: env_opt("OTP_APP_NAME").unwrap_or(defaults.app_name),
            numbering_plan: NumberingPlanConfig::from_env(),
        }
    }
}

/// Regional E.164 numbering plan for accepted recipients.
///
/// Defaults to Tanzanian mobile numbers: `+255` followed by nine digits
/// starting with 6 or 7.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NumberingPlanConfig {
    /// Region name used in validation messages
    pub region_name: String,

    /// Country calling code without `+`
    pub calling_code: String,

    /// Subscriber number length (digits after the calling code)
    pub subscriber_digits: usize,

    /// Accepted leading digits of the subscriber number
    pub mobile_prefixes: String,
}

impl Default for NumberingPlanConfig {
    fn default() -> Self {
        Self {
            region_name: String::from("Tanzania"),
            calling_code: String::from("255"),
            subscriber_digits: 9,
            mobile_prefixes: String::from("67"),
        }
    }
}

impl NumberingPlanConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            region_name: env_opt("OTP_REGION_NAME").unwrap_or(defaults.region_name),
            calling_code: env_opt("OTP_CALLING_CODE")
                .map(|c| c.trim_start_matches('+').to_string())
                .unwrap_or(defaults.calling_code),
            subscriber_digits: env_positive("OTP_SUBSCRIBER_DIGITS", defaults.subscriber_digits),
            mobile_prefixes: env_opt("OTP_MOBILE_PREFIXES").unwrap_or(defaults.mobile_prefixes),
        }
    }
}
