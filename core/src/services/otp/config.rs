//! Configuration for the OTP service

use std::time::Duration;

use mt_shared::config::{NumberingPlanConfig, OtpConfig};

use crate::domain::entities::otp_record::{DEFAULT_EXPIRATION_MINUTES, DEFAULT_MAX_ATTEMPTS};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Number of minutes before a passcode expires
    pub code_expiration_minutes: i64,
    /// Failed comparisons allowed before the record is invalidated
    pub max_attempts: u32,
    /// Overall deadline for the whole delivery cascade of one Issue
    pub issue_deadline: Duration,
    /// Application name used in the default message
    pub app_name: String,
    /// Accepted recipient numbering plan
    pub numbering_plan: NumberingPlanConfig,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self {
            code_expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            issue_deadline: Duration::from_secs(35),
            app_name: String::from("MtaaSuite"),
            numbering_plan: NumberingPlanConfig::default(),
        }
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_expiration_minutes: config.ttl_minutes,
            max_attempts: config.max_attempts,
            issue_deadline: Duration::from_secs(config.issue_deadline_secs),
            app_name: config.app_name.clone(),
            numbering_plan: config.numbering_plan.clone(),
        }
    }
}
