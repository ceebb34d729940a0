//! SMS gateway configuration
//!
//! Each gateway is optional. A gateway whose credentials are missing is left
//! out of the delivery cascade at startup.

use serde::{Deserialize, Serialize};

use super::{env_opt, env_positive};

/// Default sender name shown on the handset
pub const DEFAULT_SENDER: &str = "MtaaSuite";

/// Beem Africa gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BeemConfig {
    pub api_key: Option<String>,
    pub secret_key: Option<String>,
    pub sender_name: String,
    pub api_url: String,
}

impl Default for BeemConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            secret_key: None,
            sender_name: String::from(DEFAULT_SENDER),
            api_url: String::from("https://apisms.beem.africa/v1/send"),
        }
    }
}

impl BeemConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_opt("BEEM_API_KEY"),
            secret_key: env_opt("BEEM_SECRET_KEY"),
            sender_name: env_opt("BEEM_SENDER_NAME").unwrap_or(defaults.sender_name),
            api_url: env_opt("BEEM_API_URL").unwrap_or(defaults.api_url),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.secret_key.is_some()
    }
}

/// Tigo Business SMS gateway
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TigoConfig {
    pub api_token: Option<String>,
    pub sender_id: String,
    pub api_url: String,
}

impl Default for TigoConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            sender_id: String::from(DEFAULT_SENDER),
            api_url: String::from("https://messaging.tigo.co.tz/sms/sendsms"),
        }
    }
}

impl TigoConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_token: env_opt("TIGO_API_TOKEN"),
            sender_id: env_opt("TIGO_SENDER_ID").unwrap_or(defaults.sender_id),
            api_url: env_opt("TIGO_API_URL").unwrap_or(defaults.api_url),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_token.is_some()
    }
}

/// Twilio Programmable Messaging
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwilioConfig {
    pub account_sid: Option<String>,
    pub auth_token: Option<String>,
    /// Sender number in E.164 format
    pub from_number: Option<String>,
    pub api_base: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            api_base: String::from("https://api.twilio.com/2010-04-01"),
        }
    }
}

impl TwilioConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            account_sid: env_opt("TWILIO_ACCOUNT_SID"),
            auth_token: env_opt("TWILIO_AUTH_TOKEN"),
            from_number: env_opt("TWILIO_PHONE_NUMBER"),
            api_base: env_opt("TWILIO_API_BASE").unwrap_or(defaults.api_base),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}

/// All SMS gateways, in cascade order
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsProvidersConfig {
    pub beem: BeemConfig,
    pub tigo: TigoConfig,
    pub twilio: TwilioConfig,

    /// Per-request HTTP timeout for every gateway, in seconds
    pub request_timeout_secs: u64,
}

impl Default for SmsProvidersConfig {
    fn default() -> Self {
        Self {
            beem: BeemConfig::default(),
            tigo: TigoConfig::default(),
            twilio: TwilioConfig::default(),
            request_timeout_secs: 10,
        }
    }
}

impl SmsProvidersConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            beem: BeemConfig::from_env(),
            tigo: TigoConfig::from_env(),
            twilio: TwilioConfig::from_env(),
            request_timeout_secs: env_positive("SMS_REQUEST_TIMEOUT_SECS", 10),
        }
    }
}
