//! Read-only service and provider introspection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Configuration state of one SMS provider.
///
/// `status` is always `"unknown"`: reachability is never probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    pub id: String,
    pub configured: bool,
    pub status: String,
}

/// Liveness report returned by the health check
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub providers_configured: Vec<String>,
}
