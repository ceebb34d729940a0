//! Health and provider status reporting

use chrono::Utc;

use mt_shared::config::SmsProvidersConfig;

use crate::domain::value_objects::{HealthReport, ProviderStatus};

/// Read-only introspection over the startup configuration.
///
/// Never touches the network: provider reachability is reported as
/// `"unknown"`.
#[derive(Debug, Clone)]
pub struct StatusReporter {
    version: String,
    providers: Vec<ProviderStatus>,
}

impl StatusReporter {
    pub fn new(config: &SmsProvidersConfig) -> Self {
        let providers = [
            ("beem", config.beem.is_configured()),
            ("tigo", config.tigo.is_configured()),
            ("twilio", config.twilio.is_configured()),
        ]
        .into_iter()
        .map(|(id, configured)| ProviderStatus {
            id: id.to_string(),
            configured,
            status: "unknown".to_string(),
        })
        .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            providers,
        }
    }

    /// Override the reported service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            version: self.version.clone(),
            providers_configured: self
                .providers
                .iter()
                .filter(|p| p.configured)
                .map(|p| p.id.clone())
                .collect(),
        }
    }

    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        self.providers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_lists_configured_providers() {
        let mut config = SmsProvidersConfig::default();
        config.tigo.api_token = Some("token".into());

        let reporter = StatusReporter::new(&config).with_version("1.0.0");
        let health = reporter.health();

        assert_eq!(health.status, "healthy");
        assert_eq!(health.version, "1.0.0");
        assert_eq!(health.providers_configured, vec!["tigo".to_string()]);
    }

    #[test]
    fn test_provider_status() {
        let reporter = StatusReporter::new(&SmsProvidersConfig::default());
        let statuses = reporter.provider_status();

        let ids: Vec<&str> = statuses.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["beem", "tigo", "twilio"]);
        assert!(statuses.iter().all(|s| !s.configured && s.status == "unknown"));
    }
}
