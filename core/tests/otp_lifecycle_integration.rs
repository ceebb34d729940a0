//! Integration tests for the OTP lifecycle over the in-memory store

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    use mt_core::domain::value_objects::{CascadeOutcome, DeliveryAttempt};
    use mt_core::errors::{DomainError, OtpError};
    use mt_core::repositories::{InMemoryOtpStore, OtpStore};
    use mt_core::services::otp::{OtpService, OtpServiceConfig, SmsDispatcher};
    use mt_shared::ErrorCode;

    // Dispatcher failing on the first `failures` providers of a fixed list
    struct ScriptedDispatcher {
        providers: Vec<&'static str>,
        failures: usize,
        last_message: Mutex<Option<String>>,
    }

    impl ScriptedDispatcher {
        fn new(failures: usize) -> Self {
            Self {
                providers: vec!["beem", "tigo", "twilio"],
                failures,
                last_message: Mutex::new(None),
            }
        }

        fn last_code(&self) -> String {
            let message = self.last_message.lock().unwrap().clone().unwrap();
            message
                .split(|c: char| !c.is_ascii_digit())
                .find(|chunk| chunk.len() == 6)
                .unwrap()
                .to_string()
        }
    }

    #[async_trait]
    impl SmsDispatcher for ScriptedDispatcher {
        async fn dispatch(&self, _recipient: &str, message: &str) -> CascadeOutcome {
            let mut outcome = CascadeOutcome::default();
            for (index, id) in self.providers.iter().enumerate() {
                let success = index >= self.failures;
                outcome.attempts.push(DeliveryAttempt {
                    provider_id: id.to_string(),
                    provider_name: id.to_string(),
                    success,
                    error_detail: None,
                    message_id: None,
                    elapsed_ms: 0,
                });
                if success {
                    *self.last_message.lock().unwrap() = Some(message.to_string());
                    break;
                }
            }
            outcome
        }
    }

    fn service(
        failures: usize,
    ) -> (
        OtpService<InMemoryOtpStore, ScriptedDispatcher>,
        Arc<InMemoryOtpStore>,
        Arc<ScriptedDispatcher>,
    ) {
        let store = Arc::new(InMemoryOtpStore::new());
        let dispatcher = Arc::new(ScriptedDispatcher::new(failures));
        let service =
            OtpService::new(store.clone(), dispatcher.clone(), OtpServiceConfig::default())
                .unwrap();
        (service, store, dispatcher)
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (service, store, dispatcher) = service(0);
        let phone = "+255687654321";

        let issued = service.issue(phone, None).await.unwrap();
        assert_eq!(issued.provider_id, "beem");

        let code = dispatcher.last_code();
        let wrong = if code == "999999" { "888888" } else { "999999" };

        let err = service.verify(phone, wrong).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidArgument);

        service.verify(phone, &code).await.unwrap();
        let record = store.get(phone).await.unwrap().unwrap();
        assert!(record.verified);
        assert_eq!(record.attempts, 1);

        let err = service.verify(phone, &code).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn test_cascade_fallback_records_provider() {
        let (service, store, _dispatcher) = service(2);
        let phone = "+255712000111";

        let issued = service.issue(phone, None).await.unwrap();
        assert_eq!(issued.provider_id, "twilio");
        assert_eq!(issued.attempts.len(), 3);
        assert_eq!(store.get(phone).await.unwrap().unwrap().provider_used, "twilio");
    }

    #[tokio::test]
    async fn test_total_delivery_failure() {
        let (service, store, _dispatcher) = service(3);
        let phone = "+255712000222";

        let err = service.issue(phone, None).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::Internal);
        assert_eq!(
            err.user_message(),
            "Failed to send SMS via all providers. Please try again later."
        );
        assert!(store.get(phone).await.unwrap().is_none());

        let err = service.verify(phone, "123456").await.unwrap_err();
        assert!(matches!(err, DomainError::Otp(OtpError::NotFound)));
    }
}
