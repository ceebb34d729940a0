//! Concurrent verification against a single record

use std::sync::Arc;

use crate::errors::{DomainError, OtpError};
use crate::repositories::otp::{InMemoryOtpStore, OtpStore};
use crate::services::otp::{OtpService, OtpServiceConfig};

use super::mocks::MockSmsDispatcher;

const PHONE: &str = "+255712345678";

type TestService = OtpService<InMemoryOtpStore, MockSmsDispatcher>;

async fn issued_service() -> (Arc<TestService>, Arc<InMemoryOtpStore>, String) {
    let store = Arc::new(InMemoryOtpStore::new());
    let dispatcher = Arc::new(MockSmsDispatcher::delivering());
    let service = Arc::new(
        OtpService::new(store.clone(), dispatcher.clone(), OtpServiceConfig::default()).unwrap(),
    );
    service.issue(PHONE, None).await.unwrap();
    let code = dispatcher.get_sent_code(PHONE).unwrap();
    (service, store, code)
}

async fn verify_concurrently(
    service: &Arc<TestService>,
    code: &str,
    n: usize,
) -> Vec<Result<(), DomainError>> {
    let handles: Vec<_> = (0..n)
        .map(|_| {
            let service = service.clone();
            let code = code.to_string();
            tokio::spawn(async move { service.verify(PHONE, &code).await.map(|_| ()) })
        })
        .collect();

    let mut results = Vec::with_capacity(n);
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    results
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_wrong_codes_respect_attempt_cap() {
    let (service, store, code) = issued_service().await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let results = verify_concurrently(&service, wrong, 32).await;

    let mut mismatch_counts: Vec<u32> = results
        .iter()
        .filter_map(|r| match r {
            Err(DomainError::Otp(OtpError::Mismatch { attempts })) => Some(*attempts),
            _ => None,
        })
        .collect();
    mismatch_counts.sort_unstable();
    let exhausted = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Otp(OtpError::AttemptsExhausted))))
        .count();
    let not_found = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Otp(OtpError::NotFound))))
        .count();

    assert_eq!(mismatch_counts, vec![1, 2, 3]);
    assert_eq!(exhausted, 1);
    assert_eq!(not_found, 32 - 4);
    assert!(results.iter().all(|r| r.is_err()));
    assert!(store.get(PHONE).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_correct_codes_succeed_once() {
    let (service, store, code) = issued_service().await;

    let results = verify_concurrently(&service, &code, 16).await;

    let successes = results.iter().filter(|r| r.is_ok()).count();
    let already_used = results
        .iter()
        .filter(|r| matches!(r, Err(DomainError::Otp(OtpError::AlreadyVerified))))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(already_used, 15);
    assert!(store.get(PHONE).await.unwrap().unwrap().verified);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_different_recipients_do_not_interfere() {
    let store = Arc::new(InMemoryOtpStore::new());
    let dispatcher = Arc::new(MockSmsDispatcher::delivering());
    let service = Arc::new(
        OtpService::new(store.clone(), dispatcher.clone(), OtpServiceConfig::default()).unwrap(),
    );

    let phones: Vec<String> = (0..20).map(|i| format!("+2557000000{:02}", i)).collect();
    let handles: Vec<_> = phones
        .iter()
        .cloned()
        .map(|phone| {
            let service = service.clone();
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                service.issue(&phone, None).await.unwrap();
                let code = dispatcher.get_sent_code(&phone).unwrap();
                service.verify(&phone, &code).await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }
    assert_eq!(store.len().unwrap(), 20);
}

#[tokio::test]
async fn test_cancelled_issue_stores_nothing() {
    let store = Arc::new(InMemoryOtpStore::new());
    let dispatcher = Arc::new(
        MockSmsDispatcher::delivering().with_delay(std::time::Duration::from_secs(30)),
    );
    let service = Arc::new(
        OtpService::new(store.clone(), dispatcher.clone(), OtpServiceConfig::default()).unwrap(),
    );

    let task = {
        let service = service.clone();
        tokio::spawn(async move { service.issue(PHONE, None).await })
    };
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    assert_eq!(dispatcher.dispatches(), 1);
    assert!(dispatcher.get_sent_message(PHONE).is_none());
    assert!(store.is_empty().unwrap());
}
