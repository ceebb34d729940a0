//! OTP store trait defining keyed, transactional record storage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainResult, OtpError};

/// Write decided by a transaction body, paired with the value it returns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    /// Leave the stored record as it is
    Keep(T),
    /// Replace the stored record
    Put(OtpRecord, T),
    /// Remove the stored record
    Delete(T),
}

/// Repository for OTP records, one per recipient phone number
///
/// All mutating operations on a single key are linearizable with respect to
/// each other. `apply` is the primitive the verification flow is built on:
/// the store reads the current record, runs the transition, and commits its
/// write with no interleaving mutation on that key in between.
///
/// # Transition bodies
/// A body may be evaluated more than once (optimistic backends retry on
/// contention), so it must be a pure function of its input.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Unconditional upsert, replacing any record for the same phone
    async fn put(&self, record: OtpRecord) -> DomainResult<()>;

    /// Fetch the record for `phone`
    async fn get(&self, phone: &str) -> DomainResult<Option<OtpRecord>>;

    /// Remove the record for `phone`, returning whether one existed
    async fn delete(&self, phone: &str) -> DomainResult<bool>;

    /// Run a single-key read-check-write transaction
    async fn apply<T, F>(&self, phone: &str, transition: F) -> DomainResult<T>
    where
        T: Send,
        F: Fn(Option<&OtpRecord>) -> Transition<T> + Send + Sync;

    /// Atomically add one failed attempt, returning the new count
    async fn increment_attempts(&self, phone: &str) -> DomainResult<u32> {
        let outcome = self
            .apply(phone, |current| match current {
                Some(record) => {
                    let next = record.with_failed_attempt();
                    let attempts = next.attempts;
                    Transition::Put(next, Ok(attempts))
                }
                None => Transition::Keep(Err(OtpError::NotFound)),
            })
            .await?;
        Ok(outcome?)
    }

    /// Atomically mark the record verified.
    ///
    /// Fails with `AlreadyVerified` if it already is, `NotFound` if absent.
    async fn mark_verified(&self, phone: &str, at: DateTime<Utc>) -> DomainResult<()> {
        let outcome = self
            .apply(phone, |current| match current {
                Some(record) if record.verified => Transition::Keep(Err(OtpError::AlreadyVerified)),
                Some(record) => Transition::Put(record.with_verified(at), Ok(())),
                None => Transition::Keep(Err(OtpError::NotFound)),
            })
            .await?;
        Ok(outcome?)
    }
}
