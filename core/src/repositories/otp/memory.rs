//! Embedded OTP store for single-process deployments and tests

use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::otp_record::OtpRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::{OtpStore, Transition};

/// Number of independently locked shards
const SHARD_COUNT: usize = 16;

type Shard = HashMap<String, OtpRecord>;

/// In-memory OTP store.
///
/// Keys are spread over a fixed set of mutex-guarded shards. A key always
/// hashes to the same shard, so operations on one phone number are
/// serialized while different numbers rarely contend. Locks are never held
/// across an `.await`.
pub struct InMemoryOtpStore {
    shards: Vec<Mutex<Shard>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    /// Total number of stored records
    pub fn len(&self) -> DomainResult<usize> {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.lock().map_err(|_| Self::poisoned())?.len();
        }
        Ok(total)
    }

    pub fn is_empty(&self) -> DomainResult<bool> {
        Ok(self.len()? == 0)
    }

    fn shard_index(phone: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        phone.hash(&mut hasher);
        (hasher.finish() as usize) % SHARD_COUNT
    }

    fn lock(&self, phone: &str) -> DomainResult<MutexGuard<'_, Shard>> {
        self.shards[Self::shard_index(phone)]
            .lock()
            .map_err(|_| Self::poisoned())
    }

    fn poisoned() -> DomainError {
        tracing::error!(event = "otp_store_poisoned", "OTP store shard lock poisoned");
        DomainError::internal("OTP store shard lock poisoned")
    }
}

impl Default for InMemoryOtpStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn put(&self, record: OtpRecord) -> DomainResult<()> {
        let mut shard = self.lock(&record.phone)?;
        shard.insert(record.phone.clone(), record);
        Ok(())
    }

    async fn get(&self, phone: &str) -> DomainResult<Option<OtpRecord>> {
        let shard = self.lock(phone)?;
        Ok(shard.get(phone).cloned())
    }

    async fn delete(&self, phone: &str) -> DomainResult<bool> {
        let mut shard = self.lock(phone)?;
        Ok(shard.remove(phone).is_some())
    }

    async fn apply<T, F>(&self, phone: &str, transition: F) -> DomainResult<T>
    where
        T: Send,
        F: Fn(Option<&OtpRecord>) -> Transition<T> + Send + Sync,
    {
        let mut shard = self.lock(phone)?;
        let decision = transition(shard.get(phone));
        let output = match decision {
            Transition::Keep(out) => out,
            Transition::Put(record, out) => {
                shard.insert(phone.to_string(), record);
                out
            }
            Transition::Delete(out) => {
                shard.remove(phone);
                out
            }
        };
        Ok(output)
    }
}
