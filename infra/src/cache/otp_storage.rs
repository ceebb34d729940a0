//! Redis-backed OTP record store
//!
//! Records are stored as JSON under `{prefix}:record:{phone}`. Every write
//! carries a TTL of the record's remaining lifetime plus a retention window,
//! so Redis evicts stale records on its own while expired records stay
//! visible long enough for verification to report them as expired.
//!
//! Read-check-write transactions use optimistic locking: the key is
//! `WATCH`ed on a dedicated connection, the transition runs against the
//! current value, and the write is committed with `MULTI`/`EXEC`. A
//! concurrent write to the key aborts the `EXEC`, and the transaction is
//! retried against the fresh value.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use mt_core::domain::entities::otp_record::OtpRecord;
use mt_core::errors::{DomainError, DomainResult};
use mt_core::repositories::otp::{OtpStore, Transition};
use mt_shared::config::StoreConfig;
use mt_shared::phone::mask_phone_number;

use crate::cache::RedisClient;
use crate::InfrastructureError;

/// OTP store on top of Redis
#[derive(Clone)]
pub struct RedisOtpStore {
    redis_client: RedisClient,
    config: StoreConfig,
}

impl RedisOtpStore {
    pub fn new(redis_client: RedisClient, config: StoreConfig) -> Self {
        Self {
            redis_client,
            config,
        }
    }

    /// Connect to the configured Redis server and check it answers
    pub async fn connect(config: StoreConfig) -> Result<Self, InfrastructureError> {
        let redis_client = RedisClient::new(&config.redis_url).await?;
        if !redis_client.health_check().await? {
            return Err(InfrastructureError::Config(
                "Redis did not answer PING".to_string(),
            ));
        }
        info!(prefix = %config.key_prefix, "Redis OTP store ready");
        Ok(Self::new(redis_client, config))
    }

    fn encode(record: &OtpRecord) -> Result<String, InfrastructureError> {
        Ok(serde_json::to_string(record)?)
    }

    fn decode(raw: Option<String>) -> Result<Option<OtpRecord>, InfrastructureError> {
        raw.map(|json| serde_json::from_str(&json))
            .transpose()
            .map_err(InfrastructureError::from)
    }

    /// One optimistic attempt; `Ok(None)` means the commit lost a race
    async fn try_apply<T, F>(
        &self,
        key: &str,
        transition: &F,
    ) -> Result<Option<T>, InfrastructureError>
    where
        T: Send,
        F: Fn(Option<&OtpRecord>) -> Transition<T> + Send + Sync,
    {
        let mut conn = self.redis_client.dedicated_connection().await?;

        redis::cmd("WATCH")
            .arg(key)
            .query_async::<_, ()>(&mut conn)
            .await?;
        let raw: Option<String> = redis::cmd("GET").arg(key).query_async(&mut conn).await?;
        let current = Self::decode(raw)?;

        let decision = transition(current.as_ref());
        let mut pipe = redis::pipe();
        pipe.atomic();
        let output = match decision {
            Transition::Keep(out) => {
                redis::cmd("UNWATCH").query_async::<_, ()>(&mut conn).await?;
                return Ok(Some(out));
            }
            Transition::Put(record, out) => {
                let ttl_ms = retention_ttl_ms(&record, Utc::now(), self.config.retention_secs);
                pipe.cmd("SET")
                    .arg(key)
                    .arg(Self::encode(&record)?)
                    .arg("PX")
                    .arg(ttl_ms);
                out
            }
            Transition::Delete(out) => {
                pipe.cmd("DEL").arg(key);
                out
            }
        };

        // EXEC answers nil when a watched key changed
        let committed: Option<redis::Value> = pipe.query_async(&mut conn).await?;
        Ok(committed.map(|_| output))
    }
}

/// Milliseconds a record should live in Redis.
///
/// Remaining lifetime (never negative) plus the retention window, and at
/// least one millisecond since `PX 0` is rejected.
pub(crate) fn retention_ttl_ms(record: &OtpRecord, now: DateTime<Utc>, retention_secs: u64) -> u64 {
    let remaining = (record.expires_at - now).num_milliseconds().max(0) as u64;
    (remaining + retention_secs.saturating_mul(1000)).max(1)
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn put(&self, record: OtpRecord) -> DomainResult<()> {
        let key = self.config.record_key(&record.phone);
        let ttl_ms = retention_ttl_ms(&record, Utc::now(), self.config.retention_secs);
        let json = Self::encode(&record)?;

        self.redis_client.set_with_expiry_ms(&key, &json, ttl_ms).await?;

        debug!(
            phone = %mask_phone_number(&record.phone),
            ttl_ms,
            "Stored OTP record in Redis"
        );
        Ok(())
    }

    async fn get(&self, phone: &str) -> DomainResult<Option<OtpRecord>> {
        let raw = self.redis_client.get(&self.config.record_key(phone)).await?;
        Ok(Self::decode(raw)?)
    }

    async fn delete(&self, phone: &str) -> DomainResult<bool> {
        Ok(self.redis_client.delete(&self.config.record_key(phone)).await?)
    }

    async fn apply<T, F>(&self, phone: &str, transition: F) -> DomainResult<T>
    where
        T: Send,
        F: Fn(Option<&OtpRecord>) -> Transition<T> + Send + Sync,
    {
        let key = self.config.record_key(phone);
        let max_retries = self.config.max_transaction_retries;

        for attempt in 0..=max_retries {
            if let Some(output) = self.try_apply(&key, &transition).await? {
                return Ok(output);
            }
            warn!(
                phone = %mask_phone_number(phone),
                attempt = attempt + 1,
                "OTP record changed during transaction, retrying"
            );
        }

        error!(
            phone = %mask_phone_number(phone),
            retries = max_retries,
            event = "otp_store_contention",
            "OTP store transaction retries exhausted"
        );
        Err(DomainError::internal("OTP store transaction contention"))
    }
}
