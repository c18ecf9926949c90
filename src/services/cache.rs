use crate::models::ProfileRecord;
use redis::aio::ConnectionManager;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur with cache operations
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    RedisError(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Two-tier profile cache
///
/// L1 is an in-process moka cache, L2 is Redis shared across instances.
/// Without Redis only L1 is used. A miss is `Ok(None)`; callers fall back to
/// the store.
pub struct CacheManager {
    redis: Option<Arc<tokio::sync::Mutex<ConnectionManager>>>,
    l1_cache: moka::future::Cache<String, Arc<ProfileRecord>>,
    ttl_secs: u64,
}

impl CacheManager {
    pub async fn new(redis_url: &str, l1_size: u64, ttl_secs: u64) -> Result<Self, CacheError> {
        let client = redis::Client::open(redis_url)?;
        let redis = ConnectionManager::new(client).await?;

        Ok(Self {
            redis: Some(Arc::new(tokio::sync::Mutex::new(redis))),
            ..Self::in_memory(l1_size, ttl_secs)
        })
    }

    /// L1-only cache for a single instance
    pub fn in_memory(l1_size: u64, ttl_secs: u64) -> Self {
        let l1_cache = moka::future::CacheBuilder::new(l1_size)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            redis: None,
            l1_cache,
            ttl_secs,
        }
    }

    /// Look up a profile, L1 first, then Redis
    pub async fn get_profile(&self, email: &str) -> Result<Option<ProfileRecord>, CacheError> {
        let key = CacheKey::profile(email);

        if let Some(record) = self.l1_cache.get(&key).await {
            tracing::trace!("L1 cache hit: {}", key);
            return Ok(Some(record.as_ref().clone()));
        }

        let Some(l2) = &self.redis else {
            tracing::trace!("Cache miss: {}", key);
            return Ok(None);
        };

        let mut conn = l2.lock().await;
        let value: Option<String> = redis::cmd("GET").arg(&key).query_async(&mut *conn).await?;
        drop(conn);

        match value {
            Some(json) => {
                tracing::trace!("L2 cache hit: {}", key);
                let record: ProfileRecord = serde_json::from_str(&json)?;
                self.l1_cache.insert(key, Arc::new(record.clone())).await;
                Ok(Some(record))
            }
            None => {
                tracing::trace!("Cache miss: {}", key);
                Ok(None)
            }
        }
    }

    /// Store a profile in both tiers
    pub async fn put_profile(&self, record: &ProfileRecord) -> Result<(), CacheError> {
        let key = CacheKey::profile(&record.email);
        self.l1_cache.insert(key.clone(), Arc::new(record.clone())).await;

        if let Some(l2) = &self.redis {
            let json = serde_json::to_string(record)?;
            let mut conn = l2.lock().await;
            redis::cmd("SETEX")
                .arg(&key)
                .arg(self.ttl_secs)
                .arg(json)
                .query_async::<()>(&mut *conn)
                .await?;
        }

        tracing::trace!("Cache set: {}", key);
        Ok(())
    }

    /// Drop a profile from both tiers after it changes in the store
    pub async fn invalidate_profile(&self, email: &str) -> Result<(), CacheError> {
        let key = CacheKey::profile(email);
        self.l1_cache.invalidate(&key).await;

        if let Some(l2) = &self.redis {
            let mut conn = l2.lock().await;
            redis::cmd("DEL").arg(&key).query_async::<()>(&mut *conn).await?;
        }

        tracing::trace!("Cache invalidated: {}", key);
        Ok(())
    }
}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a profile
    pub fn profile(email: &str) -> String {
        format!("profile:{}", email)
    }
}
