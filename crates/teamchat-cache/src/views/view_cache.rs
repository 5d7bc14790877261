//! The view-cache port and its Redis / in-memory implementations

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::pool::RedisPool;

/// Error type for view cache operations
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for view cache operations
pub type CacheResult<T> = Result<T, CacheError>;

/// Port for the key/value cache collaborator: get, put-with-TTL, delete,
/// and delete-by-key-prefix
#[async_trait]
pub trait ViewCache: Send + Sync {
    /// Get a cached value, None on miss or expiry
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Store a value for the given TTL
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Remove a single key
    async fn delete(&self, key: &str) -> CacheResult<()>;

    /// Remove every key starting with the prefix, returning how many went
    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64>;
}

/// Redis-backed view cache
#[derive(Clone)]
pub struct RedisViewCache {
    pool: RedisPool,
}

impl RedisViewCache {
    /// Create a new Redis view cache over a pool
    #[must_use]
    pub fn new(pool: RedisPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ViewCache for RedisViewCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.pool
            .get_string(key)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.pool
            .set_string(key, value, ttl.as_secs().max(1))
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.pool
            .delete(key)
            .await
            .map(|_| ())
            .map_err(|e| CacheError::Backend(e.to_string()))
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        self.pool
            .delete_prefix(prefix)
            .await
            .map_err(|e| CacheError::Backend(e.to_string()))
    }
}

/// In-process view cache with explicit expiry instants.
///
/// Single-node fallback and the test double for the Redis cache.
#[derive(Default)]
pub struct MemoryViewCache {
    entries: RwLock<HashMap<String, (String, Instant)>>,
}

impl MemoryViewCache {
    /// Create an empty in-memory cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ViewCache for MemoryViewCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        // Expired entries are dropped on read rather than by a sweeper
        let expired = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some((value, expires_at)) if *expires_at > Instant::now() => {
                    return Ok(Some(value.clone()));
                }
                Some(_) => true,
                None => false,
            }
        };

        if expired {
            self.entries.write().remove(key);
        }
        Ok(None)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.entries
            .write()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    async fn delete_prefix(&self, prefix: &str) -> CacheResult<u64> {
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok((before - entries.len()) as u64)
    }
}
