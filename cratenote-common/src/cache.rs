//! Key/value cache for resolved entity names
//!
//! Lookups follow a cache-aside policy: callers check the cache first and
//! populate it themselves after a successful fetch. The trait keeps the
//! storage pluggable; [`MemoryCache`] is the in-process default.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

/// Cache operation errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Storage backend failure (I/O, connection, serialization)
    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Byte-payload cache with per-entry expiration.
///
/// `get` returns `Ok(None)` for missing or expired keys. Implementations
/// must tolerate concurrent reads and writes; callers do not serialize
/// access.
#[async_trait]
pub trait KeyValueCache: Send + Sync {
    /// Fetch a live entry, or `None` on miss or expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store an entry that expires after `ttl`.
    async fn set(
        &self,
        key: &str,
        payload: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

/// Stored payload plus expiration metadata
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Vec<u8>,
    expires_at: Instant,
}

/// In-memory TTL cache backed by a `HashMap`.
///
/// Expired entries are collected lazily when read.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, including expired ones not yet collected.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if entry.expires_at > Instant::now() => {
                    return Ok(Some(entry.payload.clone()));
                }
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // The entry exists but has expired; collect it under the write lock.
        // Re-check the expiry in case a writer replaced it in between.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at <= Instant::now() {
                entries.remove(key);
            }
        }
        Ok(None)
    }

    async fn set(
        &self,
        key: &str,
        payload: Vec<u8>,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry {
            payload,
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn get_returns_stored_payload() {
        let cache = MemoryCache::new();
        cache.set("k", b"value".to_vec(), HOUR).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"value".to_vec()));
    }

    #[tokio::test]
    async fn get_misses_on_unknown_key() {
        let cache = MemoryCache::new();
        assert_eq!(cache.get("missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_overwrites_existing_entry() {
        let cache = MemoryCache::new();
        cache.set("k", b"old".to_vec(), HOUR).await.unwrap();
        cache.set("k", b"new".to_vec(), HOUR).await.unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"new".to_vec()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn expired_entry_reads_as_miss_and_is_collected() {
        let cache = MemoryCache::new();
        cache
            .set("k", b"value".to_vec(), Duration::from_millis(0))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn entry_survives_until_ttl_elapses() {
        let cache = MemoryCache::new();
        cache
            .set("k", b"value".to_vec(), Duration::from_millis(50))
            .await
            .unwrap();
        assert_eq!(cache.get("k").await.unwrap(), Some(b"value".to_vec()));

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(cache.get("k").await.unwrap(), None);
    }
}
