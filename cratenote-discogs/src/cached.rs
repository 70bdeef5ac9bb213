//! Cache-aside decorator for entity resolvers.
//!
//! Wraps any [`EntityResolver`] with a [`KeyValueCache`]: a live cache entry
//! short-circuits the lookup entirely, a miss resolves through the inner
//! resolver and populates the cache. Failed lookups are never cached, and a
//! failing cache costs only the side effect, not the result.
//!
//! Concurrent misses for the same key may each reach the inner resolver;
//! the writes race but are idempotent, since an ID always resolves to the
//! same name within its TTL window.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use cratenote_common::cache::KeyValueCache;
use cratenote_common::config::CacheConfig;
use cratenote_markup::{EntityKind, EntityResolver, ResolveError};

/// Entity resolver with a cache-aside policy in front of `inner`.
pub struct CachedResolver<R> {
    inner: R,
    cache: Arc<dyn KeyValueCache>,
    namespace: String,
    ttl: Duration,
}

impl<R: EntityResolver> CachedResolver<R> {
    pub fn new(inner: R, cache: Arc<dyn KeyValueCache>, config: &CacheConfig) -> Self {
        Self {
            inner,
            cache,
            namespace: config.namespace.clone(),
            ttl: config.ttl(),
        }
    }

    /// Cache key for one entity, e.g. `discogs-artist-8390436`.
    fn cache_key(&self, kind: EntityKind, id: u64) -> String {
        format!("{}-{}-{}", self.namespace, kind.as_str(), id)
    }

    async fn resolve(&self, kind: EntityKind, id: u64) -> Result<String, ResolveError> {
        let key = self.cache_key(kind, id);

        match self.cache.get(&key).await {
            Ok(Some(payload)) => match String::from_utf8(payload) {
                Ok(name) => {
                    tracing::debug!(%key, "cache hit");
                    return Ok(name);
                }
                Err(_) => {
                    tracing::warn!(%key, "discarding undecodable cache entry");
                }
            },
            Ok(None) => {}
            Err(err) => {
                // A broken cache degrades to a plain lookup.
                tracing::warn!(%key, %err, "cache read failed");
            }
        }

        let name = match kind {
            EntityKind::Artist => self.inner.resolve_artist(id).await?,
            EntityKind::Release => self.inner.resolve_release(id).await?,
            EntityKind::Master => self.inner.resolve_master(id).await?,
        };

        if let Err(err) = self
            .cache
            .set(&key, name.clone().into_bytes(), self.ttl)
            .await
        {
            // The resolved name is still good; only the side effect is lost.
            tracing::warn!(%key, %err, "cache write failed");
        }

        Ok(name)
    }
}

#[async_trait]
impl<R: EntityResolver> EntityResolver for CachedResolver<R> {
    async fn resolve_artist(&self, id: u64) -> Result<String, ResolveError> {
        self.resolve(EntityKind::Artist, id).await
    }

    async fn resolve_release(&self, id: u64) -> Result<String, ResolveError> {
        self.resolve(EntityKind::Release, id).await
    }

    async fn resolve_master(&self, id: u64) -> Result<String, ResolveError> {
        self.resolve(EntityKind::Master, id).await
    }
}
