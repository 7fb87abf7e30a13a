//! In-memory cache backend over [`TtlStore`].

use std::fmt;
use std::hash::Hash;
use std::sync::{Arc, Weak};
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use cachet_core::config::cache::MemoryCacheConfig;
use cachet_core::result::CacheResult;
use cachet_core::traits::backend::CacheBackend;
use cachet_core::traits::clock::Clock;
use cachet_core::types::{CacheKey, CacheOptions, CacheValue};

use super::ttl_store::TtlStore;

/// In-memory cache backend.
///
/// Every instance owns its own store; nothing is shared between instances.
pub struct MemoryBackend<K = CacheKey, V = CacheValue>
where
    K: Eq + Hash,
{
    /// The underlying TTL store.
    store: Arc<TtlStore<K, V>>,
    /// TTL used when an operation does not pass one.
    default_ttl: Option<Duration>,
    /// Background sweep of expired entries, if enabled.
    sweeper: Option<JoinHandle<()>>,
}

impl<K, V> MemoryBackend<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a backend with no default TTL and no background sweep.
    pub fn new() -> Self {
        Self::from_store(TtlStore::new())
    }

    /// Create a backend whose store reads the given clock.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::from_store(TtlStore::with_clock(clock))
    }

    /// Create a backend from configuration.
    ///
    /// A sweep interval starts a tokio task, so it needs a running runtime;
    /// without one the sweep is skipped and expiry stays purely lazy.
    pub fn from_config(config: &MemoryCacheConfig) -> Self {
        let mut backend = Self::new();
        backend.default_ttl = config
            .default_ttl_seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs);
        if let Some(seconds) = config.sweep_interval_seconds {
            backend.start_sweeper(Duration::from_secs(seconds));
        }
        backend
    }

    fn from_store(store: TtlStore<K, V>) -> Self {
        Self {
            store: Arc::new(store),
            default_ttl: None,
            sweeper: None,
        }
    }

    /// Set the TTL used when an operation does not pass one.
    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = Some(ttl);
        self
    }

    /// TTL used when an operation does not pass one.
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl
    }

    /// Whether a background sweep task is attached.
    pub fn is_sweeping(&self) -> bool {
        self.sweeper.is_some()
    }

    /// The underlying store.
    pub fn store(&self) -> &TtlStore<K, V> {
        &self.store
    }

    /// Periodically purge expired entries until the backend is dropped.
    ///
    /// A zero interval is ignored.
    pub fn start_sweeper(&mut self, interval: Duration) {
        if interval.is_zero() {
            warn!("Ignoring zero cache sweep interval");
            return;
        }

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime available; expired entries are only purged lazily");
            return;
        };

        let store: Weak<TtlStore<K, V>> = Arc::downgrade(&self.store);
        let handle = runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired();
                if purged > 0 {
                    debug!(purged, "Purged expired cache entries");
                }
            }
        });

        if let Some(previous) = self.sweeper.replace(handle) {
            previous.abort();
        }
    }

    fn ttl(&self, options: &CacheOptions) -> Option<Duration> {
        options.ttl.or(self.default_ttl)
    }
}

impl<K, V> Default for MemoryBackend<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for MemoryBackend<K, V>
where
    K: Eq + Hash,
{
    fn drop(&mut self) {
        if let Some(sweeper) = self.sweeper.take() {
            sweeper.abort();
        }
    }
}

impl<K, V> fmt::Debug for MemoryBackend<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryBackend")
            .field("store", &self.store)
            .field("default_ttl", &self.default_ttl)
            .field("sweeping", &self.sweeper.is_some())
            .finish()
    }
}

#[async_trait]
impl<K, V> CacheBackend<K, V> for MemoryBackend<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn add(&self, key: K, value: V, options: &CacheOptions) -> CacheResult<bool> {
        Ok(self.store.add(key, value, self.ttl(options)))
    }

    async fn get(&self, key: &K, _options: &CacheOptions) -> CacheResult<Option<V>> {
        Ok(self.store.get(key))
    }

    async fn set(&self, key: K, value: V, options: &CacheOptions) -> CacheResult<bool> {
        Ok(self.store.set(key, value, self.ttl(options)))
    }

    async fn expire(&self, key: &K, ttl: Duration) -> CacheResult<bool> {
        Ok(self.store.expire(key, ttl))
    }

    async fn exists(&self, keys: &[K]) -> CacheResult<bool> {
        Ok(self.store.exists(keys))
    }

    async fn delete(&self, key: &K) -> CacheResult<bool> {
        Ok(self.store.delete(key))
    }

    async fn flush(&self) -> CacheResult<()> {
        self.store.flush();
        Ok(())
    }

    async fn close(&self) -> CacheResult<()> {
        Ok(())
    }
}
