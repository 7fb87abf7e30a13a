//! The contract every cache backend implements.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::CacheResult;
use crate::types::{CacheKey, CacheOptions, CacheValue};

/// Trait for cache backends (in-memory, Redis, ...).
///
/// Generic over the key and value types; the defaults are the types the
/// registry stores, so `dyn CacheBackend` is the registry's backend type.
/// Every method is required: a backend that leaves one out does not
/// compile.
#[async_trait]
pub trait CacheBackend<K = CacheKey, V = CacheValue>: Send + Sync + fmt::Debug + 'static
where
    K: Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    /// Store a value only if the key is absent (expired entries count as absent).
    /// Returns `true` if the value was written.
    async fn add(&self, key: K, value: V, options: &CacheOptions) -> CacheResult<bool>;

    /// Get a value by key. Returns `None` if the key does not exist or has expired.
    async fn get(&self, key: &K, options: &CacheOptions) -> CacheResult<Option<V>>;

    /// Get a value by key, falling back to `default` when it is missing.
    async fn get_or(&self, key: &K, default: V, options: &CacheOptions) -> CacheResult<V> {
        Ok(self.get(key, options).await?.unwrap_or(default))
    }

    /// Store a value unconditionally. Returns `true` on success.
    async fn set(&self, key: K, value: V, options: &CacheOptions) -> CacheResult<bool>;

    /// Set the TTL on an existing key. Returns `false` if the key is absent.
    async fn expire(&self, key: &K, ttl: Duration) -> CacheResult<bool>;

    /// Returns `true` if **any** of the keys resolves to a live value.
    async fn exists(&self, keys: &[K]) -> CacheResult<bool>;

    /// Delete a key. Returns `false` if the key was absent.
    async fn delete(&self, key: &K) -> CacheResult<bool>;

    /// Remove every entry this backend manages.
    async fn flush(&self) -> CacheResult<()>;

    /// Release held resources (connections, pools).
    async fn close(&self) -> CacheResult<()>;
}

/// Typed JSON helpers for backends keyed by [`CacheKey`] holding [`CacheValue`].
#[async_trait]
pub trait JsonCacheExt: CacheBackend {
    /// Get a typed value by deserializing from JSON.
    async fn get_json<T: serde::de::DeserializeOwned + Send>(
        &self,
        key: &CacheKey,
    ) -> CacheResult<Option<T>> {
        let parsed = match self.get(key, &CacheOptions::default()).await? {
            Some(CacheValue::Text(text)) => serde_json::from_str(&text)?,
            Some(CacheValue::Bytes(bytes)) => serde_json::from_slice(&bytes)?,
            Some(other) => serde_json::from_str(&other.to_string())?,
            None => return Ok(None),
        };
        Ok(Some(parsed))
    }

    /// Set a typed value by serializing to JSON.
    async fn set_json<T: serde::Serialize + Send + Sync>(
        &self,
        key: CacheKey,
        value: &T,
        options: &CacheOptions,
    ) -> CacheResult<bool> {
        let json = serde_json::to_string(value)?;
        self.set(key, CacheValue::Text(json), options).await
    }
}

impl<B: CacheBackend + ?Sized> JsonCacheExt for B {}
