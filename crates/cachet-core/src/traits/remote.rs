//! Client contract for remote key-value stores.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::result::CacheResult;
use crate::types::{CacheKey, CacheValue};

/// The network client a remote backend delegates to.
///
/// Values travel as bytes; decoding is the backend's job. After
/// [`close`](RemoteClient::close) every operation must fail with
/// [`ErrorKind::PoolClosed`](crate::error::ErrorKind::PoolClosed)
/// instead of reconnecting.
#[async_trait]
pub trait RemoteClient: Send + Sync + fmt::Debug + 'static {
    /// Fetch the raw bytes stored under `key`.
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, expiring after `ttl` if given.
    async fn set(
        &self,
        key: &CacheKey,
        value: &CacheValue,
        ttl: Option<Duration>,
    ) -> CacheResult<bool>;

    /// Delete `key`. Returns whether something was removed.
    async fn delete(&self, key: &CacheKey) -> CacheResult<bool>;

    /// Count how many of `keys` exist.
    async fn exists(&self, keys: &[CacheKey]) -> CacheResult<u64>;

    /// Set the TTL of an existing key.
    async fn expire(&self, key: &CacheKey, ttl: Duration) -> CacheResult<bool>;

    /// Remove every key in the selected database.
    async fn flush_all(&self) -> CacheResult<()>;

    /// Close the connection pool.
    async fn close(&self) -> CacheResult<()>;
}
