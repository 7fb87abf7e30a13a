//! Cache backend over a remote key-value client.
//!
//! The remote store keeps bytes. This backend decodes what it reads
//! according to the configured [`Encoding`] and emulates `add` as a read
//! followed by a write.
//!
//! `add` is **not atomic**: the task suspends between the read and the
//! write, so two concurrent `add` calls for the same absent key can both
//! observe it absent and both write, the later write winning. Callers that
//! need a real add-if-absent must serialize above this backend.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use cachet_core::result::CacheResult;
use cachet_core::traits::backend::CacheBackend;
use cachet_core::traits::remote::RemoteClient;
use cachet_core::types::{CacheKey, CacheOptions, CacheValue, Encoding};

/// Cache backend delegating to a [`RemoteClient`].
pub struct RemoteBackend<C> {
    /// The network client.
    client: C,
    /// Decoding used when an operation does not pass one.
    encoding: Encoding,
    /// TTL used when an operation does not pass one.
    default_ttl: Option<Duration>,
}

impl<C: RemoteClient> RemoteBackend<C> {
    /// Wrap a client. Values are decoded as UTF-8 and never expire by default.
    pub fn new(client: C) -> Self {
        Self {
            client,
            encoding: Encoding::Utf8,
            default_ttl: None,
        }
    }

    /// Set the default decoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
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

    /// The underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    fn ttl(&self, options: &CacheOptions) -> Option<Duration> {
        options.ttl.or(self.default_ttl)
    }

    fn decode(&self, raw: Vec<u8>, options: &CacheOptions) -> CacheResult<CacheValue> {
        options.encoding.unwrap_or(self.encoding).decode(raw)
    }
}

impl<C: fmt::Debug> fmt::Debug for RemoteBackend<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("client", &self.client)
            .field("encoding", &self.encoding)
            .field("default_ttl", &self.default_ttl)
            .finish()
    }
}

#[async_trait]
impl<C: RemoteClient> CacheBackend for RemoteBackend<C> {
    async fn add(&self, key: CacheKey, value: CacheValue, options: &CacheOptions) -> CacheResult<bool> {
        // Not atomic: another writer can slip in between this read and the write.
        if self.client.get(&key).await?.is_some() {
            debug!(key = %key, "Key already present, skipping add");
            return Ok(false);
        }
        self.client.set(&key, &value, self.ttl(options)).await
    }

    async fn get(&self, key: &CacheKey, options: &CacheOptions) -> CacheResult<Option<CacheValue>> {
        match self.client.get(key).await? {
            Some(raw) => Ok(Some(self.decode(raw, options)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: CacheKey, value: CacheValue, options: &CacheOptions) -> CacheResult<bool> {
        self.client.set(&key, &value, self.ttl(options)).await
    }

    async fn expire(&self, key: &CacheKey, ttl: Duration) -> CacheResult<bool> {
        self.client.expire(key, ttl).await
    }

    async fn exists(&self, keys: &[CacheKey]) -> CacheResult<bool> {
        Ok(self.client.exists(keys).await? > 0)
    }

    async fn delete(&self, key: &CacheKey) -> CacheResult<bool> {
        self.client.delete(key).await
    }

    async fn flush(&self) -> CacheResult<()> {
        self.client.flush_all().await
    }

    async fn close(&self) -> CacheResult<()> {
        self.client.close().await
    }
}
