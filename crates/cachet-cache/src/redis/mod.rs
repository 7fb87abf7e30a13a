//! Redis cache backend.

pub mod client;

pub use client::RedisClient;

use cachet_core::config::cache::RedisCacheConfig;
use cachet_core::result::CacheResult;

use crate::remote::RemoteBackend;

/// Remote backend speaking to Redis.
pub type RedisBackend = RemoteBackend<RedisClient>;

impl RemoteBackend<RedisClient> {
    /// Create a Redis backend from configuration. No connection is made until first use.
    pub fn from_config(config: &RedisCacheConfig) -> CacheResult<Self> {
        let client = RedisClient::from_config(config)?;
        let mut backend = RemoteBackend::new(client).with_encoding(config.encoding);
        if let Some(ttl) = config.default_ttl() {
            backend = backend.with_default_ttl(ttl);
        }
        Ok(backend)
    }
}
