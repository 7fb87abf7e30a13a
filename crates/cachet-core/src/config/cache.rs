//! Cache backend configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::Encoding;

/// Configuration of one named cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Name the cache is registered under.
    #[serde(default = "default_name")]
    pub name: String,
    /// Cache provider type: `"memory"` or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// In-memory backend configuration.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
    /// Redis backend configuration.
    #[serde(default)]
    pub redis: RedisCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            provider: default_provider(),
            memory: MemoryCacheConfig::default(),
            redis: RedisCacheConfig::default(),
        }
    }
}

/// In-memory cache backend configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// TTL applied when an operation does not pass one. Unset or `0` means no expiry.
    #[serde(default)]
    pub default_ttl_seconds: Option<u64>,
    /// Interval of the background sweep of expired entries. Unset disables it.
    #[serde(default)]
    pub sweep_interval_seconds: Option<u64>,
}

/// Redis cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisCacheConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Connection pool size hint. The multiplexed connection manager ignores it.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
    /// Decoding applied to values read back.
    #[serde(default)]
    pub encoding: Encoding,
    /// TTL applied when an operation does not pass one. `0` means no expiry.
    #[serde(default = "default_redis_ttl")]
    pub default_ttl_seconds: Option<u64>,
}

impl RedisCacheConfig {
    /// The default TTL, with `0` read as "never expire".
    pub fn default_ttl(&self) -> Option<Duration> {
        self.default_ttl_seconds
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
    }
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            pool_size: default_pool_size(),
            encoding: Encoding::default(),
            default_ttl_seconds: default_redis_ttl(),
        }
    }
}

fn default_name() -> String {
    "default".to_string()
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_pool_size() -> u32 {
    5
}

fn default_redis_ttl() -> Option<u64> {
    Some(600)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_default_ttl() {
        let mut config = RedisCacheConfig::default();
        assert_eq!(config.default_ttl(), Some(Duration::from_secs(600)));

        config.default_ttl_seconds = Some(0);
        assert_eq!(config.default_ttl(), None);

        config.default_ttl_seconds = None;
        assert_eq!(config.default_ttl(), None);
    }
}
