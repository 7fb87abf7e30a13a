//! Builds cache backends from configuration.

use std::sync::Arc;

use tracing::info;

use cachet_core::config::cache::CacheConfig;
use cachet_core::error::CacheError;
use cachet_core::result::CacheResult;
use cachet_core::traits::backend::CacheBackend;

/// Create the backend selected by `config.provider`.
///
/// No network connection is made here; remote backends connect on first use.
pub fn build_backend(config: &CacheConfig) -> CacheResult<Arc<dyn CacheBackend>> {
    let backend: Arc<dyn CacheBackend> = match config.provider.as_str() {
        #[cfg(feature = "memory")]
        "memory" => {
            info!(cache = %config.name, "Initializing in-memory cache backend");
            let backend: crate::memory::MemoryBackend =
                crate::memory::MemoryBackend::from_config(&config.memory);
            Arc::new(backend)
        }
        #[cfg(feature = "redis-backend")]
        "redis" => {
            info!(cache = %config.name, "Initializing Redis cache backend");
            Arc::new(crate::redis::RedisBackend::from_config(&config.redis)?)
        }
        #[cfg(not(feature = "memory"))]
        "memory" => {
            return Err(CacheError::not_implemented(
                "In-memory cache support is not compiled in (feature `memory`)",
            ));
        }
        #[cfg(not(feature = "redis-backend"))]
        "redis" => {
            return Err(CacheError::not_implemented(
                "Redis cache support is not compiled in (feature `redis-backend`)",
            ));
        }
        other => {
            return Err(CacheError::configuration(format!(
                "Unknown cache provider: '{other}'. Supported: memory, redis"
            )));
        }
    };

    Ok(backend)
}
