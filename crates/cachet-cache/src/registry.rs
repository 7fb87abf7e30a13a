//! Named cache registry.
//!
//! One registry is created at startup and shared through the application
//! context (`Arc<CacheRegistry>`); there is no global instance.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use cachet_core::config::cache::CacheConfig;
use cachet_core::error::CacheError;
use cachet_core::result::CacheResult;
use cachet_core::traits::backend::CacheBackend;

use crate::provider::build_backend;

/// Registry of named cache backends, kept in registration order.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    /// Name → backend, in registration order.
    caches: RwLock<Vec<(String, Arc<dyn CacheBackend>)>>,
}

impl CacheRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured cache and register it under its name.
    pub async fn from_config(configs: &[CacheConfig]) -> CacheResult<Self> {
        let registry = Self::new();
        for config in configs {
            let backend = build_backend(config)?;
            registry.set(config.name.clone(), backend).await?;
        }
        Ok(registry)
    }

    /// Gets a backend by name.
    pub async fn get(&self, name: &str) -> Option<Arc<dyn CacheBackend>> {
        let caches = self.caches.read().await;
        caches
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, backend)| Arc::clone(backend))
    }

    /// Registers a backend. Fails if the name is already taken.
    pub async fn set(&self, name: impl Into<String>, backend: Arc<dyn CacheBackend>) -> CacheResult<()> {
        let name = name.into();
        let mut caches = self.caches.write().await;

        if caches.iter().any(|(registered, _)| *registered == name) {
            return Err(CacheError::duplicate_name(&name));
        }

        info!(cache = %name, "Registering cache");
        caches.push((name, backend));
        Ok(())
    }

    /// Unregisters a backend by name, returning it. The backend is not closed.
    pub async fn remove(&self, name: &str) -> CacheResult<Arc<dyn CacheBackend>> {
        let mut caches = self.caches.write().await;
        let position = caches
            .iter()
            .position(|(registered, _)| registered == name)
            .ok_or_else(|| CacheError::unknown_name(name))?;

        let (_, backend) = caches.remove(position);
        info!(cache = %name, "Cache unregistered");
        Ok(backend)
    }

    /// All registered backends, in registration order.
    pub async fn all(&self) -> Vec<Arc<dyn CacheBackend>> {
        let caches = self.caches.read().await;
        caches.iter().map(|(_, backend)| Arc::clone(backend)).collect()
    }

    /// All registrations as `(name, backend)` pairs, in registration order.
    pub async fn entries(&self) -> Vec<(String, Arc<dyn CacheBackend>)> {
        self.caches.read().await.clone()
    }

    /// Registered names, in registration order.
    pub async fn names(&self) -> Vec<String> {
        let caches = self.caches.read().await;
        caches.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Checks whether a name is registered.
    pub async fn contains(&self, name: &str) -> bool {
        let caches = self.caches.read().await;
        caches.iter().any(|(registered, _)| registered == name)
    }

    /// Returns the number of registrations.
    pub async fn len(&self) -> usize {
        self.caches.read().await.len()
    }

    /// Whether nothing is registered.
    pub async fn is_empty(&self) -> bool {
        self.caches.read().await.is_empty()
    }

    /// Drops every registration. Backends are not closed.
    pub async fn flush(&self) {
        self.caches.write().await.clear();
    }
}

/// Close every registered cache. Intended to run once at shutdown.
///
/// Every backend is closed even if an earlier one fails; the first
/// failure is returned.
pub async fn close_caches(registry: &CacheRegistry) -> CacheResult<()> {
    let mut first_error = None;

    for (name, cache) in registry.entries().await {
        match cache.close().await {
            Ok(()) => info!(cache = %name, "Cache closed"),
            Err(e) => {
                warn!(cache = %name, error = %e, "Failed to close cache");
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use super::*;
    use cachet_core::error::ErrorKind;

    use crate::memory::MemoryBackend;

    fn memory() -> Arc<dyn CacheBackend> {
        let backend: MemoryBackend = MemoryBackend::new();
        Arc::new(backend)
    }

    #[tokio::test]
    async fn test_get_unregistered_returns_none() {
        let registry = CacheRegistry::new();
        assert!(registry.get("").await.is_none());
    }

    #[tokio::test]
    async fn test_get_returns_registered_instance() {
        let registry = CacheRegistry::new();
        let cache = memory();
        registry.set("REDIS", cache.clone()).await.unwrap();

        let fetched = registry.get("REDIS").await.unwrap();
        assert!(Arc::ptr_eq(&fetched, &cache));
    }

    #[tokio::test]
    async fn test_all_keeps_order_and_duplicates() {
        let registry = CacheRegistry::new();
        let cache = memory();
        let other = memory();
        registry.set("first", cache.clone()).await.unwrap();
        registry.set("second", other.clone()).await.unwrap();
        registry.set("third", cache.clone()).await.unwrap();

        let all = registry.all().await;
        assert_eq!(all.len(), 3);
        assert!(Arc::ptr_eq(&all[0], &cache));
        assert!(Arc::ptr_eq(&all[1], &other));
        assert!(Arc::ptr_eq(&all[2], &cache));
        assert_eq!(registry.names().await, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_duplicate_name_is_rejected() {
        let registry = CacheRegistry::new();
        registry.set("default", memory()).await.unwrap();

        let err = registry.set("default", memory()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateName);
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove() {
        let registry = CacheRegistry::new();
        registry.set("default", memory()).await.unwrap();
        registry.remove("default").await.unwrap();

        assert!(registry.get("default").await.is_none());
        assert!(!registry.contains("default").await);
    }

    #[tokio::test]
    async fn test_remove_unregistered_fails() {
        let registry = CacheRegistry::new();
        let err = registry.remove("default").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownName);
    }

    #[tokio::test]
    async fn test_flush_removes_all_registrations() {
        let registry = CacheRegistry::new();
        registry.set("default", memory()).await.unwrap();
        registry.set("other", memory()).await.unwrap();

        registry.flush().await;

        assert!(registry.is_empty().await);
        assert!(registry.get("default").await.is_none());
        assert!(registry.get("other").await.is_none());
    }

    #[tokio::test]
    async fn test_from_config_registers_in_order() {
        let configs = vec![
            CacheConfig {
                name: "a".to_string(),
                ..CacheConfig::default()
            },
            CacheConfig {
                name: "b".to_string(),
                ..CacheConfig::default()
            },
        ];
        let registry = CacheRegistry::from_config(&configs).await.unwrap();
        assert_eq!(registry.names().await, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_from_config_rejects_duplicate_names() {
        let configs = vec![CacheConfig::default(), CacheConfig::default()];
        let err = CacheRegistry::from_config(&configs).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateName);
    }
}
