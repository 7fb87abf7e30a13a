//! Shutdown behaviour of the registry: every backend is closed, and
//! clearing the registry leaves backends open.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use cachet_cache::{CacheRegistry, close_caches};
use cachet_core::error::{CacheError, ErrorKind};
use cachet_core::result::CacheResult;
use cachet_core::traits::CacheBackend;
use cachet_core::types::{CacheKey, CacheOptions, CacheValue};

/// Backend that only records whether it has been closed.
#[derive(Debug, Default)]
struct TrackedBackend {
    closed: AtomicBool,
    fail_close: Option<&'static str>,
}

impl TrackedBackend {
    fn failing(reason: &'static str) -> Self {
        Self {
            fail_close: Some(reason),
            ..Self::default()
        }
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheBackend for TrackedBackend {
    async fn add(&self, _key: CacheKey, _value: CacheValue, _options: &CacheOptions) -> CacheResult<bool> {
        Ok(false)
    }

    async fn get(&self, _key: &CacheKey, _options: &CacheOptions) -> CacheResult<Option<CacheValue>> {
        Ok(None)
    }

    async fn set(&self, _key: CacheKey, _value: CacheValue, _options: &CacheOptions) -> CacheResult<bool> {
        Ok(true)
    }

    async fn expire(&self, _key: &CacheKey, _ttl: Duration) -> CacheResult<bool> {
        Ok(false)
    }

    async fn exists(&self, _keys: &[CacheKey]) -> CacheResult<bool> {
        Ok(false)
    }

    async fn delete(&self, _key: &CacheKey) -> CacheResult<bool> {
        Ok(false)
    }

    async fn flush(&self) -> CacheResult<()> {
        Ok(())
    }

    async fn close(&self) -> CacheResult<()> {
        self.closed.store(true, Ordering::SeqCst);
        if let Some(reason) = self.fail_close {
            return Err(CacheError::connection(reason));
        }
        Ok(())
    }
}

#[tokio::test]
async fn test_close_caches_closes_every_backend() {
    let registry = CacheRegistry::new();
    let first = Arc::new(TrackedBackend::default());
    let second = Arc::new(TrackedBackend::default());
    registry.set("first", first.clone()).await.unwrap();
    registry.set("second", second.clone()).await.unwrap();

    close_caches(&registry).await.unwrap();

    assert!(first.is_closed());
    assert!(second.is_closed());
    assert_eq!(registry.len().await, 2);
}

#[tokio::test]
async fn test_close_caches_continues_after_failure() {
    let registry = CacheRegistry::new();
    let broken = Arc::new(TrackedBackend::failing("connection reset while closing"));
    let second = Arc::new(TrackedBackend::default());
    let third = Arc::new(TrackedBackend::default());
    registry.set("broken", broken.clone()).await.unwrap();
    registry.set("second", second.clone()).await.unwrap();
    registry.set("third", third.clone()).await.unwrap();

    let err = close_caches(&registry).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Connection);
    assert!(err.message.contains("connection reset"));

    assert!(broken.is_closed());
    assert!(second.is_closed());
    assert!(third.is_closed());
}

#[tokio::test]
async fn test_close_caches_returns_first_error() {
    let registry = CacheRegistry::new();
    registry.set("ok", Arc::new(TrackedBackend::default())).await.unwrap();
    registry.set("first", Arc::new(TrackedBackend::failing("first failure"))).await.unwrap();
    registry.set("second", Arc::new(TrackedBackend::failing("second failure"))).await.unwrap();

    let err = close_caches(&registry).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Connection);
    assert_eq!(err.message, "first failure");
}

#[tokio::test]
async fn test_flush_registry_does_not_close_backends() {
    let registry = CacheRegistry::new();
    let backend = Arc::new(TrackedBackend::default());
    registry.set("default", backend.clone()).await.unwrap();

    registry.flush().await;

    assert!(registry.is_empty().await);
    assert!(!backend.is_closed());
    assert!(backend.set(CacheKey::from("k"), CacheValue::from("v"), &CacheOptions::default()).await.unwrap());
}
