//! Tests against a live Redis server.
//!
//! Run with `cargo test -p cachet-cache -- --ignored` and `REDIS_URL`
//! pointing at a disposable database; every test flushes it.

#![cfg(feature = "redis-backend")]

use std::time::Duration;

use cachet_cache::redis::RedisBackend;
use cachet_core::config::cache::RedisCacheConfig;
use cachet_core::traits::CacheBackend;
use cachet_core::types::{CacheKey, CacheOptions, CacheValue, Encoding};

async fn make_backend() -> RedisBackend {
    let config = RedisCacheConfig {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379/15".to_string()),
        ..RedisCacheConfig::default()
    };
    let backend = RedisBackend::from_config(&config).expect("Failed to create Redis backend");
    backend.flush().await.expect("Failed to flush Redis");
    backend
}

fn no_opts() -> CacheOptions {
    CacheOptions::default()
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_should_add_and_get_data() {
    let backend = make_backend().await;
    let key = CacheKey::from("constant");
    assert!(backend.add(key.clone(), CacheValue::from("0"), &no_opts()).await.unwrap());
    assert!(!backend.add(key.clone(), CacheValue::from("1"), &no_opts()).await.unwrap());
    assert_eq!(
        backend.get(&key, &no_opts()).await.unwrap(),
        Some(CacheValue::from("0"))
    );
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_should_add_and_get_data_without_decoding() {
    let backend = make_backend().await;
    let key = CacheKey::from("bytes");
    backend.add(key.clone(), CacheValue::from(&b"test"[..]), &no_opts()).await.unwrap();
    assert_eq!(
        backend
            .get(&key, &CacheOptions::with_encoding(Encoding::Raw))
            .await
            .unwrap(),
        Some(CacheValue::Bytes(b"test".to_vec()))
    );
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_ttl_zero_is_already_expired() {
    let backend = make_backend().await;
    let key = CacheKey::from("expired");
    assert!(backend
        .set(key.clone(), CacheValue::from("v"), &CacheOptions::with_ttl(Duration::ZERO))
        .await
        .unwrap());
    assert_eq!(backend.get(&key, &no_opts()).await.unwrap(), None);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_exists_expire_delete() {
    let backend = make_backend().await;
    let key = CacheKey::from("key1");
    backend.set(key.clone(), CacheValue::from("v"), &no_opts()).await.unwrap();

    assert!(backend.exists(&[key.clone(), CacheKey::from("key2")]).await.unwrap());
    assert!(backend.expire(&key, Duration::from_secs(10)).await.unwrap());
    assert!(backend.get(&key, &no_opts()).await.unwrap().is_some());
    assert!(backend.expire(&key, Duration::ZERO).await.unwrap());
    assert!(backend.get(&key, &no_opts()).await.unwrap().is_none());
    assert!(!backend.delete(&key).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_close_should_close_connection() {
    let backend = make_backend().await;
    backend.close().await.unwrap();
    let err = backend
        .add(CacheKey::from("constant"), CacheValue::from("0"), &no_opts())
        .await
        .unwrap_err();
    assert!(err.is_pool_closed());
}
