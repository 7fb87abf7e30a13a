//! # cachet-cache
//!
//! Cache backend implementations for Cachet:
//!
//! - **memory**: in-process TTL store with lazy expiry
//! - **redis**: Redis-backed cache using the [redis](https://crates.io/crates/redis) crate
//!
//! Backends are built from configuration and registered by name in a
//! [`CacheRegistry`]. [`close_caches`] closes them all at shutdown.

#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;
pub mod registry;
pub mod remote;

pub use provider::build_backend;
pub use registry::{CacheRegistry, close_caches};
pub use remote::RemoteBackend;
