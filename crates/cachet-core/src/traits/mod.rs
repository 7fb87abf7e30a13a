//! Core traits defined in `cachet-core` and implemented by other crates.

pub mod backend;
pub mod clock;
pub mod remote;

pub use backend::{CacheBackend, JsonCacheExt};
pub use clock::{Clock, ManualClock, SystemClock};
pub use remote::RemoteClient;
