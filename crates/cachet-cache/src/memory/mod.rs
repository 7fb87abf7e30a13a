//! In-process cache backend.

pub mod backend;
pub mod ttl_store;

pub use backend::MemoryBackend;
pub use ttl_store::TtlStore;
