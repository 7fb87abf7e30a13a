//! Convenience result type alias for Cachet.

use crate::error::CacheError;

/// A specialized `Result` type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
