//! Key, value and option types shared by every cache backend.

pub mod key;
pub mod options;
pub mod value;

pub use key::CacheKey;
pub use options::{CacheOptions, Encoding};
pub use value::CacheValue;
