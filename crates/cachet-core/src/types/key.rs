//! Cache keys.
//!
//! Keys are stored as raw bytes. Text, integer and float keys are converted
//! to their decimal/text form, so `1` and `"1"` address the same entry in
//! every backend, which is also how the remote store sees them.

use std::borrow::Cow;
use std::fmt;

/// An owned cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey(Vec<u8>);

impl CacheKey {
    /// Build a key from raw bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Key rendered as text, replacing invalid UTF-8 sequences.
    pub fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl From<&str> for CacheKey {
    fn from(key: &str) -> Self {
        Self(key.as_bytes().to_vec())
    }
}

impl From<String> for CacheKey {
    fn from(key: String) -> Self {
        Self(key.into_bytes())
    }
}

impl From<&String> for CacheKey {
    fn from(key: &String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<&[u8]> for CacheKey {
    fn from(key: &[u8]) -> Self {
        Self(key.to_vec())
    }
}

impl From<Vec<u8>> for CacheKey {
    fn from(key: Vec<u8>) -> Self {
        Self(key)
    }
}

macro_rules! impl_key_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for CacheKey {
                fn from(key: $ty) -> Self {
                    Self(key.to_string().into_bytes())
                }
            }
        )*
    };
}

impl_key_from_number!(i32, i64, u32, u64, usize, f64);
