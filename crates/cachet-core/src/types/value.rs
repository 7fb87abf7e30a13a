//! Cache values.

use std::fmt;

/// A value stored in a cache.
///
/// The remote store only keeps bytes: on write every variant is encoded to
/// its textual/byte form, and on read the bytes come back either as
/// [`CacheValue::Text`] or [`CacheValue::Bytes`] depending on the
/// configured [`Encoding`](super::Encoding). The in-memory backend keeps
/// the variant as written.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheValue {
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// Signed integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
}

impl CacheValue {
    /// Bytes written to a remote store for this value.
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Text(text) => text.as_bytes().to_vec(),
            Self::Bytes(bytes) => bytes.clone(),
            Self::Int(n) => n.to_string().into_bytes(),
            Self::Float(n) => n.to_string().into_bytes(),
        }
    }

    /// Text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Byte content, if this is a bytes value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for CacheValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for CacheValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CacheValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&[u8]> for CacheValue {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<u8>> for CacheValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i32> for CacheValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for CacheValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for CacheValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bytes() {
        assert_eq!(CacheValue::from(1).to_bytes(), b"1");
        assert_eq!(CacheValue::from(1.5).to_bytes(), b"1.5");
        assert_eq!(CacheValue::from("text").to_bytes(), b"text");
        assert_eq!(CacheValue::from(&b"raw"[..]).to_bytes(), b"raw");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(CacheValue::from("a").as_text(), Some("a"));
        assert_eq!(CacheValue::from(3).as_text(), None);
        assert_eq!(CacheValue::from(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }
}
