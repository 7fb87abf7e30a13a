//! Per-operation options.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::result::CacheResult;
use crate::types::value::CacheValue;

/// Text decoding applied to byte values read from a remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Decode as UTF-8; invalid input is a serialization error.
    #[default]
    #[serde(alias = "utf-8")]
    Utf8,
    /// Decode as ISO-8859-1; every byte maps to one character.
    #[serde(alias = "iso-8859-1")]
    Latin1,
    /// Do not decode; values are returned as raw bytes.
    Raw,
}

impl Encoding {
    /// Convert raw bytes into a [`CacheValue`] according to this encoding.
    pub fn decode(self, raw: Vec<u8>) -> CacheResult<CacheValue> {
        match self {
            Self::Utf8 => Ok(CacheValue::Text(String::from_utf8(raw)?)),
            Self::Latin1 => Ok(CacheValue::Text(raw.iter().map(|&b| char::from(b)).collect())),
            Self::Raw => Ok(CacheValue::Bytes(raw)),
        }
    }
}

/// Options accepted by cache operations.
///
/// Unset fields fall back to the backend's configured defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// Time until the entry expires. Whole seconds; `0` means already expired.
    pub ttl: Option<Duration>,
    /// Decoding applied to values read from a remote store.
    pub encoding: Option<Encoding>,
}

impl CacheOptions {
    /// Options with only a TTL set.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl: Some(ttl),
            encoding: None,
        }
    }

    /// Options with only an encoding set.
    pub fn with_encoding(encoding: Encoding) -> Self {
        Self {
            ttl: None,
            encoding: Some(encoding),
        }
    }

    /// Set the TTL in whole seconds.
    pub fn ttl_secs(mut self, seconds: u64) -> Self {
        self.ttl = Some(Duration::from_secs(seconds));
        self
    }

    /// Set the encoding.
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }
}
