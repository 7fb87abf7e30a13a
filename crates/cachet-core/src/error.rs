//! Unified error types for Cachet.
//!
//! Backends, the registry and the configuration loader all map their
//! internal failures into [`CacheError`] for propagation through `?`.

use std::fmt;
use thiserror::Error;

/// Error kind categorization used across every Cachet crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// A cache with the same name is already registered.
    DuplicateName,
    /// No cache is registered under the requested name.
    UnknownName,
    /// The in-process store failed to complete a write.
    Storage,
    /// The remote store could not be reached or returned a failure.
    Connection,
    /// The remote connection pool was closed; no reconnection is attempted.
    PoolClosed,
    /// A value could not be encoded or decoded.
    Serialization,
    /// A configuration error occurred.
    Configuration,
    /// The requested backend or operation is not available in this build.
    NotImplemented,
    /// An internal error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName => write!(f, "DUPLICATE_NAME"),
            Self::UnknownName => write!(f, "UNKNOWN_NAME"),
            Self::Storage => write!(f, "STORAGE"),
            Self::Connection => write!(f, "CONNECTION"),
            Self::PoolClosed => write!(f, "POOL_CLOSED"),
            Self::Serialization => write!(f, "SERIALIZATION"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::NotImplemented => write!(f, "NOT_IMPLEMENTED"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified cache error.
///
/// Registry errors are recoverable by the caller; connection errors are
/// propagated untouched with the client error kept as `source`.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct CacheError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CacheError {
    /// Create a new cache error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new cache error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a duplicate-name error.
    pub fn duplicate_name(name: &str) -> Self {
        Self::new(
            ErrorKind::DuplicateName,
            format!("Cache '{name}' is already registered"),
        )
    }

    /// Create an unknown-name error.
    pub fn unknown_name(name: &str) -> Self {
        Self::new(
            ErrorKind::UnknownName,
            format!("Cache '{name}' is not registered"),
        )
    }

    /// Create a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Storage, message)
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Connection, message)
    }

    /// Create a pool-closed error.
    pub fn pool_closed() -> Self {
        Self::new(ErrorKind::PoolClosed, "Connection pool is closed")
    }

    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create a not-implemented error.
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotImplemented, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Whether the error was caused by a closed connection pool.
    pub fn is_pool_closed(&self) -> bool {
        self.kind == ErrorKind::PoolClosed
    }
}

impl Clone for CacheError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::string::FromUtf8Error> for CacheError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("Value is not valid UTF-8: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for CacheError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
