//! # cachet-core
//!
//! Core crate for Cachet. Contains the backend contract traits, the
//! configuration schemas, the key/value/option types shared by every
//! backend, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Cachet crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::CacheError;
pub use result::CacheResult;
