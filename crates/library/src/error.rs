//! Library Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Resolvers don't use these: they hand back storage errors untouched so the
//! caller can tell a missing directory from an unreadable one.

use derive_more::{Display, Error};

/// A library error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// A collection tag other than `FE` or `TS`.
    #[display("unknown collection: {_0}")]
    UnknownCollection(#[error(not(source))] String),
    /// The operation needs a path that isn't configured.
    #[display("not configured: {_0}")]
    NotConfigured(#[error(not(source))] &'static str),
    /// A storage backend operation (listing, existence check) failed.
    #[display("storage operation failed")]
    Storage,
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage)
    }
}
