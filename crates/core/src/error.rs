//! Error types for the SIL catalog
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! `OutOfRange`, `NotFound` and `InvalidOperation` are caller errors and are
//! never retried inside the catalog. `CorruptState` means the rebuilt stores
//! and tables diverged from what was serialized; the catalog being built must
//! be discarded.

use std::io;
use thiserror::Error;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the SIL catalog
#[derive(Debug, Error)]
pub enum Error {
    /// Handle outside `[0, count)`
    #[error("Handle {handle} out of range (count {count})")]
    OutOfRange {
        /// Offending handle (signed so wire values below zero can be reported)
        handle: i64,
        /// Number of handles currently allocated
        count: usize,
    },

    /// Name or category lookup failed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Structurally illegal request
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Replayed state does not match the serialized state
    #[error("Corrupt state: {0}")]
    CorruptState(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration could not be parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (configuration files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Build an `OutOfRange` error from an unsigned handle
    pub fn out_of_range(handle: usize, count: usize) -> Self {
        Error::OutOfRange {
            handle: i64::try_from(handle).unwrap_or(i64::MAX),
            count,
        }
    }

    /// Whether this error means the catalog cannot be trusted at all
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::CorruptState(_))
    }
}

impl From<bincode::Error> for Error {
    fn from(e: bincode::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
