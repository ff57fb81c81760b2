//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use thiserror::Error;

/// Custom error type for record store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading or writing the collection file
    #[error("Store I/O error: {0}")]
    Io(#[source] std::io::Error),

    /// Error occurred while encoding the collection
    #[error("Store encoding error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A record with the same key already exists
    #[error("Duplicate record for key: {0}")]
    DuplicateKey(String),

    /// No record exists for the given key
    #[error("No record for key: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Store configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
