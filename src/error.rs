//! Error types for textdistill.
//!
//! Extraction entry points deliberately do not surface errors: rejected or
//! unextractable input yields `None`. The error type below covers the one
//! place where failure is a caller mistake rather than bad input - building
//! an `Options` record from invalid values.

/// Error type for option construction and CLI-level operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An option value is not part of the accepted vocabulary.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// An input file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for fallible operations.
pub type Result<T> = std::result::Result<T, Error>;
