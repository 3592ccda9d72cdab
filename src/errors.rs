use thiserror::Error;

/// Crate-wide error type - single point of truth
///
/// Every parsing or validation failure is fatal to the current extraction
/// attempt and propagates immediately; no partial spec is ever returned.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Unrecognized token in a compact parameter string
    #[error("unknown param {0:?}")]
    MalformedParameter(String),

    /// Bits value matching none of the count/hex/binary/decimal/range grammar
    #[error("invalid bits value: {0:?}")]
    InvalidBitsValue(String),

    /// Unrecognized traversal order token
    #[error("invalid order: {0:?}")]
    InvalidOrder(String),

    /// Propagated from the image decoding collaborator
    #[error("image load failed: {0}")]
    ImageLoadFailure(String),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Crate-wide result type - single point of truth
pub type ExtractResult<T> = Result<T, ExtractError>;
