use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that two operands do not have the same dimension.
    #[error("Dimension mismatch: {0} != {1}")]
    DimensionMismatch(usize, usize),

    /// Indicates an invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
