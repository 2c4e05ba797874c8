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

    /// Indicates that two shares from different splits were combined.
    #[error("Index mismatch: share {0} cannot be combined with share {1}")]
    IndexMismatch(usize, usize),

    /// Indicates that two shares live in different fields.
    #[error("Shares are defined over different moduli")]
    ModulusMismatch,

    /// Indicates that two ciphertexts were produced under different keys.
    #[error("Ciphertexts are encrypted under different public keys")]
    KeyMismatch,

    /// Indicates that too few values were provided.
    #[error("Too few values provided: {0} is below limit {1}")]
    TooFewValues(usize, usize),

    /// Indicates that the underlying cryptosystem failed to encrypt.
    #[error("Encryption failed: {0}")]
    EncryptionError(String),

    /// Indicates an error in the sharing parameters.
    #[error("{0}")]
    ParametersError(ParametersError),
}

impl From<secvec_math::Error> for Error {
    fn from(e: secvec_math::Error) -> Self {
        match e {
            secvec_math::Error::DimensionMismatch(a, b) => Error::DimensionMismatch(a, b),
            secvec_math::Error::InvalidArgument(msg) => Error::InvalidArgument(msg),
        }
    }
}

impl From<ParametersError> for Error {
    fn from(e: ParametersError) -> Self {
        Error::ParametersError(e)
    }
}

/// Separate enum to indicate parameters-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParametersError {
    /// Indicates that the field modulus was not specified.
    #[error("The field modulus must be specified")]
    MissingModulus,

    /// Indicates that the field modulus failed the primality test.
    #[error("The field modulus {0} is not prime")]
    NotPrime(String),

    /// Indicates that the number of shares is too small.
    #[error("The number of shares {0} is invalid, it must be at least 2")]
    InvalidShareCount(usize),

    /// Indicates that the fixed-point scale factor is not positive.
    #[error("The scale factor {0} is invalid, it must be positive")]
    InvalidScale(String),

    /// Indicates that no primality rounds were requested.
    #[error("The number of primality rounds must be at least 1")]
    InvalidPrimalityRounds,
}

impl Error {
    /// Create the error raised when secret sharing over a non-prime modulus.
    pub fn not_prime(modulus: &num_bigint::BigInt) -> Self {
        Self::InvalidArgument(format!(
            "trying to secret share in a non-prime order field: {}",
            modulus
        ))
    }

    /// Create the error raised for a modulus that is not positive.
    pub fn invalid_modulus(modulus: &num_bigint::BigInt) -> Self {
        Self::InvalidArgument(format!("modulus must be positive, got {}", modulus))
    }

    /// Create the error raised when combining shares with different indices.
    pub fn index_mismatch(left: usize, right: usize) -> Self {
        Self::IndexMismatch(left, right)
    }
}
