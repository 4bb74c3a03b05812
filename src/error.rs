use crate::{convert::ConversionError, crypto::error::CryptoError};
use std::fmt;

/// Hard failures of the encoding/signing pipeline.
///
/// Validation problems are reported through
/// [`ValidationError`](crate::encode::ValidationError) lists instead and never
/// surface here.
#[derive(Debug, Clone, PartialEq)]
pub enum SignerError {
    /// Malformed input hit a codec (bad base58 alphabet, missing base64 marker).
    Conversion(ConversionError),
    /// A protocol constraint was violated.
    Constraint(ConstraintError),
    /// An operation needed configuration that was never provided.
    Configuration(String),
    CryptoFailed(CryptoError),
    /// A schema entry had no value to read while assembling bytes.
    MissingField(String),
    /// A schema entry resolved to a value of the wrong shape.
    InvalidData(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintError {
    /// A schema must declare at least one entry.
    EmptySchema,
    /// No schema registered for the requested type/name.
    UnknownTransaction(String),
    /// An entry list crossed the protocol byte ceiling.
    DataTooLarge { size: usize, limit: usize },
}

impl fmt::Display for SignerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SignerError::Conversion(e) => write!(f, "conversion failed: {}", e),
            SignerError::Constraint(e) => write!(f, "protocol constraint: {}", e),
            SignerError::Configuration(msg) => write!(f, "configuration error: {}", msg),
            SignerError::CryptoFailed(e) => write!(f, "crypto failed: {:?}", e),
            SignerError::MissingField(name) => write!(f, "field '{}' is required", name),
            SignerError::InvalidData(msg) => write!(f, "invalid data: {}", msg),
        }
    }
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConstraintError::EmptySchema => {
                write!(f, "cannot build a transaction schema without fields")
            }
            ConstraintError::UnknownTransaction(what) => {
                write!(f, "unknown transaction {}", what)
            }
            ConstraintError::DataTooLarge { size, limit } => {
                write!(f, "entries take {} bytes, the limit is {}", size, limit)
            }
        }
    }
}

impl std::error::Error for SignerError {}

impl From<ConversionError> for SignerError {
    fn from(err: ConversionError) -> Self {
        SignerError::Conversion(err)
    }
}

impl From<ConstraintError> for SignerError {
    fn from(err: ConstraintError) -> Self {
        SignerError::Constraint(err)
    }
}

impl From<CryptoError> for SignerError {
    fn from(err: CryptoError) -> Self {
        SignerError::CryptoFailed(err)
    }
}
