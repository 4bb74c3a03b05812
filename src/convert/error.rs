use std::fmt;

/// Errors raised by the low-level codecs. Always a malformed-input condition,
/// never something to retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    InvalidBase58,
    InvalidBase64,
    InvalidHex,
    InvalidLength,
    LongOverflow,
    UnsupportedValue(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConversionError::InvalidBase58 => write!(f, "malformed base58 input"),
            ConversionError::InvalidBase64 => write!(f, "malformed base64 input"),
            ConversionError::InvalidHex => write!(f, "malformed hex input"),
            ConversionError::InvalidLength => write!(f, "unexpected byte length"),
            ConversionError::LongOverflow => {
                write!(f, "value does not fit into 8 bytes")
            }
            ConversionError::UnsupportedValue(msg) => write!(f, "unsupported value: {}", msg),
        }
    }
}

impl From<bs58::decode::Error> for ConversionError {
    fn from(_: bs58::decode::Error) -> Self {
        ConversionError::InvalidBase58
    }
}

impl From<base64::DecodeError> for ConversionError {
    fn from(_: base64::DecodeError) -> Self {
        ConversionError::InvalidBase64
    }
}

impl From<hex::FromHexError> for ConversionError {
    fn from(_: hex::FromHexError) -> Self {
        ConversionError::InvalidHex
    }
}
