#[derive(Debug, Clone, Eq, PartialEq)]
pub enum CryptoError {
    InvalidKey,
    InvalidSeed,
    InvalidSignature,
    NoEntropy,
}
