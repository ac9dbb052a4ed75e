//! Error types for the secp256k1 operations.

use thiserror::Error;

/// Errors returned by key handling, signing, verification, recovery and ECDH.
///
/// No operation produces output bytes alongside an error: a failed call
/// yields only the error value.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The secret key is zero, not below the group order, or malformed.
    #[error("invalid secret key")]
    InvalidSecretKey,

    /// The public key encoding is malformed or the point is not on the curve.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// The signature encoding is malformed or r or s is out of range.
    #[error("invalid signature")]
    InvalidSignature,

    /// The recovery id is not in 0..=3.
    #[error("invalid recovery id")]
    InvalidRecoveryId,

    /// The tweak is not below the group order, or is zero where that is
    /// not allowed.
    #[error("invalid tweak")]
    InvalidTweak,

    /// The message hash is not 32 bytes.
    #[error("invalid message")]
    InvalidMessage,

    /// A buffer has the wrong length.
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// The result of a point operation is the point at infinity.
    #[error("result is the point at infinity")]
    PointAtInfinity,

    /// The result of a scalar operation is zero.
    #[error("result is zero")]
    ZeroScalar,

    /// The deterministic nonce generator produced no usable nonce.
    #[error("nonce generation exhausted its attempts")]
    NonceExhausted,

    /// A caller-supplied hash function reported failure.
    #[error("hash function failed")]
    HashFunctionFailed,

    /// Key combination needs more keys than were supplied.
    #[error("too few keys to combine")]
    TooFewKeys,
}
