//! Sizes of the byte encodings handled by this crate.

/// Size of a serialized secret key in bytes.
pub const SECRET_KEY_SIZE: usize = 32;

/// Size of a message hash in bytes.
///
/// The message is an already-hashed value; it is never hashed again.
pub const MESSAGE_SIZE: usize = 32;

/// Size of a serialized tweak in bytes.
pub const TWEAK_SIZE: usize = 32;

/// Size of a compressed public key: a parity prefix and the x-coordinate.
pub const PUBLIC_KEY_COMPRESSED_SIZE: usize = 33;

/// Size of an uncompressed public key: the 0x04 prefix and both coordinates.
pub const PUBLIC_KEY_UNCOMPRESSED_SIZE: usize = 65;

/// Size of a compact signature: r followed by s.
pub const COMPACT_SIGNATURE_SIZE: usize = 64;

/// Size of a compact signature followed by its recovery id.
pub const RECOVERABLE_SIGNATURE_SIZE: usize = 65;

/// Largest possible DER signature.
///
/// A SEQUENCE header (2 bytes) and two INTEGERs of at most 35 bytes each
/// (tag, length, a zero pad and 32 value bytes).
pub const MAX_DER_SIGNATURE_SIZE: usize = 72;

/// Size of an ECDH shared secret.
pub const SHARED_SECRET_SIZE: usize = 32;

/// Upper bound on nonce candidates drawn while signing.
///
/// Each rejection has probability below 2^-127, so this is never reached
/// with a working hash.
pub(crate) const MAX_NONCE_ATTEMPTS: usize = 64;

/// p - n as 32 big-endian bytes.
///
/// A recovered R.x of r + n is only a field element when r < p - n.
pub(crate) const FIELD_MINUS_ORDER: [u8; 32] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x45, 0x51, 0x23, 0x19, 0x50, 0xb7, 0x5f, 0xc4, 0x40, 0x2d, 0xa1, 0x72, 0x2f, 0xc9, 0xba, 0xee,
];
