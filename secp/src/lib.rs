//! ECDSA, public key recovery, ECDH and key tweaking over secp256k1.
//!
//! This library builds on the `curve` crate and provides:
//! - A [`Context`] holding the generator table and blinding state
//! - Secret keys, public keys and tweaks with SEC1 encodings
//! - Deterministic ECDSA (RFC 6979) with low-S signatures
//! - Compact, DER and recoverable signature encodings
//! - Public key recovery and ECDH
//! - A byte-level [`api`] mirroring the usual secp256k1 entry points
//!
//! # Example
//!
//! ```
//! use secp::{Context, Message, PublicKey, SecretKey};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let ctx = Context::with_seed(&[0x2a; 32]);
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! // Generate a key pair
//! let secret_key = SecretKey::random(&mut rng);
//! let public_key = secret_key.public_key(&ctx);
//!
//! // Sign a 32-byte message hash
//! let msg = Message::from_bytes([0x11; 32]);
//! let signature = secret_key.sign(&ctx, &msg).expect("signing failed");
//! assert!(signature.is_low_s());
//!
//! // Verify it
//! assert!(public_key.verify(&ctx, &msg, &signature));
//!
//! // Public keys round-trip through their encodings
//! let parsed = PublicKey::from_slice(&public_key.serialize_compressed()).expect("valid key");
//! assert_eq!(parsed, public_key);
//! ```
//!
//! # Security Considerations
//!
//! - Operations on secret keys, nonces and tweaks run in constant time
//! - Randomize the context with fresh entropy to blind generator multiplication
//! - Messages are 32-byte hashes; this crate does not hash them again
//! - Verification rejects high-S signatures

pub mod api;
mod constants;
mod context;
mod der;
mod ecdh;
mod ecdsa;
mod errors;
mod keys;
mod nonce;
mod recovery;
mod signature;


pub use constants::{
    COMPACT_SIGNATURE_SIZE, MAX_DER_SIGNATURE_SIZE, MESSAGE_SIZE, PUBLIC_KEY_COMPRESSED_SIZE,
    PUBLIC_KEY_UNCOMPRESSED_SIZE, RECOVERABLE_SIGNATURE_SIZE, SECRET_KEY_SIZE, SHARED_SECRET_SIZE,
    TWEAK_SIZE,
};
pub use context::Context;
pub use ecdsa::Message;
pub use errors::Error;
pub use keys::{PublicKey, SecretKey, Tweak};
pub use signature::{RecoverableSignature, RecoveryId, Signature};
