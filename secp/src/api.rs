//! Byte-level operations.
//!
//! Every function takes raw byte buffers, parses them into the typed API,
//! and returns the encoded result. Failures are reported through
//! [`Error`]; no output exists for a failed call. Verification returns a
//! plain `bool` and treats malformed input as an invalid signature.
//!
//! Public keys are returned uncompressed (65 bytes), except for
//! [`pubkey_negate`], which keeps the encoding of its input.

use curve::ScalarField;
use tracing::trace;
use zeroize::Zeroize;

use crate::constants::{
    COMPACT_SIGNATURE_SIZE, PUBLIC_KEY_COMPRESSED_SIZE, PUBLIC_KEY_UNCOMPRESSED_SIZE,
    SECRET_KEY_SIZE,
};
use crate::context::Context;
use crate::ecdsa::Message;
use crate::errors::Error;
use crate::keys::{PublicKey, SecretKey, Tweak};
use crate::signature::{RecoverableSignature, RecoveryId, Signature};

// Run `f` and record a failure by operation name and error kind only.
fn traced<T>(op: &'static str, f: impl FnOnce() -> Result<T, Error>) -> Result<T, Error> {
    let result = f();
    if let Err(err) = &result {
        trace!(op, error = %err, "operation failed");
    }
    result
}

/// Build a context, randomized when `seed` is given.
pub fn context_create(seed: Option<&[u8; 32]>) -> Context {
    match seed {
        Some(seed) => Context::with_seed(seed),
        None => Context::new(),
    }
}

/// Re-seed the blinding state of `ctx`.
pub fn context_randomize(ctx: &mut Context, seed: Option<&[u8; 32]>) {
    ctx.randomize(seed);
}

/// Whether `seckey` is a valid secret key.
pub fn seckey_verify(_ctx: &Context, seckey: &[u8]) -> bool {
    SecretKey::from_slice(seckey).is_ok()
}

/// Uncompressed public key of `seckey`.
pub fn pubkey_create(ctx: &Context, seckey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_create", || {
        let key = SecretKey::from_slice(seckey)?;
        Ok(key.public_key(ctx).serialize_uncompressed().to_vec())
    })
}

/// Parse a 33- or 65-byte public key and return it uncompressed.
pub fn pubkey_parse(_ctx: &Context, pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_parse", || {
        let key = PublicKey::from_slice(pubkey)?;
        Ok(key.serialize_uncompressed().to_vec())
    })
}

/// Compressed encoding of a 33- or 65-byte public key.
pub fn pubkey_compress(_ctx: &Context, pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_compress", || {
        let key = PublicKey::from_slice(pubkey)?;
        Ok(key.serialize_compressed().to_vec())
    })
}

/// DER signature of `msg32` with `seckey`.
pub fn ecdsa_sign(ctx: &Context, msg32: &[u8], seckey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("ecdsa_sign", || {
        let msg = Message::from_slice(msg32)?;
        let key = SecretKey::from_slice(seckey)?;
        Ok(key.sign(ctx, &msg)?.to_der())
    })
}

/// 64-byte compact signature of `msg32` with `seckey`.
pub fn ecdsa_sign_compact(ctx: &Context, msg32: &[u8], seckey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("ecdsa_sign_compact", || {
        let msg = Message::from_slice(msg32)?;
        let key = SecretKey::from_slice(seckey)?;
        Ok(key.sign(ctx, &msg)?.to_compact().to_vec())
    })
}

/// 64-byte compact signature followed by the recovery id byte.
pub fn ecdsa_sign_recoverable(
    ctx: &Context,
    msg32: &[u8],
    seckey: &[u8],
) -> Result<Vec<u8>, Error> {
    traced("ecdsa_sign_recoverable", || {
        let msg = Message::from_slice(msg32)?;
        let key = SecretKey::from_slice(seckey)?;
        Ok(key.sign_recoverable(ctx, &msg)?.to_bytes().to_vec())
    })
}

/// Verify a compact (64 bytes) or DER (any other length) signature.
pub fn ecdsa_verify(ctx: &Context, msg32: &[u8], sig: &[u8], pubkey: &[u8]) -> bool {
    let parsed = traced("ecdsa_verify", || {
        let msg = Message::from_slice(msg32)?;
        let sig = if sig.len() == COMPACT_SIGNATURE_SIZE {
            Signature::from_compact(sig)?
        } else {
            Signature::from_der(sig)?
        };
        let key = PublicKey::from_slice(pubkey)?;
        Ok((msg, sig, key))
    });

    match parsed {
        Ok((msg, sig, key)) => key.verify(ctx, &msg, &sig),
        Err(_) => false,
    }
}

/// Recover the uncompressed public key from a compact signature and id.
pub fn ecdsa_recover(
    ctx: &Context,
    sig64: &[u8],
    msg32: &[u8],
    recid: u8,
) -> Result<Vec<u8>, Error> {
    traced("ecdsa_recover", || {
        let msg = Message::from_slice(msg32)?;
        let sig = RecoverableSignature::from_compact(sig64, RecoveryId::from_u8(recid)?)?;
        Ok(PublicKey::recover(ctx, &msg, &sig)?
            .serialize_uncompressed()
            .to_vec())
    })
}

/// `(n - seckey) mod n`. Zero is accepted and maps to zero; values not
/// below n are rejected.
pub fn privkey_negate(_ctx: &Context, seckey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("privkey_negate", || {
        let bytes: [u8; SECRET_KEY_SIZE] =
            seckey.try_into().map_err(|_| Error::InvalidLength {
                expected: SECRET_KEY_SIZE,
                actual: seckey.len(),
            })?;
        let mut scalar = Option::<ScalarField>::from(ScalarField::from_bytes(&bytes))
            .ok_or(Error::InvalidSecretKey)?;
        let negated = (-scalar).to_bytes().to_vec();
        scalar.zeroize();
        Ok(negated)
    })
}

/// `seckey + tweak mod n`.
pub fn privkey_tweak_add(_ctx: &Context, seckey: &[u8], tweak: &[u8]) -> Result<Vec<u8>, Error> {
    traced("privkey_tweak_add", || {
        let key = SecretKey::from_slice(seckey)?;
        let tweak = Tweak::from_slice(tweak)?;
        Ok(key.tweak_add(&tweak)?.to_bytes().to_vec())
    })
}

/// `seckey * tweak mod n`.
pub fn privkey_tweak_mul(_ctx: &Context, seckey: &[u8], tweak: &[u8]) -> Result<Vec<u8>, Error> {
    traced("privkey_tweak_mul", || {
        let key = SecretKey::from_slice(seckey)?;
        let tweak = Tweak::from_slice(tweak)?;
        Ok(key.tweak_mul(&tweak)?.to_bytes().to_vec())
    })
}

/// Negated public key, encoded like the input.
pub fn pubkey_negate(_ctx: &Context, pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_negate", || {
        let negated = PublicKey::from_slice(pubkey)?.negate();
        Ok(match pubkey.len() {
            PUBLIC_KEY_COMPRESSED_SIZE => negated.serialize_compressed().to_vec(),
            PUBLIC_KEY_UNCOMPRESSED_SIZE => negated.serialize_uncompressed().to_vec(),
            _ => return Err(Error::InvalidPublicKey),
        })
    })
}

/// `pubkey + tweak * G`, uncompressed.
pub fn pubkey_tweak_add(ctx: &Context, pubkey: &[u8], tweak: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_tweak_add", || {
        let key = PublicKey::from_slice(pubkey)?;
        let tweak = Tweak::from_slice(tweak)?;
        Ok(key.tweak_add(ctx, &tweak)?.serialize_uncompressed().to_vec())
    })
}

/// `tweak * pubkey`, uncompressed.
pub fn pubkey_tweak_mul(ctx: &Context, pubkey: &[u8], tweak: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_tweak_mul", || {
        let key = PublicKey::from_slice(pubkey)?;
        let tweak = Tweak::from_slice(tweak)?;
        Ok(key.tweak_mul(ctx, &tweak)?.serialize_uncompressed().to_vec())
    })
}

/// `pubkey1 + pubkey2`, uncompressed.
pub fn pubkey_add(_ctx: &Context, pubkey1: &[u8], pubkey2: &[u8]) -> Result<Vec<u8>, Error> {
    traced("pubkey_add", || {
        let a = PublicKey::from_slice(pubkey1)?;
        let b = PublicKey::from_slice(pubkey2)?;
        Ok(a.add(&b)?.serialize_uncompressed().to_vec())
    })
}

/// Sum of at least two public keys, uncompressed.
pub fn pubkey_combine(_ctx: &Context, pubkeys: &[&[u8]]) -> Result<Vec<u8>, Error> {
    traced("pubkey_combine", || {
        if pubkeys.len() < 2 {
            return Err(Error::TooFewKeys);
        }
        let keys = pubkeys
            .iter()
            .map(|bytes| PublicKey::from_slice(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PublicKey::combine(&keys)?.serialize_uncompressed().to_vec())
    })
}

/// 32-byte SHA-256 ECDH secret.
pub fn ecdh(ctx: &Context, seckey: &[u8], pubkey: &[u8]) -> Result<Vec<u8>, Error> {
    traced("ecdh", || {
        let key = SecretKey::from_slice(seckey)?;
        let public_key = PublicKey::from_slice(pubkey)?;
        Ok(key.ecdh(ctx, &public_key)?.to_vec())
    })
}

/// Low-S form of a compact signature.
pub fn signature_normalize(_ctx: &Context, sig64: &[u8]) -> Result<Vec<u8>, Error> {
    traced("signature_normalize", || {
        let sig = Signature::from_compact(sig64)?;
        Ok(sig.normalize_s().to_compact().to_vec())
    })
}

/// Convert a DER signature to compact form.
pub fn signature_der_to_compact(_ctx: &Context, der: &[u8]) -> Result<Vec<u8>, Error> {
    traced("signature_der_to_compact", || {
        Ok(Signature::from_der(der)?.to_compact().to_vec())
    })
}

/// Convert a compact signature to DER form.
pub fn signature_compact_to_der(_ctx: &Context, sig64: &[u8]) -> Result<Vec<u8>, Error> {
    traced("signature_compact_to_der", || {
        Ok(Signature::from_compact(sig64)?.to_der())
    })
}
