//! ECDSA signing and verification.

use curve::{ScalarField, double_scalar_mul_basepoint};
use subtle::ConditionallySelectable;
use tracing::trace;
use zeroize::Zeroize;

use crate::constants::{MAX_NONCE_ATTEMPTS, MESSAGE_SIZE};
use crate::context::Context;
use crate::errors::Error;
use crate::keys::{PublicKey, SecretKey};
use crate::nonce::Rfc6979;
use crate::signature::{RecoverableSignature, RecoveryId, Signature};

/// A 32-byte message hash.
///
/// The bytes are used as they are; hashing the actual message is up to the
/// caller. The value is reduced mod n when signing and verifying.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message([u8; 32]);

impl Message {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Message(bytes)
    }

    /// Fails with [`Error::InvalidMessage`] unless `bytes` is 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        let array: [u8; MESSAGE_SIZE] = bytes.try_into().map_err(|_| Error::InvalidMessage)?;
        Ok(Message(array))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub(crate) fn to_scalar(&self) -> ScalarField {
        ScalarField::from_bytes_reduced(&self.0)
    }
}

impl SecretKey {
    /// Deterministic low-S signature over `msg`.
    ///
    /// The nonce follows RFC 6979 with HMAC-SHA256, seeded with the key and
    /// the reduced message.
    ///
    /// # Example
    ///
    /// ```
    /// use secp::{Context, Message, SecretKey};
    ///
    /// let ctx = Context::new();
    /// let secret_key = SecretKey::from_bytes(&[0x01; 32]).expect("valid key");
    /// let msg = Message::from_bytes([0xab; 32]);
    ///
    /// let signature = secret_key.sign(&ctx, &msg).expect("signing failed");
    /// assert!(secret_key.public_key(&ctx).verify(&ctx, &msg, &signature));
    /// ```
    pub fn sign(&self, ctx: &Context, msg: &Message) -> Result<Signature, Error> {
        self.sign_inner(ctx, msg, None).map(|(sig, _)| sig)
    }

    /// Like [`SecretKey::sign`], with 32 bytes of extra data mixed into the
    /// nonce derivation.
    pub fn sign_with_aux(
        &self,
        ctx: &Context,
        msg: &Message,
        aux: &[u8; 32],
    ) -> Result<Signature, Error> {
        self.sign_inner(ctx, msg, Some(aux)).map(|(sig, _)| sig)
    }

    /// Signature together with the recovery id of its R point.
    pub fn sign_recoverable(
        &self,
        ctx: &Context,
        msg: &Message,
    ) -> Result<RecoverableSignature, Error> {
        let (sig, recovery_id) = self.sign_inner(ctx, msg, None)?;
        Ok(RecoverableSignature::new(sig, recovery_id))
    }

    fn sign_inner(
        &self,
        ctx: &Context,
        msg: &Message,
        aux: Option<&[u8; 32]>,
    ) -> Result<(Signature, RecoveryId), Error> {
        let z = msg.to_scalar();
        let mut key_bytes = self.to_bytes();
        let z_bytes = z.to_bytes();
        let mut drbg = match aux {
            Some(aux) => Rfc6979::new(&[&key_bytes[..], &z_bytes[..], &aux[..]]),
            None => Rfc6979::new(&[&key_bytes[..], &z_bytes[..]]),
        };
        key_bytes.zeroize();

        for attempt in 0..MAX_NONCE_ATTEMPTS {
            let mut candidate = drbg.generate();
            let parsed = ScalarField::from_bytes(&candidate);
            candidate.zeroize();

            let Some(mut k) = Option::<ScalarField>::from(parsed) else {
                trace!(attempt, "nonce candidate not below the group order");
                continue;
            };
            if bool::from(k.is_zero()) {
                trace!(attempt, "nonce candidate is zero");
                continue;
            }

            let big_r = ctx.mul_generator(&k).to_affine();
            let x_bytes = big_r.x.to_bytes();
            let r = ScalarField::from_bytes_reduced(&x_bytes);
            let x_reduced = ScalarField::from_bytes(&x_bytes).is_none();

            let mut s = k.inverse() * (z + r * *self.scalar());
            k.zeroize();

            if bool::from(r.is_zero() | s.is_zero()) {
                trace!(attempt, "nonce gives a zero signature component");
                continue;
            }

            let high = s.is_high();
            let low_s = ScalarField::conditional_select(&s, &-s, high);
            s.zeroize();

            let id = (big_r.y.is_odd().unwrap_u8() ^ high.unwrap_u8()) | (x_reduced.unwrap_u8() << 1);
            return Ok((Signature::new(r, low_s), RecoveryId::from_u8(id)?));
        }

        Err(Error::NonceExhausted)
    }
}

impl PublicKey {
    /// Check `sig` against `msg`.
    ///
    /// Computes `R' = (z / s) * G + (r / s) * Q` and accepts iff R' is not
    /// infinity and `R'.x mod n == r`. Signatures with `s > n / 2` are
    /// rejected; run them through [`Signature::normalize_s`] first.
    pub fn verify(&self, ctx: &Context, msg: &Message, sig: &Signature) -> bool {
        if !sig.is_low_s() {
            return false;
        }

        let z = msg.to_scalar();
        let s_inv = sig.s().inverse();
        let u1 = z * s_inv;
        let u2 = *sig.r() * s_inv;

        let point = double_scalar_mul_basepoint(ctx.table(), &u1, &u2, &self.point().to_jacobian());
        if bool::from(point.is_infinity()) {
            return false;
        }

        let x = point.to_affine().x.to_bytes();
        ScalarField::from_bytes_reduced(&x) == *sig.r()
    }
}
