//! Elliptic curve Diffie-Hellman.

use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::context::Context;
use crate::errors::Error;
use crate::keys::{PublicKey, SecretKey};

impl SecretKey {
    /// Shared secret with `public_key`: SHA-256 of the compressed encoding
    /// of `self * public_key`.
    ///
    /// # Example
    ///
    /// ```
    /// use secp::{Context, SecretKey};
    ///
    /// let ctx = Context::new();
    /// let alice = SecretKey::from_bytes(&[0x0a; 32]).expect("valid key");
    /// let bob = SecretKey::from_bytes(&[0x0b; 32]).expect("valid key");
    ///
    /// let shared_a = alice.ecdh(&ctx, &bob.public_key(&ctx)).expect("ecdh failed");
    /// let shared_b = bob.ecdh(&ctx, &alice.public_key(&ctx)).expect("ecdh failed");
    /// assert_eq!(shared_a, shared_b);
    /// ```
    pub fn ecdh(&self, ctx: &Context, public_key: &PublicKey) -> Result<[u8; 32], Error> {
        self.ecdh_with_hash(ctx, public_key, |x, y| {
            let version = 0x02 | (y[31] & 1);
            Some(Sha256::new().chain_update([version]).chain_update(x).finalize().into())
        })
    }

    /// Shared secret with a caller-supplied hash of the shared point's
    /// coordinates. Returning `None` from `hash` fails the call with
    /// [`Error::HashFunctionFailed`].
    pub fn ecdh_with_hash<F>(
        &self,
        ctx: &Context,
        public_key: &PublicKey,
        hash: F,
    ) -> Result<[u8; 32], Error>
    where
        F: FnOnce(&[u8; 32], &[u8; 32]) -> Option<[u8; 32]>,
    {
        let shared = ctx.mul_point(&public_key.point().to_jacobian(), self.scalar());
        if bool::from(shared.is_infinity()) {
            return Err(Error::PointAtInfinity);
        }

        let mut point = shared.to_affine();
        let mut x = point.x.to_bytes();
        let mut y = point.y.to_bytes();
        let output = hash(&x, &y);

        x.zeroize();
        y.zeroize();
        point.x.zeroize();
        point.y.zeroize();

        output.ok_or(Error::HashFunctionFailed)
    }
}
