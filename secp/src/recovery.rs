//! Public key recovery from a signature and its recovery id.

use curve::{Affine, BaseField, Choice, ORDER, double_scalar_mul_basepoint};

use crate::constants::FIELD_MINUS_ORDER;
use crate::context::Context;
use crate::ecdsa::Message;
use crate::errors::Error;
use crate::keys::PublicKey;
use crate::signature::RecoverableSignature;

impl PublicKey {
    /// Recover the key that produced `sig` over `msg`.
    ///
    /// R.x is r, or r + n when the recovery id says r was reduced; the
    /// latter fails when r + n is not below p. R.y is the root of the curve
    /// equation with the parity from the recovery id, and the key is
    /// `Q = r^-1 * (s * R - z * G)`.
    ///
    /// # Example
    ///
    /// ```
    /// use secp::{Context, Message, PublicKey, SecretKey};
    ///
    /// let ctx = Context::new();
    /// let secret_key = SecretKey::from_bytes(&[0x42; 32]).expect("valid key");
    /// let msg = Message::from_bytes([0x07; 32]);
    ///
    /// let sig = secret_key.sign_recoverable(&ctx, &msg).expect("signing failed");
    /// let recovered = PublicKey::recover(&ctx, &msg, &sig).expect("recovery failed");
    /// assert_eq!(recovered, secret_key.public_key(&ctx));
    /// ```
    pub fn recover(
        ctx: &Context,
        msg: &Message,
        sig: &RecoverableSignature,
    ) -> Result<PublicKey, Error> {
        let recovery_id = sig.recovery_id();
        let sig = sig.to_standard();
        let r_bytes = sig.r().to_bytes();

        let mut x = Option::<BaseField>::from(BaseField::from_bytes(&r_bytes))
            .ok_or(Error::InvalidSignature)?;
        if recovery_id.is_x_reduced() {
            // r < p - n, compared as big-endian byte strings.
            if r_bytes >= FIELD_MINUS_ORDER {
                return Err(Error::InvalidSignature);
            }
            x += order_in_field()?;
        }

        let big_r = Option::<Affine>::from(Affine::decompress(
            &x,
            Choice::from(recovery_id.is_y_odd() as u8),
        ))
        .ok_or(Error::InvalidSignature)?;

        let r_inv = sig.r().inverse();
        let u1 = -(msg.to_scalar() * r_inv);
        let u2 = *sig.s() * r_inv;

        let point = double_scalar_mul_basepoint(ctx.table(), &u1, &u2, &big_r.to_jacobian());
        PublicKey::from_jacobian(&point)
    }
}

fn order_in_field() -> Result<BaseField, Error> {
    Option::<BaseField>::from(BaseField::from_u64_limbs(ORDER)).ok_or(Error::InvalidSignature)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::{RecoveryId, Signature};
    use curve::ScalarField;

    #[test]
    fn test_field_minus_order_constant() {
        let p_minus_n = BaseField::modulus() - ScalarField::order();
        let mut expected = [0u8; 32];
        let digits = p_minus_n.to_bytes_be();
        expected[32 - digits.len()..].copy_from_slice(&digits);

        assert_eq!(FIELD_MINUS_ORDER, expected);
    }

    #[test]
    fn test_reduced_x_overflow_is_rejected() {
        let ctx = Context::new();
        let msg = Message::from_bytes([0x01; 32]);

        // r = p - n makes r + n = p, which is not a field element.
        let mut compact = [0u8; 64];
        compact[..32].copy_from_slice(&FIELD_MINUS_ORDER);
        compact[63] = 1;
        let sig = Signature::from_compact(&compact).unwrap();

        for id in [2u8, 3] {
            let recoverable = RecoverableSignature::new(sig, RecoveryId::from_u8(id).unwrap());
            assert_eq!(
                PublicKey::recover(&ctx, &msg, &recoverable),
                Err(Error::InvalidSignature)
            );
        }
    }

    #[test]
    fn test_non_residue_x_is_rejected() {
        let ctx = Context::new();
        let msg = Message::from_bytes([0x01; 32]);

        // x = 5 is not the x-coordinate of any point.
        let mut compact = [0u8; 64];
        compact[31] = 5;
        compact[63] = 1;
        let sig = Signature::from_compact(&compact).unwrap();
        let recoverable = RecoverableSignature::new(sig, RecoveryId::from_u8(0).unwrap());

        assert_eq!(
            PublicKey::recover(&ctx, &msg, &recoverable),
            Err(Error::InvalidSignature)
        );
    }
}
