//! ECDSA signature types and their encodings.

use core::fmt;

use curve::ScalarField;
use serde::{Deserialize, Serialize};
use subtle::ConditionallySelectable;

use crate::constants::{COMPACT_SIGNATURE_SIZE, RECOVERABLE_SIGNATURE_SIZE};
use crate::der;
use crate::errors::Error;

/// An ECDSA signature `(r, s)` with both components in `[1, n - 1]`.
///
/// Signatures produced by this crate are always low-S. Parsed signatures
/// may be high-S and fail verification until passed through
/// [`Signature::normalize_s`].
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Signature {
    r: ScalarField,
    s: ScalarField,
}

/// Which of the candidate points a signature's r was taken from.
///
/// Bit 0 is the parity of R.y. Bit 1 is set when R.x was not below n.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecoveryId(u8);

/// A signature together with its recovery id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct RecoverableSignature {
    signature: Signature,
    recovery_id: RecoveryId,
}

fn parse_component(bytes: &[u8]) -> Result<ScalarField, Error> {
    let mut array = [0u8; 32];
    array.copy_from_slice(bytes);
    let value =
        Option::<ScalarField>::from(ScalarField::from_bytes(&array)).ok_or(Error::InvalidSignature)?;
    if bool::from(value.is_zero()) {
        return Err(Error::InvalidSignature);
    }
    Ok(value)
}

impl Signature {
    pub(crate) fn new(r: ScalarField, s: ScalarField) -> Self {
        Signature { r, s }
    }

    pub(crate) fn r(&self) -> &ScalarField {
        &self.r
    }

    pub(crate) fn s(&self) -> &ScalarField {
        &self.s
    }

    /// Parse a 64-byte compact signature, r then s, both big-endian.
    pub fn from_compact(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != COMPACT_SIGNATURE_SIZE {
            return Err(Error::InvalidLength {
                expected: COMPACT_SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        Ok(Signature {
            r: parse_component(&bytes[..32])?,
            s: parse_component(&bytes[32..])?,
        })
    }

    /// Parse a strict DER signature.
    pub fn from_der(bytes: &[u8]) -> Result<Self, Error> {
        let (r, s) = der::decode(bytes)?;
        Ok(Signature {
            r: parse_component(&r)?,
            s: parse_component(&s)?,
        })
    }

    /// 64-byte compact encoding.
    pub fn to_compact(&self) -> [u8; 64] {
        let mut out = [0u8; COMPACT_SIGNATURE_SIZE];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Minimal DER encoding, at most 72 bytes.
    pub fn to_der(&self) -> Vec<u8> {
        der::encode(&self.r.to_bytes(), &self.s.to_bytes())
    }

    /// Whether s is at most n/2.
    pub fn is_low_s(&self) -> bool {
        !bool::from(self.s.is_high())
    }

    /// The same signature with s replaced by n - s when s is above n/2.
    ///
    /// Only the low form passes [`PublicKey::verify`](crate::PublicKey::verify).
    pub fn normalize_s(&self) -> Signature {
        Signature {
            r: self.r,
            s: ScalarField::conditional_select(&self.s, &-self.s, self.s.is_high()),
        }
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(")?;
        for byte in self.to_compact() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<Vec<u8>> for Signature {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::from_compact(&bytes)
    }
}

impl From<Signature> for Vec<u8> {
    fn from(sig: Signature) -> Self {
        sig.to_compact().to_vec()
    }
}

impl RecoveryId {
    /// Accepts 0, 1, 2 and 3.
    pub fn from_u8(id: u8) -> Result<Self, Error> {
        if id > 3 {
            return Err(Error::InvalidRecoveryId);
        }
        Ok(RecoveryId(id))
    }

    pub fn to_u8(self) -> u8 {
        self.0
    }

    /// Parity of R.y.
    pub fn is_y_odd(self) -> bool {
        self.0 & 1 == 1
    }

    /// Whether R.x was n or more, so that r = R.x - n.
    pub fn is_x_reduced(self) -> bool {
        self.0 & 2 == 2
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self, Error> {
        Self::from_u8(id)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> Self {
        id.0
    }
}

impl RecoverableSignature {
    pub fn new(signature: Signature, recovery_id: RecoveryId) -> Self {
        RecoverableSignature {
            signature,
            recovery_id,
        }
    }

    /// Parse a 64-byte compact signature with a separate recovery id.
    pub fn from_compact(bytes: &[u8], recovery_id: RecoveryId) -> Result<Self, Error> {
        Ok(RecoverableSignature {
            signature: Signature::from_compact(bytes)?,
            recovery_id,
        })
    }

    /// The compact signature and the recovery id.
    pub fn to_compact(&self) -> ([u8; 64], RecoveryId) {
        (self.signature.to_compact(), self.recovery_id)
    }

    /// 65 bytes: the compact signature followed by the recovery id byte.
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; RECOVERABLE_SIGNATURE_SIZE];
        out[..64].copy_from_slice(&self.signature.to_compact());
        out[64] = self.recovery_id.0;
        out
    }

    /// Inverse of [`RecoverableSignature::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != RECOVERABLE_SIGNATURE_SIZE {
            return Err(Error::InvalidLength {
                expected: RECOVERABLE_SIGNATURE_SIZE,
                actual: bytes.len(),
            });
        }
        Self::from_compact(&bytes[..64], RecoveryId::from_u8(bytes[64])?)
    }

    pub fn recovery_id(&self) -> RecoveryId {
        self.recovery_id
    }

    /// Drop the recovery id.
    pub fn to_standard(&self) -> Signature {
        self.signature
    }
}

impl TryFrom<Vec<u8>> for RecoverableSignature {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<RecoverableSignature> for Vec<u8> {
    fn from(sig: RecoverableSignature) -> Self {
        sig.to_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact(r: u64, s_bytes: [u8; 32]) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[24..32].copy_from_slice(&r.to_be_bytes());
        out[32..].copy_from_slice(&s_bytes);
        out
    }

    fn s_value(value: u64) -> [u8; 32] {
        let mut out = [0u8; 32];
        out[24..].copy_from_slice(&value.to_be_bytes());
        out
    }

    #[test]
    fn test_compact_rejects_zero_and_overflow() {
        assert_eq!(
            Signature::from_compact(&compact(0, s_value(1))),
            Err(Error::InvalidSignature)
        );
        assert_eq!(
            Signature::from_compact(&compact(1, [0xff; 32])),
            Err(Error::InvalidSignature)
        );
        assert_eq!(
            Signature::from_compact(&[1u8; 63]),
            Err(Error::InvalidLength {
                expected: 64,
                actual: 63
            })
        );
    }

    #[test]
    fn test_der_and_compact_agree() {
        let sig = Signature::from_compact(&compact(7, s_value(9))).unwrap();
        let der = sig.to_der();

        assert_eq!(der, [0x30, 0x06, 0x02, 0x01, 0x07, 0x02, 0x01, 0x09]);
        assert_eq!(Signature::from_der(&der), Ok(sig));
    }

    #[test]
    fn test_der_rejects_zero_component() {
        let der = [0x30, 0x06, 0x02, 0x01, 0x00, 0x02, 0x01, 0x01];
        assert_eq!(Signature::from_der(&der), Err(Error::InvalidSignature));
    }

    #[test]
    fn test_normalize_s() {
        let low = Signature::from_compact(&compact(3, s_value(5))).unwrap();
        assert!(low.is_low_s());
        assert_eq!(low.normalize_s(), low);

        let high = Signature::new(low.r, -low.s);
        assert!(!high.is_low_s());
        assert_eq!(high.normalize_s(), low);
    }

    #[test]
    fn test_half_order_boundary() {
        // n/2 rounded down is the largest low s.
        let half = [
            0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
            0xff, 0xff, 0x5d, 0x57, 0x6e, 0x73, 0x57, 0xa4, 0x50, 0x1d, 0xdf, 0xe9, 0x2f, 0x46,
            0x68, 0x1b, 0x20, 0xa0,
        ];
        let at_half = Signature::from_compact(&compact(1, half)).unwrap();
        assert!(at_half.is_low_s());

        let mut above = half;
        above[31] += 1;
        let above_half = Signature::from_compact(&compact(1, above)).unwrap();
        assert!(!above_half.is_low_s());
    }

    #[test]
    fn test_recovery_id_range() {
        for id in 0..4u8 {
            assert_eq!(RecoveryId::from_u8(id).map(u8::from), Ok(id));
        }
        assert_eq!(RecoveryId::from_u8(4), Err(Error::InvalidRecoveryId));

        let id = RecoveryId::from_u8(3).unwrap();
        assert!(id.is_y_odd());
        assert!(id.is_x_reduced());
    }

    #[test]
    fn test_recoverable_bytes() {
        let sig = Signature::from_compact(&compact(11, s_value(13))).unwrap();
        let recoverable = RecoverableSignature::new(sig, RecoveryId::from_u8(2).unwrap());
        let bytes = recoverable.to_bytes();

        assert_eq!(bytes[64], 2);
        assert_eq!(RecoverableSignature::from_bytes(&bytes), Ok(recoverable));
        assert_eq!(recoverable.to_standard(), sig);

        let mut bad_id = bytes;
        bad_id[64] = 4;
        assert_eq!(
            RecoverableSignature::from_bytes(&bad_id),
            Err(Error::InvalidRecoveryId)
        );
    }
}
