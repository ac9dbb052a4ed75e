//! Secret keys, public keys and tweaks.

use core::fmt;

use curve::{Affine, BaseField, Choice, Group, Jacobian, RandomField, ScalarField};
use rand::Rng;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::{
    PUBLIC_KEY_COMPRESSED_SIZE, PUBLIC_KEY_UNCOMPRESSED_SIZE, SECRET_KEY_SIZE, TWEAK_SIZE,
};
use crate::context::Context;
use crate::errors::Error;

/// A secret key: a scalar in `[1, n - 1]`.
///
/// The scalar is wiped when the key is dropped. `Debug` never prints it.
///
/// # Example
///
/// ```
/// use secp::{Context, SecretKey};
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let ctx = Context::new();
/// let mut rng = StdRng::seed_from_u64(42);
/// let secret_key = SecretKey::random(&mut rng);
/// let public_key = secret_key.public_key(&ctx);
/// # let _ = public_key;
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "[u8; 32]", into = "[u8; 32]")]
pub struct SecretKey {
    scalar: ScalarField,
}

/// A public key: a curve point other than infinity.
///
/// # Example
///
/// ```
/// use secp::PublicKey;
///
/// let compressed = [
///     0x02, 0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce,
///     0x87, 0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81,
///     0x5b, 0x16, 0xf8, 0x17, 0x98,
/// ];
/// let public_key = PublicKey::from_slice(&compressed).expect("generator is a valid key");
/// assert_eq!(public_key.serialize_compressed(), compressed);
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct PublicKey {
    point: Affine,
}

/// A 32-byte tweak: a scalar in `[0, n - 1]`.
///
/// Zero is a valid tweak for addition and is rejected for multiplication.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Tweak {
    scalar: ScalarField,
}

fn check_length(bytes: &[u8], expected: usize) -> Result<(), Error> {
    if bytes.len() != expected {
        return Err(Error::InvalidLength {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

impl SecretKey {
    /// Parse a 32-byte big-endian secret key.
    ///
    /// Fails with [`Error::InvalidSecretKey`] for zero or for values not
    /// below the group order.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let scalar = Option::<ScalarField>::from(ScalarField::from_bytes(bytes))
            .ok_or(Error::InvalidSecretKey)?;
        Self::from_scalar(scalar)
    }

    /// Parse a secret key from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        check_length(bytes, SECRET_KEY_SIZE)?;
        let mut array = [0u8; SECRET_KEY_SIZE];
        array.copy_from_slice(bytes);
        let key = Self::from_bytes(&array);
        array.zeroize();
        key
    }

    /// Generate a key by rejection sampling from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let scalar = ScalarField::random(rng);
            if let Ok(key) = Self::from_scalar(scalar) {
                return key;
            }
        }
    }

    pub(crate) fn from_scalar(scalar: ScalarField) -> Result<Self, Error> {
        if bool::from(scalar.is_zero()) {
            return Err(Error::InvalidSecretKey);
        }
        Ok(SecretKey { scalar })
    }

    pub(crate) fn scalar(&self) -> &ScalarField {
        &self.scalar
    }

    /// Big-endian encoding of the key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.scalar.to_bytes()
    }

    /// The public key `self * G`.
    pub fn public_key(&self, ctx: &Context) -> PublicKey {
        // A nonzero scalar below n never maps to infinity.
        PublicKey {
            point: ctx.mul_generator(&self.scalar).to_affine(),
        }
    }

    /// `n - self`.
    pub fn negate(&self) -> SecretKey {
        SecretKey {
            scalar: -self.scalar,
        }
    }

    /// `self + tweak mod n`. Fails with [`Error::ZeroScalar`] when the sum is
    /// zero.
    pub fn tweak_add(&self, tweak: &Tweak) -> Result<SecretKey, Error> {
        let sum = self.scalar + tweak.scalar;
        if bool::from(sum.is_zero()) {
            return Err(Error::ZeroScalar);
        }
        Ok(SecretKey { scalar: sum })
    }

    /// `self * tweak mod n`. A zero tweak is rejected.
    pub fn tweak_mul(&self, tweak: &Tweak) -> Result<SecretKey, Error> {
        if tweak.is_zero() {
            return Err(Error::InvalidTweak);
        }
        Ok(SecretKey {
            scalar: self.scalar * tweak.scalar,
        })
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.scalar.ct_eq(&other.scalar).into()
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

impl TryFrom<[u8; 32]> for SecretKey {
    type Error = Error;

    fn try_from(bytes: [u8; 32]) -> Result<Self, Error> {
        Self::from_bytes(&bytes)
    }
}

impl From<SecretKey> for [u8; 32] {
    fn from(key: SecretKey) -> Self {
        key.to_bytes()
    }
}

impl PublicKey {
    /// Parse a SEC1 encoded public key.
    ///
    /// Accepts compressed keys (33 bytes, prefix 0x02 or 0x03), uncompressed
    /// keys (65 bytes, prefix 0x04) and hybrid keys (65 bytes, prefix 0x06
    /// or 0x07, where the prefix must match the parity of y).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        match bytes.len() {
            PUBLIC_KEY_COMPRESSED_SIZE => Self::parse_compressed(bytes),
            PUBLIC_KEY_UNCOMPRESSED_SIZE => Self::parse_uncompressed(bytes),
            _ => Err(Error::InvalidPublicKey),
        }
    }

    fn parse_compressed(bytes: &[u8]) -> Result<Self, Error> {
        let y_is_odd = match bytes[0] {
            0x02 => Choice::from(0),
            0x03 => Choice::from(1),
            _ => return Err(Error::InvalidPublicKey),
        };
        let x = field_from_slice(&bytes[1..33])?;
        let point =
            Option::<Affine>::from(Affine::decompress(&x, y_is_odd)).ok_or(Error::InvalidPublicKey)?;
        Ok(PublicKey { point })
    }

    fn parse_uncompressed(bytes: &[u8]) -> Result<Self, Error> {
        let prefix = bytes[0];
        if !matches!(prefix, 0x04 | 0x06 | 0x07) {
            return Err(Error::InvalidPublicKey);
        }
        let x = field_from_slice(&bytes[1..33])?;
        let y = field_from_slice(&bytes[33..65])?;

        if prefix != 0x04 && bool::from(y.is_odd()) != (prefix == 0x07) {
            return Err(Error::InvalidPublicKey);
        }

        let point =
            Option::<Affine>::from(Affine::from_coordinates(x, y)).ok_or(Error::InvalidPublicKey)?;
        Ok(PublicKey { point })
    }

    pub(crate) fn from_jacobian(point: &Jacobian) -> Result<Self, Error> {
        if bool::from(point.is_infinity()) {
            return Err(Error::PointAtInfinity);
        }
        Ok(PublicKey {
            point: point.to_affine(),
        })
    }

    pub(crate) fn point(&self) -> &Affine {
        &self.point
    }

    /// 33-byte compressed encoding.
    pub fn serialize_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; PUBLIC_KEY_COMPRESSED_SIZE];
        out[0] = 0x02 | self.point.y.is_odd().unwrap_u8();
        out[1..].copy_from_slice(&self.point.x.to_bytes());
        out
    }

    /// 65-byte uncompressed encoding.
    pub fn serialize_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; PUBLIC_KEY_UNCOMPRESSED_SIZE];
        out[0] = 0x04;
        out[1..33].copy_from_slice(&self.point.x.to_bytes());
        out[33..].copy_from_slice(&self.point.y.to_bytes());
        out
    }

    /// The point with y replaced by p - y.
    pub fn negate(&self) -> PublicKey {
        PublicKey {
            point: self.point.negate(),
        }
    }

    /// `self + tweak * G`. Fails with [`Error::PointAtInfinity`] when the
    /// tweak is the negated discrete log of the key.
    pub fn tweak_add(&self, ctx: &Context, tweak: &Tweak) -> Result<PublicKey, Error> {
        let sum = ctx.mul_generator(&tweak.scalar).add_affine(&self.point);
        Self::from_jacobian(&sum)
    }

    /// `tweak * self`. A zero tweak is rejected.
    pub fn tweak_mul(&self, ctx: &Context, tweak: &Tweak) -> Result<PublicKey, Error> {
        if tweak.is_zero() {
            return Err(Error::InvalidTweak);
        }
        let product = ctx.mul_point(&self.point.to_jacobian(), &tweak.scalar);
        Self::from_jacobian(&product)
    }

    /// `self + other`.
    pub fn add(&self, other: &PublicKey) -> Result<PublicKey, Error> {
        Self::combine(&[*self, *other])
    }

    /// Sum of all `keys` in order.
    ///
    /// Fails with [`Error::TooFewKeys`] for an empty list and with
    /// [`Error::PointAtInfinity`] when the keys cancel out.
    pub fn combine(keys: &[PublicKey]) -> Result<PublicKey, Error> {
        if keys.is_empty() {
            return Err(Error::TooFewKeys);
        }
        let points: Vec<Jacobian> = keys.iter().map(|key| key.point.to_jacobian()).collect();
        Self::from_jacobian(&Jacobian::sum_points(&points))
    }
}

fn field_from_slice(bytes: &[u8]) -> Result<BaseField, Error> {
    let mut array = [0u8; 32];
    array.copy_from_slice(bytes);
    Option::<BaseField>::from(BaseField::from_bytes(&array)).ok_or(Error::InvalidPublicKey)
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey(")?;
        for byte in self.serialize_compressed() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl TryFrom<Vec<u8>> for PublicKey {
    type Error = Error;

    fn try_from(bytes: Vec<u8>) -> Result<Self, Error> {
        Self::from_slice(&bytes)
    }
}

impl From<PublicKey> for Vec<u8> {
    fn from(key: PublicKey) -> Self {
        key.serialize_compressed().to_vec()
    }
}

impl Tweak {
    /// Parse a 32-byte big-endian tweak. Values not below n are rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        let scalar = Option::<ScalarField>::from(ScalarField::from_bytes(bytes))
            .ok_or(Error::InvalidTweak)?;
        Ok(Tweak { scalar })
    }

    /// Parse a tweak from a slice that must be exactly 32 bytes long.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        check_length(bytes, TWEAK_SIZE)?;
        let mut array = [0u8; TWEAK_SIZE];
        array.copy_from_slice(bytes);
        Self::from_bytes(&array)
    }

    /// Big-endian encoding of the tweak.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.scalar.to_bytes()
    }

    fn is_zero(&self) -> bool {
        self.scalar.is_zero().into()
    }
}

impl fmt::Debug for Tweak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Tweak(..)")
    }
}

impl From<&SecretKey> for Tweak {
    fn from(key: &SecretKey) -> Self {
        Tweak { scalar: key.scalar }
    }
}
