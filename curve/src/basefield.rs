//! Base field of secp256k1. p = 2^256 - 2^32 - 977
//!
//! Elements are stored as [u64; 4] in little-endian order. Values are kept in
//! the weakly reduced range [0, 2^256): any limb vector represents its value
//! mod p, and two vectors can differ by p while denoting the same element.
//! `normalize` brings an element into the canonical range [0, p), and every
//! comparison and serialization goes through it.
//!
//! Reduction uses 2^256 = C (mod p) with C = 2^32 + 977, so every carry out of
//! the top limb is folded back in with one small multiplication. None of the
//! operations branch on the value of their operands.

use core::fmt::{self, Debug, Display, Formatter};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

/// Element of the secp256k1 base field.
#[derive(Copy, Clone, Default)]
pub struct BaseField {
    limbs: [u64; 4],
}

// Field modulus: p = 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f
pub(crate) const MODULUS: [u64; 4] = [
    0xfffffffefffffc2f,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// 2^256 mod p
const C: u64 = 0x1000003d1;

// p - 2, exponent for Fermat inversion
const P_MINUS_2: [u64; 4] = [
    0xfffffffefffffc2d,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0xffffffffffffffff,
];

// (p + 1) / 4, exponent for square roots (p = 3 mod 4)
const P_PLUS_1_DIV_4: [u64; 4] = [
    0xffffffffbfffff0c,
    0xffffffffffffffff,
    0xffffffffffffffff,
    0x3fffffffffffffff,
];

/// Helper: Carrying addition
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, overflow1) = a.overflowing_add(b);
    let (sum, overflow2) = sum.overflowing_add(carry as u64);
    (sum, overflow1 || overflow2)
}

/// Helper: Borrowing subtraction
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, overflow1) = a.overflowing_sub(b);
    let (diff, overflow2) = diff.overflowing_sub(borrow as u64);
    (diff, overflow1 || overflow2)
}

/// Helper: 256-bit addition returning the carry out of the top limb.
#[inline]
pub(crate) const fn add_256(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, carry) = a[0].overflowing_add(b[0]);
    let (r1, carry) = carrying_add(a[1], b[1], carry);
    let (r2, carry) = carrying_add(a[2], b[2], carry);
    let (r3, carry) = carrying_add(a[3], b[3], carry);
    ([r0, r1, r2, r3], carry)
}

/// Helper: 256-bit subtraction returning the borrow out of the top limb.
#[inline]
pub(crate) const fn sub_256(a: [u64; 4], b: [u64; 4]) -> ([u64; 4], bool) {
    let (r0, borrow) = a[0].overflowing_sub(b[0]);
    let (r1, borrow) = borrowing_sub(a[1], b[1], borrow);
    let (r2, borrow) = borrowing_sub(a[2], b[2], borrow);
    let (r3, borrow) = borrowing_sub(a[3], b[3], borrow);
    ([r0, r1, r2, r3], borrow)
}

/// Helper: all-ones mask when `bit` is set, zero otherwise.
#[inline]
pub(crate) const fn mask(bit: bool) -> u64 {
    0u64.wrapping_sub(bit as u64)
}

/// Helper: select `b` when `m` is all ones, `a` when it is zero.
#[inline]
pub(crate) const fn select_limbs(a: [u64; 4], b: [u64; 4], m: u64) -> [u64; 4] {
    [
        a[0] ^ ((a[0] ^ b[0]) & m),
        a[1] ^ ((a[1] ^ b[1]) & m),
        a[2] ^ ((a[2] ^ b[2]) & m),
        a[3] ^ ((a[3] ^ b[3]) & m),
    ]
}

/// Reduce `r + top * 2^256` into [0, 2^256). `top` must stay below 2^40.
#[inline]
const fn fold(r: [u64; 4], top: u64) -> [u64; 4] {
    let mut acc = (r[0] as u128) + (top as u128) * (C as u128);
    let r0 = acc as u64;
    acc = (acc >> 64) + r[1] as u128;
    let r1 = acc as u64;
    acc = (acc >> 64) + r[2] as u128;
    let r2 = acc as u64;
    acc = (acc >> 64) + r[3] as u128;
    let r3 = acc as u64;
    let carry = (acc >> 64) as u64;

    // A second carry can only occur when the low part wrapped to a value
    // below top * C, so adding C once more cannot overflow.
    let (s0, c) = r0.overflowing_add(carry * C);
    let (s1, c) = carrying_add(r1, 0, c);
    let (s2, c) = carrying_add(r2, 0, c);
    let (s3, _) = carrying_add(r3, 0, c);
    [s0, s1, s2, s3]
}

/// Helper: Add two field values mod p
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r, carry) = add_256(a, b);
    fold(r, carry as u64)
}

/// Helper: Subtract two field values mod p
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    // A borrow means the true result is r - 2^256, which is r - C mod p.
    let (r, borrow) = sub_256(a, b);
    let (r, borrow) = sub_256(r, [C & mask(borrow), 0, 0, 0]);
    // The second borrow happens only if r < C; after it r >= 2^256 - 2C.
    let (r, _) = sub_256(r, [C & mask(borrow), 0, 0, 0]);
    r
}

/// Helper: bring a weakly reduced value into [0, p)
#[inline]
const fn normalize_limbs(a: [u64; 4]) -> [u64; 4] {
    // a >= p exactly when a + C overflows 2^256, and then a - p = a + C - 2^256.
    let (t, carry) = add_256(a, [C, 0, 0, 0]);
    select_limbs(a, t, mask(carry))
}

/// Schoolbook multiplication followed by folding of the high half.
#[inline]
fn mul_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let mut t = [0u64; 8];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    // lo + hi * C, hi * C < 2^289
    let mut r = [0u64; 4];
    let mut acc = 0u128;
    for i in 0..4 {
        acc += (t[i] as u128) + (t[i + 4] as u128) * (C as u128);
        r[i] = acc as u64;
        acc >>= 64;
    }

    fold(r, acc as u64)
}

impl BaseField {
    /// Zero element
    pub const ZERO: Self = BaseField {
        limbs: [0, 0, 0, 0],
    };

    /// One element
    pub const ONE: Self = BaseField {
        limbs: [1, 0, 0, 0],
    };

    /// Curve constant b = 7 of y^2 = x^3 + 7.
    pub const CURVE_B: Self = BaseField {
        limbs: [7, 0, 0, 0],
    };

    /// Create a field element from a small integer.
    #[inline]
    pub const fn from_u64(val: u64) -> Self {
        BaseField {
            limbs: [val, 0, 0, 0],
        }
    }

    /// Build an element from little-endian limbs, rejecting values >= p.
    pub fn from_u64_limbs(limbs: [u64; 4]) -> CtOption<Self> {
        let (_, borrow) = sub_256(limbs, MODULUS);
        CtOption::new(BaseField { limbs }, Choice::from(borrow as u8))
    }

    /// Parse a 32-byte big-endian encoding. Values >= p are rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        Self::from_u64_limbs(bytes_to_limbs(bytes))
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_bytes(&normalize_limbs(self.limbs))
    }

    /// Canonical little-endian limbs in [0, p).
    #[inline]
    pub fn to_canonical_limbs(&self) -> [u64; 4] {
        normalize_limbs(self.limbs)
    }

    /// Return the canonical representative of this element.
    #[inline]
    pub fn normalize(&self) -> Self {
        BaseField {
            limbs: normalize_limbs(self.limbs),
        }
    }

    #[inline]
    pub fn is_zero(&self) -> Choice {
        let n = normalize_limbs(self.limbs);
        (n[0] | n[1] | n[2] | n[3]).ct_eq(&0)
    }

    /// Parity of the canonical representative.
    #[inline]
    pub fn is_odd(&self) -> Choice {
        Choice::from((normalize_limbs(self.limbs)[0] & 1) as u8)
    }

    #[inline]
    pub fn double(&self) -> Self {
        *self + *self
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// Exponentiation by a public exponent.
    ///
    /// Runs a fixed square-and-multiply over all 256 exponent bits; the
    /// sequence of operations depends on `exp` only, never on `self`.
    pub fn pow(&self, exp: [u64; 4]) -> Self {
        let mut result = Self::ONE;
        for &limb in exp.iter().rev() {
            for bit in (0..64).rev() {
                result = result.square();
                if (limb >> bit) & 1 == 1 {
                    result *= *self;
                }
            }
        }
        result
    }

    /// Multiplicative inverse via Fermat's little theorem: a^{p-2}.
    ///
    /// Zero maps to zero; the returned option is none in that case.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.pow(P_MINUS_2), !self.is_zero())
    }

    /// Square root, if one exists. Since p = 3 mod 4 the candidate is
    /// a^{(p+1)/4}; it is checked by squaring.
    pub fn sqrt(&self) -> CtOption<Self> {
        let root = self.pow(P_PLUS_1_DIV_4);
        CtOption::new(root, root.square().ct_eq(self))
    }

    /// The field modulus as a big integer.
    pub fn modulus() -> BigUint {
        BigUint::from_bytes_be(&limbs_to_bytes(&MODULUS))
    }

    /// Canonical value as a big integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }
}

pub(crate) fn bytes_to_limbs(bytes: &[u8; 32]) -> [u64; 4] {
    let mut limbs = [0u64; 4];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let start = 32 - 8 * (i + 1);
        let mut word = [0u8; 8];
        word.copy_from_slice(&bytes[start..start + 8]);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

pub(crate) fn limbs_to_bytes(limbs: &[u64; 4]) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for (i, limb) in limbs.iter().enumerate() {
        let start = 32 - 8 * (i + 1);
        bytes[start..start + 8].copy_from_slice(&limb.to_be_bytes());
    }
    bytes
}

impl ConditionallySelectable for BaseField {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        BaseField {
            limbs: [
                u64::conditional_select(&a.limbs[0], &b.limbs[0], choice),
                u64::conditional_select(&a.limbs[1], &b.limbs[1], choice),
                u64::conditional_select(&a.limbs[2], &b.limbs[2], choice),
                u64::conditional_select(&a.limbs[3], &b.limbs[3], choice),
            ],
        }
    }
}

impl ConstantTimeEq for BaseField {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        let a = normalize_limbs(self.limbs);
        let b = normalize_limbs(other.limbs);
        a[..].ct_eq(&b[..])
    }
}

impl PartialEq for BaseField {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for BaseField {}

impl Zeroize for BaseField {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

impl Add for BaseField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        BaseField {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for BaseField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for BaseField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        BaseField {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for BaseField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for BaseField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        BaseField {
            limbs: sub_mod([0, 0, 0, 0], self.limbs),
        }
    }
}

impl Mul for BaseField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        BaseField {
            limbs: mul_mod(self.limbs, rhs.limbs),
        }
    }
}

impl MulAssign for BaseField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Display for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = normalize_limbs(self.limbs);
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for BaseField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "BaseField({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RandomField;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn p() -> BigUint {
        BaseField::modulus()
    }

    fn from_big(v: &BigUint) -> BaseField {
        let bytes = v.to_bytes_be();
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(&bytes);
        BaseField::from_bytes(&buf).unwrap()
    }

    #[test]
    fn test_modulus() {
        let expected = (BigUint::from(1u8) << 256u32)
            - (BigUint::from(1u8) << 32u32)
            - BigUint::from(977u32);
        assert_eq!(p(), expected);
    }

    #[test]
    fn test_zero_one() {
        assert_eq!(BaseField::ZERO + BaseField::ZERO, BaseField::ZERO);
        assert_eq!(BaseField::ONE * BaseField::ONE, BaseField::ONE);
        assert_eq!(BaseField::ZERO * BaseField::ONE, BaseField::ZERO);
        assert!(bool::from(BaseField::ZERO.is_zero()));
        assert!(!bool::from(BaseField::ONE.is_zero()));
    }

    #[test]
    fn test_small_arithmetic() {
        let a = BaseField::from_u64(6);
        let b = BaseField::from_u64(7);
        assert_eq!(a * b, BaseField::from_u64(42));
        assert_eq!(a + b, BaseField::from_u64(13));
        assert_eq!(b - a, BaseField::ONE);
        assert_eq!(a - b, -BaseField::ONE);
    }

    #[test]
    fn test_rejects_non_canonical_bytes() {
        let p_bytes = limbs_to_bytes(&MODULUS);
        assert!(bool::from(BaseField::from_bytes(&p_bytes).is_none()));
        assert!(bool::from(BaseField::from_bytes(&[0xff; 32]).is_none()));

        let mut below = p_bytes;
        below[31] -= 1;
        assert!(bool::from(BaseField::from_bytes(&below).is_some()));
    }

    #[test]
    fn test_wraparound_near_modulus() {
        let p_minus_one = -BaseField::ONE;
        assert_eq!(p_minus_one + BaseField::ONE, BaseField::ZERO);
        assert_eq!(p_minus_one + p_minus_one, -BaseField::from_u64(2));
        assert_eq!(p_minus_one * p_minus_one, BaseField::ONE);
        assert!(bool::from((p_minus_one + BaseField::ONE).is_zero()));
    }

    #[test]
    fn test_weakly_reduced_values_compare_equal() {
        // p + 5 is representable in four limbs and denotes 5.
        let (limbs, _) = add_256(MODULUS, [5, 0, 0, 0]);
        let weak = BaseField { limbs };
        assert_eq!(weak, BaseField::from_u64(5));
        assert_eq!(weak.to_bytes(), BaseField::from_u64(5).to_bytes());
    }

    #[test]
    fn test_against_biguint() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let a = BaseField::random(&mut rng);
            let b = BaseField::random(&mut rng);
            let (ba, bb) = (a.to_biguint(), b.to_biguint());

            assert_eq!((a + b).to_biguint(), (&ba + &bb) % p());
            assert_eq!((a - b).to_biguint(), (&ba + p() - &bb) % p());
            assert_eq!((a * b).to_biguint(), (&ba * &bb) % p());
            assert_eq!(a.square().to_biguint(), (&ba * &ba) % p());
            assert_eq!(from_big(&ba), a);
        }
    }

    #[test]
    fn test_inverse() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..8 {
            let a = BaseField::random(&mut rng);
            let inv = a.invert().unwrap();
            assert_eq!(a * inv, BaseField::ONE);
        }
        assert!(bool::from(BaseField::ZERO.invert().is_none()));
    }

    #[test]
    fn test_sqrt() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..8 {
            let a = BaseField::random(&mut rng);
            let sq = a.square();
            let root = sq.sqrt().unwrap();
            assert!(root == a || root == -a);
        }
        // -1 is a non-residue because p = 3 mod 4.
        assert!(bool::from((-BaseField::ONE).sqrt().is_none()));
    }

    #[test]
    fn test_parity() {
        assert!(bool::from(BaseField::ONE.is_odd()));
        assert!(!bool::from(BaseField::from_u64(2).is_odd()));
        // p - 1 is even
        assert!(!bool::from((-BaseField::ONE).is_odd()));
    }

    #[test]
    fn test_conditional_select() {
        let a = BaseField::from_u64(3);
        let b = BaseField::from_u64(9);
        assert_eq!(BaseField::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(BaseField::conditional_select(&a, &b, Choice::from(1)), b);
    }
}
