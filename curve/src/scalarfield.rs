//! Scalar field of the curve. n = 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
//!
//! This implementation uses Montgomery form for efficient modular arithmetic.
//! The field element is represented as [u64; 4] in little-endian order.
//! Reductions are done with masks instead of branches so that private keys,
//! nonces and blinding factors never influence control flow.

use core::fmt::{self, Debug, Display, Formatter};
use core::hash::{Hash, Hasher};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use num_bigint::BigUint;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};
use zeroize::Zeroize;

use crate::basefield::{add_256, bytes_to_limbs, limbs_to_bytes, mask, select_limbs, sub_256};
use crate::group::ScalarBits;

/// Scalar field element for the curve
/// Represented in Montgomery form with [u64; 4]
#[derive(Copy, Clone, Default)]
pub struct ScalarField {
    /// Montgomery form: value * R mod n, where R = 2^256
    limbs: [u64; 4],
}

/// Group order n, little-endian limbs.
pub const ORDER: [u64; 4] = [
    0xbfd25e8cd0364141,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

// R = 2^256 mod n (Montgomery parameter)
const R: [u64; 4] = [
    0x402da1732fc9bebf,
    0x4551231950b75fc4,
    0x0000000000000001,
    0x0000000000000000,
];

// R^2 = 2^512 mod n (for Montgomery conversion)
const R2: [u64; 4] = [
    0x896cf21467d7d140,
    0x741496c20e7cf878,
    0xe697f5e45bcd07c6,
    0x9d671cd581c69bc5,
];

// -n^{-1} mod 2^64 (Montgomery parameter mu)
const MU: u64 = 0x4b0dff665588b13f;

// n - 2, exponent for Fermat inversion
const N_MINUS_2: [u64; 4] = [
    0xbfd25e8cd036413f,
    0xbaaedce6af48a03b,
    0xfffffffffffffffe,
    0xffffffffffffffff,
];

// floor(n / 2), the largest low-S value
const HALF_ORDER: [u64; 4] = [
    0xdfe92f46681b20a0,
    0x5d576e7357a4501d,
    0xffffffffffffffff,
    0x7fffffffffffffff,
];

/// Helper: Add two 256-bit numbers mod n
#[inline]
const fn add_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r, carry) = add_256(a, b);
    let (s, borrow) = sub_256(r, ORDER);

    // Subtract the order if we overflowed or the sum is >= n
    select_limbs(r, s, mask(carry || !borrow))
}

/// Helper: Subtract two 256-bit numbers mod n
#[inline]
const fn sub_mod(a: [u64; 4], b: [u64; 4]) -> [u64; 4] {
    let (r, borrow) = sub_256(a, b);
    let m = mask(borrow);

    // Add the order back if we underflowed
    let (r, _) = add_256(
        r,
        [ORDER[0] & m, ORDER[1] & m, ORDER[2] & m, ORDER[3] & m],
    );
    r
}

/// Helper: value < n
#[inline]
const fn is_canonical(limbs: [u64; 4]) -> bool {
    let (_, borrow) = sub_256(limbs, ORDER);
    borrow
}

/// Montgomery multiplication: (a * b * R^{-1}) mod n
#[inline]
fn montgomery_mul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
    // Compute a * b; t[8] absorbs the final reduction carry
    let mut t = [0u64; 9];

    for i in 0..4 {
        let mut carry = 0u128;
        for j in 0..4 {
            let product = (a[i] as u128) * (b[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }
        t[i + 4] = carry as u64;
    }

    // Montgomery reduction
    for i in 0..4 {
        let k = t[i].wrapping_mul(MU);
        let mut carry = 0u128;

        for j in 0..4 {
            let product = (k as u128) * (ORDER[j] as u128) + (t[i + j] as u128) + carry;
            t[i + j] = product as u64;
            carry = product >> 64;
        }

        for limb in t.iter_mut().skip(i + 4) {
            let sum = (*limb as u128) + carry;
            *limb = sum as u64;
            carry = sum >> 64;
        }
    }

    // Result is below 2n; it may carry into t[8] since n > 2^255.
    let result = [t[4], t[5], t[6], t[7]];
    let (reduced, borrow) = sub_256(result, ORDER);
    select_limbs(result, reduced, mask(t[8] != 0 || !borrow))
}

impl ScalarField {
    /// Zero element (in Montgomery form)
    pub const ZERO: Self = ScalarField {
        limbs: [0, 0, 0, 0],
    };

    /// One element (in Montgomery form: R mod n)
    pub const ONE: Self = ScalarField { limbs: R };

    /// Create a new scalar field element from a u64 value
    #[inline]
    pub fn from_canonical_u64(val: u64) -> Self {
        Self::from_canonical_limbs([val, 0, 0, 0])
    }

    /// Convert canonical little-endian limbs (< n) into Montgomery form.
    #[inline]
    pub fn from_canonical_limbs(limbs: [u64; 4]) -> Self {
        // Convert to Montgomery form: val * R^2 * R^{-1} = val * R
        ScalarField {
            limbs: montgomery_mul(&limbs, &R2),
        }
    }

    /// Convert from Montgomery form to canonical form
    #[inline]
    pub fn to_canonical_u64_vec(&self) -> [u64; 4] {
        // Multiply by 1 to get out of Montgomery form
        montgomery_mul(&self.limbs, &[1, 0, 0, 0])
    }

    /// Parse a 32-byte big-endian scalar. Values >= n are rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let limbs = bytes_to_limbs(bytes);
        let valid = Choice::from(is_canonical(limbs) as u8);
        CtOption::new(Self::from_canonical_limbs(limbs), valid)
    }

    /// Interpret 32 big-endian bytes as an integer and reduce it mod n.
    ///
    /// Any 256-bit value is below 2n, so one conditional subtraction suffices.
    pub fn from_bytes_reduced(bytes: &[u8; 32]) -> Self {
        let limbs = bytes_to_limbs(bytes);
        let (reduced, borrow) = sub_256(limbs, ORDER);
        Self::from_canonical_limbs(select_limbs(limbs, reduced, mask(!borrow)))
    }

    /// Canonical 32-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        limbs_to_bytes(&self.to_canonical_u64_vec())
    }

    /// Check if this field element is zero
    #[inline]
    pub fn is_zero(&self) -> Choice {
        let l = self.limbs;
        (l[0] | l[1] | l[2] | l[3]).ct_eq(&0)
    }

    /// Whether the canonical value is above n/2.
    #[inline]
    pub fn is_high(&self) -> Choice {
        let (_, borrow) = sub_256(HALF_ORDER, self.to_canonical_u64_vec());
        Choice::from(borrow as u8)
    }

    /// Compute multiplicative inverse via Fermat's little theorem.
    ///
    /// The exponent n - 2 is public, so the operation sequence is fixed.
    /// Zero has no inverse and maps to zero.
    pub fn inverse(&self) -> Self {
        self.pow(N_MINUS_2)
    }

    /// Multiplicative inverse, none for zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.inverse(), !self.is_zero())
    }

    /// Exponentiation by a public exponent
    fn pow(&self, exp: [u64; 4]) -> Self {
        let mut result = Self::ONE;

        for &limb in exp.iter().rev() {
            for bit in (0..64).rev() {
                result = result * result;
                if (limb >> bit) & 1 == 1 {
                    result *= *self;
                }
            }
        }

        result
    }

    /// The group order as a big integer.
    pub fn order() -> BigUint {
        BigUint::from_bytes_be(&limbs_to_bytes(&ORDER))
    }

    /// Canonical value as a big integer.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.to_bytes())
    }
}

impl ScalarBits for ScalarField {
    #[inline]
    fn to_u64_limbs(&self) -> [u64; 4] {
        self.to_canonical_u64_vec()
    }
}

impl ConditionallySelectable for ScalarField {
    #[inline]
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        ScalarField {
            limbs: [
                u64::conditional_select(&a.limbs[0], &b.limbs[0], choice),
                u64::conditional_select(&a.limbs[1], &b.limbs[1], choice),
                u64::conditional_select(&a.limbs[2], &b.limbs[2], choice),
                u64::conditional_select(&a.limbs[3], &b.limbs[3], choice),
            ],
        }
    }
}

impl ConstantTimeEq for ScalarField {
    #[inline]
    fn ct_eq(&self, other: &Self) -> Choice {
        // Montgomery limbs are always fully reduced, so they compare directly.
        self.limbs[..].ct_eq(&other.limbs[..])
    }
}

impl PartialEq for ScalarField {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for ScalarField {}

impl Zeroize for ScalarField {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
    }
}

// Arithmetic operations
impl Add for ScalarField {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        ScalarField {
            limbs: add_mod(self.limbs, rhs.limbs),
        }
    }
}

impl AddAssign for ScalarField {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for ScalarField {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        ScalarField {
            limbs: sub_mod(self.limbs, rhs.limbs),
        }
    }
}

impl SubAssign for ScalarField {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for ScalarField {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        ScalarField {
            limbs: sub_mod([0, 0, 0, 0], self.limbs),
        }
    }
}

impl Mul for ScalarField {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        ScalarField {
            limbs: montgomery_mul(&self.limbs, &rhs.limbs),
        }
    }
}

impl MulAssign for ScalarField {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Sum for ScalarField {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

// Display and Debug
impl Display for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let canonical = self.to_canonical_u64_vec();
        write!(
            f,
            "0x{:016x}{:016x}{:016x}{:016x}",
            canonical[3], canonical[2], canonical[1], canonical[0]
        )
    }
}

impl Debug for ScalarField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ScalarField({})", self)
    }
}

impl Hash for ScalarField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.limbs.hash(state);
    }
}
