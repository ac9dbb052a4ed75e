use crate::affine::Affine;
use crate::basefield::BaseField;
use crate::{Group, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// Point on the curve in Jacobian coordinates.
/// Represents (X:Y:Z) with affine (x, y) = (X/Z^2, Y/Z^3).
/// The point at infinity is any triple with Z = 0; the canonical one is (0:1:0).
#[derive(Copy, Clone, Debug)]
pub struct Jacobian {
    pub x: BaseField,
    pub y: BaseField,
    pub z: BaseField,
}

impl Jacobian {
    /// The point at infinity (identity element): (0:1:0)
    pub const INFINITY: Self = Jacobian {
        x: BaseField::ZERO,
        y: BaseField::ONE,
        z: BaseField::ZERO,
    };

    /// Create a new Jacobian point.
    pub fn new(x: BaseField, y: BaseField, z: BaseField) -> Self {
        Jacobian { x, y, z }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> Choice {
        self.z.is_zero()
    }

    /// Convert to affine coordinates with a single field inversion.
    pub fn to_affine(&self) -> Affine {
        // Infinity has no inverse; the zero fallback then yields (0, 0).
        let z_inv = self.z.invert().unwrap_or(BaseField::ZERO);
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2 * z_inv;

        let point = Affine::new((self.x * z_inv2).normalize(), (self.y * z_inv3).normalize());
        Affine::conditional_select(&point, &Affine::identity(), self.is_infinity())
    }

    /// Convert from affine coordinates.
    pub fn from_affine(point: &Affine) -> Self {
        let lifted = Jacobian::new(point.x, point.y, BaseField::ONE);
        Jacobian::conditional_select(&lifted, &Self::INFINITY, point.is_identity())
    }

    /// Check if a point is on the curve: Y^2 = X^3 + 7*Z^6.
    pub fn is_on_curve(&self) -> Choice {
        let z2 = self.z.square();
        let z6 = z2.square() * z2;
        let lhs = self.y.square();
        let rhs = self.x.square() * self.x + BaseField::CURVE_B * z6;

        lhs.ct_eq(&rhs) | self.is_infinity()
    }

    /// The standard secp256k1 generator.
    pub fn generator() -> Self {
        Self::from_affine(&Affine::generator())
    }

    /// Point doubling: 2*P (dbl-2009-l, a = 0).
    ///
    /// secp256k1 has no point of order two, so the formula is complete:
    /// infinity stays at Z = 0 and every other input doubles correctly.
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = ((self.x + b).square() - a - c).double();
        let e = a.double() + a;
        let f = e.square();

        let x3 = f - d.double();
        let y3 = e * (d - x3) - c.double().double().double();
        let z3 = (self.y * self.z).double();

        Jacobian::new(x3, y3, z3)
    }

    /// Negate a point.
    #[inline]
    pub fn negate(&self) -> Self {
        Jacobian::new(self.x, -self.y, self.z)
    }

    /// Add an affine point (madd-2007-bl).
    ///
    /// Infinity on either side and the P + P case are resolved with
    /// constant-time selection, so the same operations run for every input.
    pub fn add_affine(&self, other: &Affine) -> Self {
        let z1z1 = self.z.square();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - self.x;
        let hh = h.square();
        let i = hh.double().double();
        let j = h * i;
        let r = (s2 - self.y).double();
        let v = self.x * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (self.y * j).double();
        let z3 = (self.z + h).square() - z1z1 - hh;

        // h = 0 with r != 0 means other = -self, and then z3 = 0 already.
        let mut result = Jacobian::new(x3, y3, z3);
        result.conditional_assign(&self.double(), h.is_zero() & r.is_zero());
        result.conditional_assign(&Self::from_affine(other), self.is_infinity());
        result.conditional_assign(self, other.is_identity());
        result
    }

    /// Rescale to an equivalent representative (X*s^2 : Y*s^3 : Z*s).
    ///
    /// Used with a random nonzero `s` to blind intermediate coordinates.
    pub fn rescale(&self, s: &BaseField) -> Self {
        let s2 = s.square();
        let s3 = s2 * *s;
        Jacobian::new(self.x * s2, self.y * s3, self.z * *s)
    }

    /// Batch normalization: convert multiple Jacobian points to affine.
    /// This shares a single inversion across all points.
    pub fn batch_normalize(points: &[Self]) -> Vec<Affine> {
        let mut prefix = Vec::with_capacity(points.len());
        let mut acc = BaseField::ONE;
        for point in points {
            prefix.push(acc);
            acc *= BaseField::conditional_select(&point.z, &BaseField::ONE, point.is_infinity());
        }

        let mut inv = acc.invert().unwrap_or(BaseField::ZERO);
        let mut out = vec![Affine::identity(); points.len()];
        for (i, point) in points.iter().enumerate().rev() {
            let z = BaseField::conditional_select(&point.z, &BaseField::ONE, point.is_infinity());
            let z_inv = inv * prefix[i];
            inv *= z;

            let z_inv2 = z_inv.square();
            let affine = Affine::new(
                (point.x * z_inv2).normalize(),
                (point.y * z_inv2 * z_inv).normalize(),
            );
            out[i] = Affine::conditional_select(&affine, &Affine::identity(), point.is_infinity());
        }
        out
    }
}

impl Group for Jacobian {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::INFINITY
    }

    #[inline]
    fn is_identity(&self) -> Choice {
        self.is_infinity()
    }

    #[inline]
    fn generator() -> Self {
        Jacobian::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }
}

impl ConditionallySelectable for Jacobian {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Jacobian {
            x: BaseField::conditional_select(&a.x, &b.x, choice),
            y: BaseField::conditional_select(&a.y, &b.y, choice),
            z: BaseField::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for Jacobian {
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let x_eq = (self.x * z2z2).ct_eq(&(other.x * z1z1));
        let y_eq = (self.y * z2z2 * other.z).ct_eq(&(other.y * z1z1 * self.z));

        let inf1 = self.is_infinity();
        let inf2 = other.is_infinity();
        (inf1 & inf2) | (!inf1 & !inf2 & x_eq & y_eq)
    }
}

impl PartialEq for Jacobian {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Jacobian {}

impl Zeroize for Jacobian {
    fn zeroize(&mut self) {
        self.x.zeroize();
        self.y.zeroize();
        self.z.zeroize();
    }
}

// Jacobian addition (add-2007-bl), complete through constant-time selection
impl Add for Jacobian {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;
        let h = u2 - u1;
        let i = h.double().square();
        let j = h * i;
        let r = (s2 - s1).double();
        let v = u1 * i;

        let x3 = r.square() - j - v.double();
        let y3 = r * (v - x3) - (s1 * j).double();
        let z3 = ((self.z + other.z).square() - z1z1 - z2z2) * h;

        let mut result = Jacobian::new(x3, y3, z3);
        result.conditional_assign(&self.double(), h.is_zero() & r.is_zero());
        result.conditional_assign(&other, self.is_infinity());
        result.conditional_assign(&self, other.is_infinity());
        result
    }
}

impl AddAssign for Jacobian {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Jacobian {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Jacobian {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Jacobian {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Jacobian {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Jacobian {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Jacobian> for ScalarField {
    type Output = Jacobian;

    fn mul(self, point: Jacobian) -> Jacobian {
        <Jacobian as Group>::scalar_mul(&point, &self)
    }
}

// Conversions
impl From<Affine> for Jacobian {
    fn from(point: Affine) -> Self {
        Jacobian::from_affine(&point)
    }
}

impl From<&Affine> for Jacobian {
    fn from(point: &Affine) -> Self {
        Jacobian::from_affine(point)
    }
}

impl From<Jacobian> for Affine {
    fn from(point: Jacobian) -> Self {
        point.to_affine()
    }
}

impl From<&Jacobian> for Affine {
    fn from(point: &Jacobian) -> Self {
        point.to_affine()
    }
}
