// secp256k1 (SEC 2, section 2.4.1)
// E(GF(p)) : y^2 = x^3 + 7, p = 2^256 - 2^32 - 977
// Generator G = (0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798,
//                0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8)
// Curve prime order: 0xfffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141
// Curve cofactor: 1

use crate::basefield::BaseField;
use crate::{Group, Jacobian, ScalarField};
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// Affine point on the elliptic curve.
/// Represents a point in affine coordinates (x, y) or the point at infinity.
#[derive(Copy, Clone, Debug)]
pub struct Affine {
    /// The x-coordinate of the point
    pub x: BaseField,
    /// The y-coordinate of the point
    pub y: BaseField,
    /// Whether this point is the point at infinity (identity element)
    pub infinity: Choice,
}

impl Affine {
    /// Create a new affine point. The coordinates are not validated.
    pub fn new(x: BaseField, y: BaseField) -> Self {
        Affine {
            x,
            y,
            infinity: Choice::from(0),
        }
    }

    /// The point at infinity (identity element)
    pub fn identity() -> Self {
        Affine {
            x: BaseField::ZERO,
            y: BaseField::ZERO,
            infinity: Choice::from(1),
        }
    }

    /// Check if this point is the point at infinity.
    #[inline]
    pub fn is_identity(&self) -> Choice {
        self.infinity
    }

    /// Check if a point is on the curve: y^2 = x^3 + 7.
    pub fn is_on_curve(&self) -> Choice {
        let y2 = self.y.square();
        let x3 = self.x.square() * self.x;
        let rhs = x3 + BaseField::CURVE_B;

        y2.ct_eq(&rhs) | self.infinity
    }

    /// Build a point from coordinates, checking the curve equation.
    pub fn from_coordinates(x: BaseField, y: BaseField) -> CtOption<Self> {
        let point = Affine::new(x, y);
        CtOption::new(point, point.is_on_curve())
    }

    /// Recover the point with the given x-coordinate and y parity.
    ///
    /// Fails when x^3 + 7 is not a square, i.e. no point has this x.
    pub fn decompress(x: &BaseField, y_is_odd: Choice) -> CtOption<Self> {
        let alpha = x.square() * *x + BaseField::CURVE_B;
        alpha.sqrt().map(|beta| {
            let beta = beta.normalize();
            let y = BaseField::conditional_select(&beta, &-beta, beta.is_odd() ^ y_is_odd);
            Affine::new(x.normalize(), y.normalize())
        })
    }

    /// The standard secp256k1 generator.
    pub fn generator() -> Self {
        let x = BaseField::from_u64_limbs([
            0x59f2815b16f81798,
            0x029bfcdb2dce28d9,
            0x55a06295ce870b07,
            0x79be667ef9dcbbac,
        ]);
        let y = BaseField::from_u64_limbs([
            0x9c47d08ffb10d4b8,
            0xfd17b448a6855419,
            0x5da4fbfc0e1108a8,
            0x483ada7726a3c465,
        ]);

        // Both coordinates are below p, so the options are always some.
        Affine::new(x.unwrap_or(BaseField::ZERO), y.unwrap_or(BaseField::ZERO))
    }

    /// Point doubling: 2*P.
    pub fn double(&self) -> Self {
        Jacobian::from_affine(self).double().to_affine()
    }

    /// Negate a point: reflect y to p - y.
    pub fn negate(&self) -> Self {
        Affine {
            x: self.x,
            y: (-self.y).normalize(),
            infinity: self.infinity,
        }
    }

    /// Convert to Jacobian coordinates.
    #[inline]
    pub fn to_jacobian(&self) -> Jacobian {
        Jacobian::from_affine(self)
    }
}

impl Group for Affine {
    type Scalar = ScalarField;

    #[inline]
    fn identity() -> Self {
        Self::identity()
    }

    #[inline]
    fn is_identity(&self) -> Choice {
        self.infinity
    }

    #[inline]
    fn generator() -> Self {
        Affine::generator()
    }

    #[inline]
    fn double(&self) -> Self {
        Self::double(self)
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::negate(self)
    }

    fn scalar_mul(&self, scalar: &ScalarField) -> Self {
        <Jacobian as Group>::scalar_mul(&self.to_jacobian(), scalar).to_affine()
    }

    fn scalar_mul_vartime(&self, scalar: &ScalarField) -> Self {
        <Jacobian as Group>::scalar_mul_vartime(&self.to_jacobian(), scalar).to_affine()
    }
}

impl ConditionallySelectable for Affine {
    fn conditional_select(a: &Affine, b: &Affine, choice: Choice) -> Affine {
        Affine {
            x: BaseField::conditional_select(&a.x, &b.x, choice),
            y: BaseField::conditional_select(&a.y, &b.y, choice),
            infinity: Choice::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for Affine {
    fn ct_eq(&self, other: &Affine) -> Choice {
        let both_infinite = self.infinity & other.infinity;
        let both_finite = !self.infinity & !other.infinity;
        both_infinite | (both_finite & self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y))
    }
}

impl PartialEq for Affine {
    fn eq(&self, other: &Affine) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Affine {}

impl Default for Affine {
    fn default() -> Self {
        Self::identity()
    }
}

// Affine addition goes through Jacobian coordinates so that the
// doubling and inverse cases share the complete formulas.
impl Add for Affine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.to_jacobian().add_affine(&other).to_affine()
    }
}

impl AddAssign for Affine {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[allow(clippy::suspicious_arithmetic_impl)]
impl Sub for Affine {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self + other.negate()
    }
}

impl SubAssign for Affine {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Affine {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

// Scalar multiplication
impl Mul<ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, &scalar)
    }
}

impl Mul<&ScalarField> for Affine {
    type Output = Self;

    fn mul(self, scalar: &ScalarField) -> Self {
        <Self as Group>::scalar_mul(&self, scalar)
    }
}

impl Mul<Affine> for ScalarField {
    type Output = Affine;

    fn mul(self, point: Affine) -> Affine {
        <Affine as Group>::scalar_mul(&point, &self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Group;

    #[test]
    fn test_infinity() {
        let inf = Affine::identity();
        assert!(bool::from(inf.is_identity()));
        assert!(bool::from(inf.is_on_curve()));
    }

    #[test]
    fn test_generator_on_curve() {
        let g = Affine::generator();
        assert!(bool::from(g.is_on_curve()), "Generator point is not on the curve");
        assert!(!bool::from(g.is_identity()));
    }

    #[test]
    fn test_from_coordinates_rejects_off_curve() {
        let g = Affine::generator();
        assert!(bool::from(Affine::from_coordinates(g.x, g.y).is_some()));
        assert!(bool::from(
            Affine::from_coordinates(g.x, g.y + BaseField::ONE).is_none()
        ));
    }

    #[test]
    fn test_decompress_generator() {
        let g = Affine::generator();
        let even = Affine::decompress(&g.x, Choice::from(0)).unwrap();
        let odd = Affine::decompress(&g.x, Choice::from(1)).unwrap();

        // G.y is even
        assert_eq!(even, g);
        assert_eq!(odd, g.negate());
    }

    #[test]
    fn test_decompress_rejects_non_residue() {
        // x = 5 gives 5^3 + 7 = 132, which is not a square mod p.
        let x = BaseField::from_u64(5);
        assert!(bool::from(Affine::decompress(&x, Choice::from(0)).is_none()));
    }

    #[test]
    fn test_point_addition_with_infinity() {
        let g = Affine::generator();
        let inf = Affine::identity();

        assert_eq!(g + inf, g);
        assert_eq!(inf + g, g);
        assert_eq!(inf + inf, inf);
    }

    #[test]
    fn test_point_doubling() {
        let g = Affine::generator();
        let g2 = g.double();

        assert!(bool::from(g2.is_on_curve()), "Doubled point is not on the curve");
        assert_eq!(g + g, g2);
    }

    #[test]
    fn test_point_negation() {
        let g = Affine::generator();
        let neg_g = g.negate();

        assert!(bool::from(neg_g.is_on_curve()));
        assert_eq!(g + neg_g, Affine::identity());
        assert_eq!(neg_g.negate(), g);
    }

    #[test]
    fn test_scalar_multiplication() {
        let g = Affine::generator();
        let scalar = ScalarField::from_canonical_u64(5);
        let result = g.scalar_mul(&scalar);

        // 5*G = G + G + G + G + G
        let expected = g + g + g + g + g;
        assert_eq!(result, expected);
        assert!(bool::from(result.is_on_curve()));
    }

    #[test]
    fn test_scalar_mul_zero_and_one() {
        let g = Affine::generator();

        assert_eq!(g.scalar_mul(&ScalarField::ZERO), Affine::identity());
        assert_eq!(g.scalar_mul(&ScalarField::ONE), g);
    }

    #[test]
    fn test_group_properties() {
        let g = Affine::generator();

        // Test that doubling is the same as adding to itself
        assert_eq!(g.double(), g + g);

        // Test that triple is correct
        let triple1 = g + g + g;
        let triple2 = g.mul_u64(3);
        assert_eq!(triple1, triple2);

        // Test inverse property
        let h = g.mul_u64(5);
        let neg_h = -h;
        assert_eq!(h + neg_h, Affine::identity());
    }
}
