use crate::group::ScalarBits;
use crate::{GeneratorTable, Jacobian, ScalarField};

/// Compute a * G + b * P for public scalars.
///
/// The a * G half comes straight from the generator table. The b * P half
/// uses a 4-bit window table built for P on the fly.
pub fn double_scalar_mul_basepoint(
    table: &GeneratorTable,
    a: &ScalarField,
    b: &ScalarField,
    point: &Jacobian,
) -> Jacobian {
    let base_part = table.mul_vartime(a);

    if bool::from(point.is_infinity()) {
        return base_part;
    }

    let mut point_table = [Jacobian::INFINITY; 16];
    point_table[1] = *point;
    for i in 2..16 {
        point_table[i] = point_table[i - 1] + point_table[1];
    }

    let b_limbs = b.to_u64_limbs();
    let mut result = Jacobian::INFINITY;

    for &limb in b_limbs.iter().rev() {
        for shift in (0..64).step_by(4).rev() {
            for _ in 0..4 {
                result = result.double();
            }

            let window = ((limb >> shift) & 0xF) as usize;
            if window != 0 {
                result += point_table[window];
            }
        }
    }

    result + base_part
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Group, RandomField};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_double_scalar_mul_matches_separate_products() {
        let table = GeneratorTable::new();
        let mut rng = StdRng::seed_from_u64(7);
        let p = Jacobian::generator().scalar_mul(&ScalarField::random(&mut rng));

        for _ in 0..4 {
            let a = ScalarField::random(&mut rng);
            let b = ScalarField::random(&mut rng);
            let expected = Jacobian::generator().scalar_mul(&a) + p.scalar_mul(&b);

            assert_eq!(double_scalar_mul_basepoint(&table, &a, &b, &p), expected);
        }
    }

    #[test]
    fn test_double_scalar_mul_cancels_to_infinity() {
        let table = GeneratorTable::new();
        let g = Jacobian::generator();
        let a = ScalarField::from_canonical_u64(5);
        let b = -a;

        assert!(bool::from(
            double_scalar_mul_basepoint(&table, &a, &b, &g).is_infinity()
        ));
    }

    #[test]
    fn test_double_scalar_mul_with_infinity_point() {
        let table = GeneratorTable::new();
        let a = ScalarField::from_canonical_u64(3);
        let b = ScalarField::from_canonical_u64(11);

        assert_eq!(
            double_scalar_mul_basepoint(&table, &a, &b, &Jacobian::INFINITY),
            Jacobian::generator().mul_u64(3)
        );
    }
}
