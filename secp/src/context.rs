//! The signing and verification context.

use curve::{BaseField, GeneratorTable, Jacobian, ScalarField};
use tracing::debug;
use zeroize::Zeroize;

use crate::nonce::Rfc6979;

/// Precomputed generator table plus blinding state.
///
/// Every operation takes a `&Context`. The table never changes after
/// construction; only [`Context::randomize`] mutates the blinding values,
/// so shared references can be used from several threads at once.
///
/// Generator multiplication computes `(k + b) * G - b * G` for a secret
/// blinding scalar `b`, and variable-base multiplication starts from a
/// randomly rescaled copy of the input point. A fresh context from
/// [`Context::new`] is unblinded until it is randomized.
///
/// # Example
///
/// ```
/// use secp::Context;
///
/// let mut ctx = Context::new();
/// ctx.randomize(Some(&[0x5a; 32]));
/// let copy = ctx.clone();
/// drop(ctx);
/// # let _ = copy;
/// ```
pub struct Context {
    table: GeneratorTable,
    // b
    blind: ScalarField,
    // -b * G, in rescaled Jacobian coordinates
    initial: Jacobian,
    // Z factor applied to variable-base inputs
    point_blind: BaseField,
}

impl Context {
    /// Build a new context. This computes the generator table.
    pub fn new() -> Self {
        let ctx = Context {
            table: GeneratorTable::new(),
            blind: ScalarField::ZERO,
            initial: Jacobian::INFINITY,
            point_blind: BaseField::ONE,
        };
        debug!("created context");
        ctx
    }

    /// Build a new context and randomize it with `seed`.
    pub fn with_seed(seed: &[u8; 32]) -> Self {
        let mut ctx = Self::new();
        ctx.randomize(Some(seed));
        ctx
    }

    /// Re-seed the blinding state.
    ///
    /// The blinding scalar and both rescaling factors are drawn from an
    /// HMAC-DRBG keyed with `seed`. Passing `None` returns the context to the
    /// unblinded state.
    pub fn randomize(&mut self, seed: Option<&[u8; 32]>) {
        let Some(seed) = seed else {
            self.blind.zeroize();
            self.initial = Jacobian::INFINITY;
            self.point_blind = BaseField::ONE;
            debug!(blinded = false, "randomized context");
            return;
        };

        let mut drbg = Rfc6979::new(&[&seed[..]]);
        let mut z = draw_nonzero_field(&mut drbg);
        let mut b = draw_nonzero_scalar(&mut drbg);
        let point_blind = draw_nonzero_field(&mut drbg);

        self.initial = (-self.table.mul(&b)).rescale(&z);
        self.blind = b;
        self.point_blind = point_blind;

        z.zeroize();
        b.zeroize();
        debug!(blinded = true, "randomized context");
    }

    /// Constant-time `k * G`.
    pub(crate) fn mul_generator(&self, k: &ScalarField) -> Jacobian {
        self.table.mul(&(*k + self.blind)) + self.initial
    }

    /// Constant-time `k * point`.
    pub(crate) fn mul_point(&self, point: &Jacobian, k: &ScalarField) -> Jacobian {
        point.rescale(&self.point_blind) * k
    }

    /// The generator table, for computations on public data.
    pub(crate) fn table(&self) -> &GeneratorTable {
        &self.table
    }
}

// Candidates are rejected only with negligible probability; the loop
// always ends for a working hash.
fn draw_nonzero_field(drbg: &mut Rfc6979) -> BaseField {
    loop {
        let mut bytes = drbg.generate();
        let candidate = BaseField::from_bytes(&bytes);
        bytes.zeroize();
        if let Some(value) = Option::<BaseField>::from(candidate) {
            if !bool::from(value.is_zero()) {
                return value;
            }
        }
    }
}

fn draw_nonzero_scalar(drbg: &mut Rfc6979) -> ScalarField {
    loop {
        let mut bytes = drbg.generate();
        let candidate = ScalarField::from_bytes(&bytes);
        bytes.zeroize();
        if let Some(value) = Option::<ScalarField>::from(candidate) {
            if !bool::from(value.is_zero()) {
                return value;
            }
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Context {
    fn clone(&self) -> Self {
        debug!("cloned context");
        Context {
            table: self.table.clone(),
            blind: self.blind,
            initial: self.initial,
            point_blind: self.point_blind,
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        self.blind.zeroize();
        self.initial.zeroize();
        self.point_blind.zeroize();
    }
}

impl core::fmt::Debug for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve::{Group, RandomField};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_blinded_generator_mul_matches_unblinded() {
        let plain = Context::new();
        let blinded = Context::with_seed(&[0x17; 32]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..4 {
            let k = ScalarField::random(&mut rng);
            let expected = Jacobian::generator().scalar_mul(&k);

            assert_eq!(plain.mul_generator(&k), expected);
            assert_eq!(blinded.mul_generator(&k), expected);
        }
    }

    #[test]
    fn test_blinded_point_mul_matches_unblinded() {
        let ctx = Context::with_seed(&[0x33; 32]);
        let p = Jacobian::generator().mul_u64(12345);
        let k = ScalarField::from_canonical_u64(678);

        assert_eq!(ctx.mul_point(&p, &k), p.scalar_mul(&k));
    }

    #[test]
    fn test_randomize_none_restores_default() {
        let mut ctx = Context::with_seed(&[0x01; 32]);
        ctx.randomize(None);

        assert_eq!(ctx.blind, ScalarField::ZERO);
        assert!(bool::from(ctx.initial.is_infinity()));
        assert_eq!(ctx.point_blind, BaseField::ONE);
    }

    #[test]
    fn test_randomize_is_deterministic_in_seed() {
        let a = Context::with_seed(&[0x44; 32]);
        let b = Context::with_seed(&[0x44; 32]);
        let c = Context::with_seed(&[0x45; 32]);

        assert_eq!(a.blind, b.blind);
        assert_ne!(a.blind, c.blind);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = Context::with_seed(&[0x99; 32]);
        let copy = original.clone();
        original.randomize(Some(&[0x98; 32]));

        let k = ScalarField::from_canonical_u64(5);
        assert_ne!(copy.blind, original.blind);
        assert_eq!(copy.mul_generator(&k), original.mul_generator(&k));
    }

    #[test]
    fn test_mul_generator_zero_is_infinity() {
        let ctx = Context::with_seed(&[0x21; 32]);
        assert!(bool::from(ctx.mul_generator(&ScalarField::ZERO).is_infinity()));
    }
}
