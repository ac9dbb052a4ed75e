use rand::distr::{Distribution, StandardUniform};
use rand::Rng;

use crate::{BaseField, ScalarField};

/// Helper trait for sampling random field elements.
pub trait RandomField: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomField for BaseField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

impl RandomField for ScalarField {
    #[inline]
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        StandardUniform.sample(rng)
    }
}

// Both moduli sit just below 2^256, so rejecting out-of-range draws is
// uniform and almost never loops.
impl Distribution<BaseField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BaseField {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(value) = Option::<BaseField>::from(BaseField::from_bytes(&bytes)) {
                return value;
            }
        }
    }
}

impl Distribution<ScalarField> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ScalarField {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            if let Some(value) = Option::<ScalarField>::from(ScalarField::from_bytes(&bytes)) {
                return value;
            }
        }
    }
}
