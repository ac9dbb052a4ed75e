//! Precomputed multiples of the generator for fixed-base multiplication.
//!
//! The table is an owned value, built once and only read afterwards. It
//! holds, for each of the 64 nibble positions i of a scalar, the affine
//! points j * 16^i * G for j = 1..=15. A multiplication is then 64 mixed
//! additions and no doublings.

use subtle::{ConditionallySelectable, ConstantTimeEq};

use crate::group::ScalarBits;
use crate::{Affine, Jacobian, ScalarField};

const WINDOWS: usize = 64;
const ENTRIES: usize = 15;

/// Multiples of G laid out by nibble position.
#[derive(Clone, Debug)]
pub struct GeneratorTable {
    windows: Vec<[Affine; ENTRIES]>,
}

impl GeneratorTable {
    /// Build the table. This costs about a thousand point additions and a
    /// single field inversion.
    pub fn new() -> Self {
        let mut points = Vec::with_capacity(WINDOWS * ENTRIES);
        let mut base = Jacobian::generator();

        for _ in 0..WINDOWS {
            let mut multiple = base;
            for _ in 0..ENTRIES {
                points.push(multiple);
                multiple += base;
            }
            // multiple is now 16 * base
            base = multiple;
        }

        let affine = Jacobian::batch_normalize(&points);
        let windows = affine
            .chunks_exact(ENTRIES)
            .map(|chunk| {
                let mut row = [Affine::identity(); ENTRIES];
                row.copy_from_slice(chunk);
                row
            })
            .collect();

        GeneratorTable { windows }
    }

    /// Entry j * 16^window * G, or infinity for a zero digit. Scans the
    /// whole row so the access pattern does not reveal the digit.
    #[inline]
    fn lookup(&self, window: usize, digit: u64) -> Affine {
        let mut selected = Affine::identity();
        for (j, entry) in self.windows[window].iter().enumerate() {
            selected.conditional_assign(entry, (j as u64 + 1).ct_eq(&digit));
        }
        selected
    }

    /// Constant-time scalar * G.
    pub fn mul(&self, scalar: &ScalarField) -> Jacobian {
        let limbs = scalar.to_u64_limbs();
        let mut result = Jacobian::INFINITY;

        for window in 0..WINDOWS {
            let digit = (limbs[window / 16] >> (4 * (window % 16))) & 0xF;
            result = result.add_affine(&self.lookup(window, digit));
        }

        result
    }

    /// scalar * G for public scalars: zero digits are skipped and entries
    /// are indexed directly.
    pub fn mul_vartime(&self, scalar: &ScalarField) -> Jacobian {
        let limbs = scalar.to_u64_limbs();
        let mut result = Jacobian::INFINITY;

        for window in 0..WINDOWS {
            let digit = ((limbs[window / 16] >> (4 * (window % 16))) & 0xF) as usize;
            if digit != 0 {
                result = result.add_affine(&self.windows[window][digit - 1]);
            }
        }

        result
    }
}

impl Default for GeneratorTable {
    fn default() -> Self {
        Self::new()
    }
}
