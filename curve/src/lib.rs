//! Arithmetic for the secp256k1 elliptic curve.
//!
//! This crate provides the base field and scalar field of the curve, points
//! in affine and Jacobian coordinates, a precomputed generator table and
//! helpers for random sampling. Operations on secret data run in constant
//! time; functions meant only for public inputs carry a `_vartime` suffix.

mod affine;
mod basefield;
mod generator_table;
mod group;
mod jacobian;
mod msm;
mod random;
mod scalarfield;

pub use affine::Affine;
pub use basefield::BaseField;
pub use generator_table::GeneratorTable;
pub use group::{Group, ScalarBits};
pub use jacobian::Jacobian;
pub use msm::double_scalar_mul_basepoint;
pub use random::RandomField;
pub use scalarfield::{ScalarField, ORDER};

pub use subtle::{Choice, CtOption};
