use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

pub trait ScalarBits {
    fn to_u64_limbs(&self) -> [u64; 4];
}

pub trait Group:
    Sized
    + Copy
    + ConditionallySelectable
    + Add<Output = Self>
    + AddAssign
    + Sub<Output = Self>
    + SubAssign
    + Neg<Output = Self>
{
    type Scalar: ScalarBits;

    fn identity() -> Self;
    fn is_identity(&self) -> Choice;
    fn generator() -> Self;
    fn double(&self) -> Self;
    fn negate(&self) -> Self;

    /// Constant-time multiplication by a secret scalar.
    ///
    /// Fixed 4-bit windows: every window costs four doublings, a scan over
    /// the whole 16-entry table and one addition, whatever the digit.
    fn scalar_mul(&self, scalar: &Self::Scalar) -> Self {
        let mut table = [Self::identity(); 16];
        table[1] = *self;
        for i in 2..16 {
            table[i] = table[i - 1] + *self;
        }

        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                result = result.double();
                result = result.double();
                result = result.double();
                result = result.double();

                let window = (limb >> shift) & 0xF;
                let mut addend = Self::identity();
                for (j, entry) in table.iter().enumerate() {
                    addend.conditional_assign(entry, (j as u64).ct_eq(&window));
                }
                result = result + addend;
            }
        }

        result
    }

    /// Windowed multiplication for public scalars only: skips zero windows
    /// and indexes the table directly.
    fn scalar_mul_vartime(&self, scalar: &Self::Scalar) -> Self {
        if bool::from(self.is_identity()) {
            return Self::identity();
        }

        let mut table = [Self::identity(); 16];
        table[1] = *self;

        for i in 2..16 {
            table[i] = if i % 2 == 0 {
                table[i / 2].double()
            } else {
                table[i - 1] + table[1]
            };
        }

        let scalar_limbs = scalar.to_u64_limbs();
        let mut result = Self::identity();

        for &limb in scalar_limbs.iter().rev() {
            for shift in (0..64).step_by(4).rev() {
                result = result.double();
                result = result.double();
                result = result.double();
                result = result.double();

                let window = ((limb >> shift) & 0xF) as usize;
                if window != 0 {
                    result = result + table[window];
                }
            }
        }

        result
    }

    /// Multiplication by a small public integer.
    fn mul_u64(&self, n: u64) -> Self {
        if n == 0 {
            return Self::identity();
        }
        if n == 1 {
            return *self;
        }

        let mut result = Self::identity();
        let mut temp = *self;
        let mut bits = n;

        while bits > 0 {
            if bits & 1 == 1 {
                result = result + temp;
            }
            temp = temp.double();
            bits >>= 1;
        }

        result
    }

    /// Sum of an ordered list of points.
    fn sum_points(points: &[Self]) -> Self {
        points
            .iter()
            .fold(Self::identity(), |acc, point| acc + *point)
    }
}
