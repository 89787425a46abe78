use core::fmt::Debug;
use core::ops::{Add, Mul, Sub};

use num_traits::{Float, One, Zero};

/// Trait defined over generic points P which themselves are generic over their `Scalar`.
/// Many libraries already provide Point-types and the mathematical operations
/// that we need for working with curves, so that implementing methods requires mostly wrapping.
/// Keeping the trait as minimal as possible to make integration with other libraries easy
pub trait Point:
    Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self::Scalar, Output = Self>
    + Copy
    + PartialEq
    + Default
    + Debug
{
    type Scalar: Float + Default + Debug;

    /// Number of coordinate axes.
    const DIM: usize;

    /// Returns the component of the Point on its axis corresponding to index,
    /// e.g. [0, 1, 2] -> [x, y, z]
    fn axis(&self, index: usize) -> Self::Scalar;

    /// Builds a point from its components, `f` is called once per axis index.
    fn from_axes<F>(f: F) -> Self
    where
        F: FnMut(usize) -> Self::Scalar;

    fn squared_norm(&self) -> Self::Scalar {
        (0..Self::DIM).fold(Self::Scalar::zero(), |acc, i| {
            let c = self.axis(i);
            acc + c * c
        })
    }

    fn is_finite(&self) -> bool {
        (0..Self::DIM).all(|i| self.axis(i).is_finite())
    }
}

/// Linear interpolation `(1 - t) * a + t * b`, evaluated component-wise.
#[inline]
pub fn lerp<P: Point>(a: P, b: P, t: P::Scalar) -> P {
    a * (P::Scalar::one() - t) + b * t
}
