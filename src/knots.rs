//! Knot vectors: validation, clamped generation, span search and basis functions.

use core::slice::Iter;

use num_traits::Float;
use tinyvec::TinyVec;

use crate::error::{Error, Result};
use crate::{cast, linspace};

/// Number of decimal digits generated knots are rounded to.
pub const KNOT_DECIMALS: i32 = 2;

/// A non-decreasing sequence of finite knot values.
#[derive(Debug, Clone, PartialEq)]
pub struct KnotVector<T> {
    knots: Vec<T>,
}

impl<T: Float + Default> KnotVector<T> {
    /// Wrap `knots` after checking that every value is finite and that the
    /// sequence never decreases. Length relations to a control polygon are
    /// checked by the curve that uses the knots.
    pub fn new(knots: Vec<T>) -> Result<Self> {
        if let Some(i) = knots.iter().position(|k| !k.is_finite()) {
            return Err(Error::Numerical(format!("knot {i} is not a finite number")));
        }
        if let Some(i) = knots.windows(2).position(|w| w[1] < w[0]) {
            return Err(Error::Numerical(format!(
                "knot vector must be non-decreasing, knots[{}] < knots[{}]",
                i + 1,
                i
            )));
        }
        Ok(KnotVector { knots })
    }

    /// Generate a clamped (open uniform) knot vector for `point_count` control points.
    ///
    /// `point_count - degree + 1` evenly spaced values over `[0, 1]` get
    /// `degree` zeros prepended and `degree` ones appended, and every value is
    /// rounded to [`KNOT_DECIMALS`] digits. The result has
    /// `point_count + degree + 1` knots.
    ///
    /// ```rust
    /// use curvelab::KnotVector;
    ///
    /// let knots = KnotVector::<f64>::clamped(5, 3).unwrap();
    /// assert_eq!(knots.as_slice(), &[0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 1.0]);
    /// ```
    pub fn clamped(point_count: usize, degree: usize) -> Result<Self> {
        if point_count <= degree {
            return Err(Error::InsufficientPoints {
                required: degree.saturating_add(1),
                actual: point_count,
            });
        }

        let scale = cast::<T>(10f64.powi(KNOT_DECIMALS));
        let round = |k: T| round_half_even(k * scale) / scale;

        let mut knots = Vec::with_capacity(point_count + degree + 1);
        knots.extend(core::iter::repeat(T::zero()).take(degree));
        knots.extend(linspace(T::zero(), T::one(), point_count - degree + 1).map(round));
        knots.extend(core::iter::repeat(T::one()).take(degree));

        tracing::debug!(point_count, degree, len = knots.len(), "generated clamped knot vector");
        Ok(KnotVector { knots })
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.knots
    }

    /// Returns an iterator over the knots.
    pub fn iter(&self) -> Iter<'_, T> {
        self.knots.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.knots
    }

    /// The valid parameter range `[knots[degree], knots[len - degree - 1]]`
    /// of a curve of `degree` using these knots.
    pub(crate) fn domain(&self, degree: usize) -> (T, T) {
        (self.knots[degree], self.knots[self.knots.len() - degree - 1])
    }

    /// Distinct values of `knots[degree..len - degree]`, the knots that fall
    /// inside the curve's domain.
    pub(crate) fn interior(&self, degree: usize) -> Vec<T> {
        let mut distinct: Vec<T> = self.knots[degree..self.knots.len() - degree].to_vec();
        distinct.dedup();
        distinct
    }

    /// Find the knot span `k` in `[degree, point_count - 1]` with
    /// `knots[k] <= t < knots[k + 1]`. At the right end of the domain the last
    /// span of non-zero width is returned. `None` if every span in the domain
    /// is empty.
    pub(crate) fn span(&self, degree: usize, point_count: usize, t: T) -> Option<usize> {
        let k = &self.knots;
        if t >= k[point_count] {
            return (degree..point_count).rev().find(|&i| k[i] < k[i + 1]);
        }
        // knots are sorted so the ones <= t form a prefix
        let span = degree + k[degree + 1..point_count].partition_point(|&knot| knot <= t);
        Some(span)
    }

    /// Values of the `degree + 1` basis functions that are non-zero on `span`,
    /// evaluated at `t`: `N[span - degree, degree](t) ..= N[span, degree](t)`.
    pub(crate) fn basis_functions(&self, span: usize, degree: usize, t: T) -> TinyVec<[T; 8]> {
        let k = &self.knots;
        let mut n: TinyVec<[T; 8]> = core::iter::repeat(T::zero()).take(degree + 1).collect();
        let mut left: TinyVec<[T; 8]> = n.clone();
        let mut right: TinyVec<[T; 8]> = n.clone();

        n[0] = T::one();
        for j in 1..=degree {
            left[j] = t - k[span + 1 - j];
            right[j] = k[span + j] - t;
            let mut saved = T::zero();
            for r in 0..j {
                let tmp = n[r] / (right[r + 1] + left[j - r]);
                n[r] = saved + right[r + 1] * tmp;
                saved = left[j - r] * tmp;
            }
            n[j] = saved;
        }
        n
    }
}

/// Round to the nearest integer, ties to the even neighbour (so 12.5 becomes 12).
fn round_half_even<T: Float>(v: T) -> T {
    let rounded = v.round();
    let two = cast::<T>(2.0);
    if (rounded - v).abs() == cast::<T>(0.5) && rounded % two != T::zero() {
        rounded - v.signum()
    } else {
        rounded
    }
}

impl<T> AsRef<[T]> for KnotVector<T> {
    fn as_ref(&self) -> &[T] {
        &self.knots
    }
}
