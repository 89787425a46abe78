use core::slice::Iter;

use num_traits::ToPrimitive;
use tinyvec::TinyVec;

use super::*;
use crate::error::{Error, Result};
use crate::point::lerp;

/// Number of samples drawn over the knot domain when plotting a B-spline.
pub const DEFAULT_CURVE_SAMPLES: usize = 100;

/// General Implementation of a BSpline with choosable degree, control points and knots.
/// Generic parameters:
/// P: Generic points 'P' as defined by the Point trait
/// The number of control points C, knots K and the degree D relate to each other
/// in the following manner
///     K = C + O where O = D + 1
/// K = C + D + 1
/// D = K - C - 1
/// C = K - D - 1
#[derive(Debug, Clone, PartialEq)]
pub struct BSpline<P>
where
    P: Point,
{
    /// Degree of the piecewise polynomials, degree = order - 1
    degree: usize,

    /// Knot vector
    knots: KnotVector<P::Scalar>,

    /// Control points
    control_points: Vec<P>,
}

impl<P> Spline<P> for BSpline<P>
where
    P: Point,
{
    fn domain(&self) -> (P::Scalar, P::Scalar) {
        self.knot_domain()
    }

    fn eval(&self, t: P::Scalar) -> Result<P> {
        BSpline::eval(self, t)
    }
}

impl<P> BSpline<P>
where
    P: Point,
{
    /// Create a new B-spline curve of `degree` over `knots` with the given control points.
    ///
    /// A B-Spline curve requires at least two control points and at least one
    /// more control point than its degree, and the number of knots must equal
    /// `control_points.len() + degree + 1`. The knot domain
    /// `[knots[degree], knots[len - degree - 1]]` must not be empty.
    pub fn new(
        control_points: Vec<P>,
        degree: usize,
        knots: KnotVector<P::Scalar>,
    ) -> Result<BSpline<P>> {
        let count = control_points.len();
        if count < 2 {
            return Err(Error::InsufficientPoints {
                required: 2,
                actual: count,
            });
        }
        // a degree this large cannot have a matching knot vector
        let Some(expected) = count.checked_add(degree).and_then(|k| k.checked_add(1)) else {
            return Err(Error::InsufficientPoints {
                required: degree.saturating_add(1),
                actual: count,
            });
        };
        if knots.len() != expected {
            return Err(Error::KnotCountMismatch {
                expected,
                actual: knots.len(),
            });
        }
        if count <= degree {
            return Err(Error::InsufficientPoints {
                required: degree.saturating_add(1),
                actual: count,
            });
        }
        if let Some((i, _)) = control_points
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite())
        {
            return Err(Error::InvalidInput(format!(
                "control point {i} has a non-finite coordinate"
            )));
        }

        let (kmin, kmax) = knots.domain(degree);
        if kmin >= kmax {
            return Err(Error::Numerical(format!(
                "knot domain [knots[{}], knots[{}]] is empty",
                degree,
                knots.len() - degree - 1
            )));
        }

        Ok(BSpline {
            degree,
            knots,
            control_points,
        })
    }

    /// Compute a point on the curve at `t` using iterative de Boor algorithm.
    /// The parameter must be in the inclusive range of values returned
    /// by `knot_domain`, other values are rejected with `Error::OutOfDomain`.
    pub fn eval(&self, t: P::Scalar) -> Result<P> {
        let (kmin, kmax) = self.knot_domain();
        if !(t >= kmin && t <= kmax) {
            tracing::trace!(t = ?t, min = ?kmin, max = ?kmax, "parameter outside knot domain");
            return Err(Error::OutOfDomain {
                t: t.to_f64().unwrap_or(f64::NAN),
                min: kmin.to_f64().unwrap_or(f64::NAN),
                max: kmax.to_f64().unwrap_or(f64::NAN),
            });
        }

        let span = self
            .knots
            .span(self.degree, self.control_points.len(), t)
            .ok_or_else(|| Error::Numerical("knot vector has no span of non-zero width".into()))?;
        Ok(self.de_boor_iterative(t, span))
    }

    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns an iterator over the control points.
    pub fn control_points(&self) -> Iter<'_, P> {
        self.control_points.iter()
    }

    /// Returns an iterator over the knots.
    pub fn knots(&self) -> Iter<'_, P::Scalar> {
        self.knots.iter()
    }

    pub fn knot_vector(&self) -> &KnotVector<P::Scalar> {
        &self.knots
    }

    /// Get the min and max knot domain values for finding the `t` range to compute
    /// the curve over. The curve is only defined over the inclusive range `[min, max]`.
    pub fn knot_domain(&self) -> (P::Scalar, P::Scalar) {
        self.knots.domain(self.degree)
    }

    /// Points on the curve at each distinct knot value inside the domain
    /// (the knots without the `degree` clamped values at either end), used to
    /// mark segment boundaries.
    pub fn knot_markers(&self) -> Result<Vec<P>> {
        self.knots
            .interior(self.degree)
            .into_iter()
            .map(|u| self.eval(u))
            .collect()
    }

    /// Iteratively compute de Boor's B-spline algorithm, this computes the recursive
    /// de Boor algorithm tree from the bottom up. At each level we use the results
    /// from the previous one to compute this level and store the results in the
    /// array indices we no longer need to compute the current level (the left one
    /// used computing node j).
    fn de_boor_iterative(&self, t: P::Scalar, span: usize) -> P {
        let d = self.degree;
        let k = self.knots.as_slice();
        let mut tmp: TinyVec<[P; 8]> =
            self.control_points[span - d..=span].iter().copied().collect();

        for r in 1..=d {
            for j in (r..=d).rev() {
                let left = k[j + span - d];
                let alpha = (t - left) / (k[j + 1 + span - r] - left);
                tmp[j] = lerp(tmp[j - 1], tmp[j], alpha);
            }
        }
        tmp[d]
    }
}

/// Sample the B-spline given by `points`, `degree` and `knots` at
/// `sample_count` evenly spaced parameters over its knot domain, both ends
/// included.
///
/// ```rust
/// use curvelab::{evaluate_curve, KnotVector, Point2};
///
/// let points = vec![Point2::new(0.0, 0.0), Point2::new(4.0, 2.0)];
/// let knots = KnotVector::clamped(points.len(), 1).unwrap();
/// let curve = evaluate_curve(&points, 1, &knots, 5).unwrap();
/// assert_eq!(curve[2], Point2::new(2.0, 1.0));
/// ```
pub fn evaluate_curve<P: Point>(
    points: &[P],
    degree: usize,
    knots: &KnotVector<P::Scalar>,
    sample_count: usize,
) -> Result<Vec<P>> {
    tracing::debug!(
        points = points.len(),
        degree,
        knots = knots.len(),
        sample_count,
        "sampling b-spline curve"
    );
    let spline = BSpline::new(points.to_vec(), degree, knots.clone())?;
    spline.sample(sample_count)
}
