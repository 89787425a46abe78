use core::slice;

use num_traits::{One, Zero};
use tinyvec::TinyVec;

use crate::error::{Error, Result};
use crate::linspace;
use crate::point::{lerp, Point};
use crate::spline::Spline;

/// Number of samples `Bezier::sample_default` draws over `[0, 1]`.
pub const DEFAULT_BEZIER_SAMPLES: usize = 101;

/// Result of one de Casteljau evaluation: the point on the curve and every
/// intermediate interpolation level that led to it.
///
/// For `n` control points there are `n - 1` levels of lengths `n - 1, n - 2, ..., 1`,
/// the last level holding only the curve point.
#[derive(Debug, Clone, PartialEq)]
pub struct Construction<P> {
    point: P,
    levels: Vec<Vec<P>>,
}

impl<P: Point> Construction<P> {
    /// The point on the curve.
    pub fn point(&self) -> P {
        self.point
    }

    /// Intermediate levels, from the first interpolation round to the last.
    pub fn levels(&self) -> &[Vec<P>] {
        &self.levels
    }

    pub fn into_levels(self) -> Vec<Vec<P>> {
        self.levels
    }
}

/// Evaluate the Bezier curve defined by `points` at `t` with De Casteljau's
/// algorithm, recording every interpolation level.
///
/// `t` is not clamped: values outside `[0, 1]` extrapolate the curve.
///
/// ```rust
/// use curvelab::{de_casteljau, Point2};
///
/// let points = [Point2::new(0.0, 0.0), Point2::new(100.0, 0.0), Point2::new(100.0, 100.0)];
/// let construction = de_casteljau(&points, 0.5).unwrap();
/// assert_eq!(construction.point(), Point2::new(75.0, 25.0));
/// assert_eq!(construction.levels().len(), 2);
/// ```
pub fn de_casteljau<P: Point>(points: &[P], t: P::Scalar) -> Result<Construction<P>> {
    if points.is_empty() {
        return Err(Error::InsufficientPoints {
            required: 1,
            actual: 0,
        });
    }
    Ok(construct(points, t))
}

/// De Casteljau over a non-empty polygon.
fn construct<P: Point>(points: &[P], t: P::Scalar) -> Construction<P> {
    let mut levels: Vec<Vec<P>> = Vec::with_capacity(points.len() - 1);
    let mut current: Vec<P> = points.to_vec();
    while current.len() > 1 {
        current = current.windows(2).map(|w| lerp(w[0], w[1], t)).collect();
        levels.push(current.clone());
    }
    Construction {
        point: current[0],
        levels,
    }
}

/// General implementation of a Bezier curve of arbitrary degree (= number of control points - 1).
/// The curve is solely defined by its 'control_points'.
/// Points on the curve can be evaluated with an interpolation parameter 't' in interval [0,1]
/// using the eval() and construction() methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Bezier<P>
where
    P: Point,
{
    /// Control points which define the curve and hence its degree
    control_points: Vec<P>,
}

impl<P> Spline<P> for Bezier<P>
where
    P: Point,
{
    fn domain(&self) -> (P::Scalar, P::Scalar) {
        (P::Scalar::zero(), P::Scalar::one())
    }

    fn eval(&self, t: P::Scalar) -> Result<P> {
        Ok(Bezier::eval(self, t))
    }
}

impl<'a, P: Point> IntoIterator for &'a Bezier<P> {
    type Item = &'a P;
    type IntoIter = slice::Iter<'a, P>;

    fn into_iter(self) -> slice::Iter<'a, P> {
        self.control_points.iter()
    }
}

impl<P> Bezier<P>
where
    P: Point,
{
    /// Create a new Bezier curve from its control points. The degree is
    /// `control_points.len() - 1`, so at least one point is required.
    pub fn new(control_points: Vec<P>) -> Result<Bezier<P>> {
        if control_points.is_empty() {
            return Err(Error::InsufficientPoints {
                required: 1,
                actual: 0,
            });
        }
        Ok(Bezier { control_points })
    }

    pub fn control_points(&self) -> &[P] {
        &self.control_points
    }

    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// Evaluate a point on the curve at point 't' which should be in the interval [0,1]
    /// This is implemented using De Casteljau's algorithm over a small inline working buffer.
    pub fn eval(&self, t: P::Scalar) -> P {
        // start with a copy of the control points and successively use it for evaluation
        let mut p: TinyVec<[P; 16]> = self.control_points.iter().copied().collect();
        let n = p.len();
        for i in 1..n {
            for j in 0..n - i {
                p[j] = lerp(p[j], p[j + 1], t);
            }
        }
        p[0]
    }

    /// Evaluate at `t` and keep every intermediate level for drawing the construction.
    pub fn construction(&self, t: P::Scalar) -> Construction<P> {
        construct(&self.control_points, t)
    }

    /// Sample the curve at `count` evenly spaced parameters over `[0, 1]`.
    /// Every sample is an independent evaluation.
    pub fn sample(&self, count: usize) -> Vec<P> {
        linspace(P::Scalar::zero(), P::Scalar::one(), count)
            .map(|t| self.eval(t))
            .collect()
    }

    /// Sample the curve at [`DEFAULT_BEZIER_SAMPLES`] parameters.
    pub fn sample_default(&self) -> Vec<P> {
        self.sample(DEFAULT_BEZIER_SAMPLES)
    }

    /// Split the curve at `t` into two curves of the same degree.
    /// The left curve is made of the first point of every construction level,
    /// the right curve of the last point of every level (in reverse).
    pub fn split(&self, t: P::Scalar) -> (Self, Self) {
        let construction = self.construction(t);
        let n = self.control_points.len();

        let mut left: Vec<P> = Vec::with_capacity(n);
        let mut right: Vec<P> = Vec::with_capacity(n);
        left.push(self.control_points[0]);
        right.push(self.control_points[n - 1]);
        for level in construction.levels() {
            left.push(level[0]);
            right.push(level[level.len() - 1]);
        }
        right.reverse();

        (
            Bezier {
                control_points: left,
            },
            Bezier {
                control_points: right,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, EPSILON};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn polygon() -> Vec<Point2<f64>> {
        vec![
            Point2::new(0f64, 1.77f64),
            Point2::new(1.1f64, -1f64),
            Point2::new(4.3f64, 3f64),
            Point2::new(3.2f64, -4f64),
            Point2::new(7.3f64, 2.7f64),
            Point2::new(8.9f64, 1.7f64),
        ]
    }

    #[test]
    fn eval_endpoints() {
        let points = polygon();
        let curve = Bezier::new(points.clone()).unwrap();

        // check if start/end points match
        let start = curve.eval(0.0);
        let err_start = start - points[0];
        assert!(err_start.squared_norm() < EPSILON);

        let end = curve.eval(1.0);
        let err_end = end - points[points.len() - 1];
        assert!(err_end.squared_norm() < EPSILON);
    }

    #[test]
    fn level_count_and_lengths() {
        let points = polygon();
        for t in [-0.5, 0.0, 0.3, 1.0, 1.7] {
            let construction = de_casteljau(&points, t).unwrap();
            let levels = construction.levels();
            assert_eq!(levels.len(), points.len() - 1);
            for (i, level) in levels.iter().enumerate() {
                assert_eq!(level.len(), points.len() - 1 - i);
            }
            assert_eq!(construction.point(), levels[levels.len() - 1][0]);
        }
    }

    #[test]
    fn random_polygons_of_every_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for n in 1..=12 {
            let points: Vec<Point2<f64>> = (0..n)
                .map(|_| Point2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
                .collect();

            let start = de_casteljau(&points, 0.0).unwrap();
            assert!((start.point() - points[0]).squared_norm() < EPSILON);
            let end = de_casteljau(&points, 1.0).unwrap();
            assert!((end.point() - points[n - 1]).squared_norm() < EPSILON);

            let t = rng.gen_range(0.0..1.0);
            let levels = de_casteljau(&points, t).unwrap().into_levels();
            assert_eq!(levels.len(), n - 1);
            for (i, level) in levels.iter().enumerate() {
                assert_eq!(level.len(), n - 1 - i);
            }
        }
    }

    #[test]
    fn iterates_over_control_points() {
        let curve = Bezier::new(polygon()).unwrap();
        let visited: Vec<Point2<f64>> = (&curve).into_iter().copied().collect();
        assert_eq!(visited, polygon());
        let mut count = 0;
        for p in &curve {
            assert!(p.is_finite());
            count += 1;
        }
        assert_eq!(count, curve.degree() + 1);
    }

    #[test]
    fn quadratic_midpoint_of_midpoints() {
        let points = [
            Point2::new(0.0, 0.0),
            Point2::new(100.0, 0.0),
            Point2::new(100.0, 100.0),
        ];
        let construction = de_casteljau(&points, 0.5).unwrap();
        assert_eq!(construction.point(), Point2::new(75.0, 25.0));
        assert_eq!(
            construction.levels(),
            &[
                vec![Point2::new(50.0, 0.0), Point2::new(100.0, 50.0)],
                vec![Point2::new(75.0, 25.0)],
            ]
        );
    }

    #[test]
    fn linear_interpolation_is_exact() {
        let a = Point2::new(1.5f64, -2.25);
        let b = Point2::new(-3.0f64, 8.0);
        for t in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0, 2.0] {
            let construction = de_casteljau(&[a, b], t).unwrap();
            assert_eq!(construction.point(), a * (1.0 - t) + b * t);
            assert_eq!(construction.levels().len(), 1);
        }
    }

    #[test]
    fn single_point_has_no_levels() {
        let p = Point2::new(3.0, 4.0);
        for t in [-1.0, 0.0, 0.5, 3.0] {
            let construction = de_casteljau(&[p], t).unwrap();
            assert_eq!(construction.point(), p);
            assert!(construction.levels().is_empty());
        }
        assert_eq!(Bezier::new(vec![p]).unwrap().eval(0.7), p);
    }

    #[test]
    fn empty_polygon_is_rejected() {
        let points: [Point2<f64>; 0] = [];
        assert_eq!(
            de_casteljau(&points, 0.5),
            Err(Error::InsufficientPoints {
                required: 1,
                actual: 0
            })
        );
        assert!(Bezier::<Point2<f64>>::new(Vec::new()).is_err());
    }

    #[test]
    fn eval_matches_construction() {
        let curve = Bezier::new(polygon()).unwrap();
        let nsteps: usize = 100;
        for t in 0..=nsteps {
            let t = t as f64 / nsteps as f64;
            let err = curve.eval(t) - curve.construction(t).point();
            assert!(err.squared_norm() < EPSILON);
            let err = curve.eval(t) - de_casteljau(curve.control_points(), t).unwrap().point();
            assert!(err.squared_norm() < EPSILON);
        }
    }

    #[test]
    fn sample_sweeps_parameter() {
        let curve = Bezier::new(polygon()).unwrap();
        let samples = curve.sample_default();
        assert_eq!(samples.len(), DEFAULT_BEZIER_SAMPLES);
        assert_eq!(samples[0], curve.eval(0.0));
        assert!((samples[50] - curve.eval(0.5)).squared_norm() < EPSILON);
        assert_eq!(samples[100], curve.eval(1.0));
    }

    #[test]
    fn split_equivalence() {
        let bezier = Bezier::new(vec![
            Point2::new(0f64, 1.77f64),
            Point2::new(2.9f64, 0f64),
            Point2::new(4.3f64, 3f64),
            Point2::new(3.2f64, -4f64),
        ])
        .unwrap();
        // split it at an arbitrary point
        let at = 0.5;
        let (left, right) = bezier.split(at);
        assert_eq!(left.degree(), 3);
        assert_eq!(right.degree(), 3);
        // compare left and right subcurves with parent curve
        let nsteps: usize = 1000;
        for t in 0..=nsteps {
            let t = t as f64 * 1f64 / (nsteps as f64);
            let err = bezier.eval(t / 2.0) - left.eval(t);
            assert!(err.squared_norm() < EPSILON);
            let err = bezier.eval((t * 0.5) + 0.5) - right.eval(t);
            assert!(err.squared_norm() < EPSILON);
        }
    }

    #[test]
    fn extrapolation_follows_the_line() {
        let line = Bezier::new(vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0)]).unwrap();
        assert_eq!(line.eval(2.0), Point2::new(2.0, 4.0));
        assert_eq!(line.eval(-1.0), Point2::new(-1.0, -2.0));
    }
}
