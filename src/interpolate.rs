//! Interpolating B-splines: curves that pass through every given point.
//!
//! Data points are assigned parameters over `[0, 1]`, the knot vector is
//! derived from those parameters by averaging, and the control points solve
//! the collocation system `N(u_k) * P = Q_k`.

use nalgebra::{DMatrix, DVector};
use num_traits::{Float, One, ToPrimitive, Zero};

use crate::bspline::BSpline;
use crate::cast;
use crate::error::{Error, Result};
use crate::knots::KnotVector;
use crate::point::Point;
use crate::spline::Spline;

/// Number of samples drawn over `[0, 1]` for an interpolating curve.
pub const DEFAULT_INTERPOLATION_SAMPLES: usize = 50;

/// How data points are assigned curve parameters.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Parametrization {
    /// Evenly spaced parameters, ignoring point distances.
    Uniform,
    /// Parameters proportional to the accumulated chord length.
    #[default]
    ChordLength,
    /// Parameters proportional to the accumulated square root of chord lengths.
    Centripetal,
}

/// An interpolating B-spline together with the parameter of every data point.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatedCurve<P: Point> {
    spline: BSpline<P>,
    parameters: Vec<P::Scalar>,
}

impl<P: Point> InterpolatedCurve<P> {
    pub fn spline(&self) -> &BSpline<P> {
        &self.spline
    }

    /// Parameter at which the curve passes through each data point.
    pub fn parameters(&self) -> &[P::Scalar] {
        &self.parameters
    }

    pub fn into_spline(self) -> BSpline<P> {
        self.spline
    }
}

/// Fit a B-spline of `degree` through all of `points`.
///
/// ```rust
/// use curvelab::{interpolate, Parametrization, Point2};
///
/// let points = vec![
///     Point2::new(0.0_f64, 0.0),
///     Point2::new(1.0, 2.0),
///     Point2::new(3.0, 3.0),
///     Point2::new(4.0, 0.0),
/// ];
/// let fit = interpolate(&points, 3, Parametrization::ChordLength).unwrap();
/// for (u, p) in fit.parameters().iter().zip(&points) {
///     let q = fit.spline().eval(*u).unwrap();
///     assert!((q.x() - p.x()).abs() < 1e-9 && (q.y() - p.y()).abs() < 1e-9);
/// }
/// ```
pub fn interpolate<P: Point>(
    points: &[P],
    degree: usize,
    parametrization: Parametrization,
) -> Result<InterpolatedCurve<P>> {
    let n = points.len();
    if n < 2 {
        return Err(Error::InsufficientPoints {
            required: 2,
            actual: n,
        });
    }
    if n <= degree {
        return Err(Error::InsufficientPoints {
            required: degree.saturating_add(1),
            actual: n,
        });
    }
    if let Some(i) = points.iter().position(|p| !p.is_finite()) {
        return Err(Error::InvalidInput(format!(
            "point {i} has a non-finite coordinate"
        )));
    }

    let parameters = data_parameters(points, parametrization);
    if let Some(i) = parameters.windows(2).position(|w| w[1] <= w[0]) {
        return Err(Error::Numerical(format!(
            "points {} and {} share the same parameter, the interpolation system is singular",
            i,
            i + 1
        )));
    }

    let knots = averaged_knots(&parameters, degree)?;
    let control_points = solve_control_points(points, &parameters, &knots, degree)?;

    tracing::debug!(points = n, degree, ?parametrization, "fitted interpolating b-spline");
    let spline = BSpline::new(control_points, degree, knots)?;
    Ok(InterpolatedCurve { spline, parameters })
}

/// Fit an interpolating B-spline with chord length parameters and sample it
/// at `sample_count` evenly spaced parameters over `[0, 1]`.
pub fn evaluate_interpolating<P: Point>(
    points: &[P],
    degree: usize,
    sample_count: usize,
) -> Result<Vec<P>> {
    interpolate(points, degree, Parametrization::ChordLength)?
        .spline()
        .sample(sample_count)
}

/// Parameters in `[0, 1]` for each data point, first 0 and last 1.
fn data_parameters<P: Point>(points: &[P], parametrization: Parametrization) -> Vec<P::Scalar> {
    let n = points.len();
    let uniform = || {
        let last = cast::<P::Scalar>((n - 1) as f64);
        (0..n)
            .map(|i| cast::<P::Scalar>(i as f64) / last)
            .collect::<Vec<_>>()
    };

    let distance = |a: P, b: P| -> P::Scalar {
        let chord = (b - a).squared_norm().sqrt();
        match parametrization {
            Parametrization::Centripetal => chord.sqrt(),
            _ => chord,
        }
    };

    if parametrization == Parametrization::Uniform {
        return uniform();
    }

    let steps: Vec<P::Scalar> = points.windows(2).map(|w| distance(w[0], w[1])).collect();
    let total = steps.iter().fold(P::Scalar::zero(), |acc, &d| acc + d);
    if total <= P::Scalar::zero() {
        tracing::warn!(points = n, "all points coincide, falling back to uniform parameters");
        return uniform();
    }

    let mut params = Vec::with_capacity(n);
    let mut acc = P::Scalar::zero();
    params.push(acc);
    for d in &steps[..n - 2] {
        acc = acc + *d;
        params.push(acc / total);
    }
    params.push(P::Scalar::one());
    params
}

/// Knots for interpolation at `params`: `degree + 1` zeros, interior knots
/// averaging `degree` consecutive parameters, `degree + 1` ones.
/// Degree zero places a knot halfway between neighbouring parameters.
fn averaged_knots<T: Float + Default>(params: &[T], degree: usize) -> Result<KnotVector<T>> {
    let n = params.len();
    let mut knots = Vec::with_capacity(n + degree + 1);

    if degree == 0 {
        let half = cast::<T>(0.5);
        knots.push(T::zero());
        knots.extend(params.windows(2).map(|w| (w[0] + w[1]) * half));
        knots.push(T::one());
        return KnotVector::new(knots);
    }

    let p = cast::<T>(degree as f64);
    knots.extend(core::iter::repeat(T::zero()).take(degree + 1));
    for j in 1..n - degree {
        let sum = params[j..j + degree].iter().fold(T::zero(), |acc, &u| acc + u);
        knots.push(sum / p);
    }
    knots.extend(core::iter::repeat(T::one()).take(degree + 1));
    KnotVector::new(knots)
}

/// Solve the collocation system for the control points, one right hand side per axis.
fn solve_control_points<P: Point>(
    points: &[P],
    params: &[P::Scalar],
    knots: &KnotVector<P::Scalar>,
    degree: usize,
) -> Result<Vec<P>> {
    let n = points.len();
    let mut matrix = DMatrix::<f64>::zeros(n, n);
    for (row, &u) in params.iter().enumerate() {
        let span = knots
            .span(degree, n, u)
            .ok_or_else(|| Error::Numerical("interpolation knots have an empty domain".into()))?;
        let basis = knots.basis_functions(span, degree, u);
        for (j, value) in basis.iter().enumerate() {
            matrix[(row, span - degree + j)] = value.to_f64().unwrap_or(f64::NAN);
        }
    }

    let lu = matrix.lu();
    let mut solutions: Vec<DVector<f64>> = Vec::with_capacity(P::DIM);
    for axis in 0..P::DIM {
        let rhs = DVector::from_iterator(
            n,
            points
                .iter()
                .map(|p| p.axis(axis).to_f64().unwrap_or(f64::NAN)),
        );
        let solution = lu
            .solve(&rhs)
            .ok_or_else(|| Error::Numerical("interpolation system is singular".into()))?;
        solutions.push(solution);
    }

    let control_points: Vec<P> = (0..n)
        .map(|i| P::from_axes(|axis| cast::<P::Scalar>(solutions[axis][i])))
        .collect();
    if control_points.iter().any(|p| !p.is_finite()) {
        return Err(Error::Numerical(
            "interpolation produced non-finite control points".into(),
        ));
    }
    Ok(control_points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Point2, EPSILON};

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    fn data() -> Vec<Point2<f64>> {
        vec![
            p(0., 0.),
            p(1., 2.5),
            p(3., 3.),
            p(4., 0.5),
            p(6., 1.),
            p(7., 4.),
        ]
    }

    fn assert_passes_through(fit: &InterpolatedCurve<Point2<f64>>, points: &[Point2<f64>]) {
        for (u, q) in fit.parameters().iter().zip(points) {
            let on_curve = fit.spline().eval(*u).unwrap();
            assert!((on_curve - *q).squared_norm() < EPSILON, "{on_curve:?} != {q:?}");
        }
    }

    #[test]
    fn passes_through_every_point() {
        let points = data();
        for degree in 0..=5 {
            for parametrization in [
                Parametrization::Uniform,
                Parametrization::ChordLength,
                Parametrization::Centripetal,
            ] {
                let fit = interpolate(&points, degree, parametrization).unwrap();
                assert_eq!(fit.spline().degree(), degree);
                assert_eq!(fit.spline().knot_vector().len(), points.len() + degree + 1);
                assert_passes_through(&fit, &points);
            }
        }
    }

    #[test]
    fn chord_length_parameters() {
        let points = vec![p(0., 0.), p(3., 4.), p(3., 9.), p(3., 19.)];
        let fit = interpolate(&points, 2, Parametrization::ChordLength).unwrap();
        assert_eq!(fit.parameters(), &[0.0, 0.25, 0.5, 1.0]);
        // interior knot (0.25 + 0.5) / 2
        assert_eq!(
            fit.spline().knot_vector().as_slice(),
            &[0.0, 0.0, 0.0, 0.375, 1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn degree_one_is_the_polyline() {
        let points = vec![p(0., 0.), p(2., 0.), p(2., 2.)];
        let samples = evaluate_interpolating(&points, 1, 5).unwrap();
        assert_eq!(samples.len(), 5);
        assert!((samples[0] - points[0]).squared_norm() < EPSILON);
        assert!((samples[1] - p(1., 0.)).squared_norm() < EPSILON);
        assert!((samples[2] - points[1]).squared_norm() < EPSILON);
        assert!((samples[3] - p(2., 1.)).squared_norm() < EPSILON);
        assert!((samples[4] - points[2]).squared_norm() < EPSILON);
    }

    #[test]
    fn samples_span_the_unit_domain() {
        let points = data();
        let samples = evaluate_interpolating(&points, 3, DEFAULT_INTERPOLATION_SAMPLES).unwrap();
        assert_eq!(samples.len(), DEFAULT_INTERPOLATION_SAMPLES);
        assert!((samples[0] - points[0]).squared_norm() < EPSILON);
        assert!((samples[DEFAULT_INTERPOLATION_SAMPLES - 1] - points[5]).squared_norm() < EPSILON);
    }

    #[test]
    fn not_enough_points() {
        assert_eq!(
            evaluate_interpolating(&[p(1., 1.)], 1, 10),
            Err(Error::InsufficientPoints {
                required: 2,
                actual: 1
            })
        );
        assert_eq!(
            evaluate_interpolating(&[p(1., 1.), p(2., 2.), p(3., 1.)], 3, 10),
            Err(Error::InsufficientPoints {
                required: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn huge_degree_is_an_error() {
        let points = data();
        assert_eq!(
            interpolate(&points, usize::MAX, Parametrization::Uniform).map(|_| ()),
            Err(Error::InsufficientPoints {
                required: usize::MAX,
                actual: points.len()
            })
        );
    }

    #[test]
    fn fitted_spline_can_be_taken_out() {
        let points = data();
        let fit = interpolate(&points, 3, Parametrization::Centripetal).unwrap();
        let last = *fit.parameters().last().unwrap();
        let spline = fit.into_spline();
        assert_eq!(spline.knot_domain(), (0.0, 1.0));
        assert!((spline.eval(last).unwrap() - points[5]).squared_norm() < EPSILON);
    }

    #[test]
    fn repeated_point_is_singular() {
        let points = vec![p(0., 0.), p(1., 1.), p(1., 1.), p(2., 0.)];
        assert!(matches!(
            interpolate(&points, 2, Parametrization::ChordLength),
            Err(Error::Numerical(_))
        ));
        // uniform parameters never collide
        let fit = interpolate(&points, 2, Parametrization::Uniform).unwrap();
        assert_passes_through(&fit, &points);
    }

    #[test]
    fn coincident_points_fall_back_to_uniform() {
        let points = vec![p(2., 2.); 3];
        let fit = interpolate(&points, 1, Parametrization::ChordLength).unwrap();
        assert_eq!(fit.parameters(), &[0.0, 0.5, 1.0]);
        assert_passes_through(&fit, &points);
    }

    #[test]
    fn non_finite_input() {
        let points = vec![p(0., 0.), p(f64::NAN, 1.)];
        assert!(matches!(
            interpolate(&points, 1, Parametrization::default()),
            Err(Error::InvalidInput(_))
        ));
    }
}
