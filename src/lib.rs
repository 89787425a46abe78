//! Curve evaluation core for interactive Bézier and B-spline editing.
//!
//! * [`de_casteljau`] evaluates a Bézier curve and keeps every intermediate
//!   interpolation level, so the construction can be drawn.
//! * [`KnotVector::clamped`] generates knots for a B-spline of a given degree.
//! * [`BSpline`] evaluates with de Boor's algorithm and reports the curve points at
//!   its knots.
//! * [`interpolate`] fits a B-spline that passes through every data point.
//! * [`CurveInput`] ties these together for an editor that holds optional
//!   degree and knot values.
//!
//! ```rust
//! use curvelab::{CurveInput, Point2};
//!
//! let input = CurveInput::new(
//!     vec![Point2::new(0.0, 0.0), Point2::new(1.0, 2.0), Point2::new(3.0, 0.0)],
//!     Some(2),
//!     None,
//! );
//! let plot = input.plot(100, true).unwrap();
//! assert_eq!(plot.curve.len(), 100);
//! assert_eq!(plot.curve[0], Point2::new(0.0, 0.0));
//! ```

use num_traits::{Float, NumCast};

mod bezier;
mod bspline;
mod error;
mod input;
mod interpolate;
mod knots;
mod point;
mod point2;
mod sample;
mod spline;

pub use bezier::{de_casteljau, Bezier, Construction, DEFAULT_BEZIER_SAMPLES};
pub use bspline::{evaluate_curve, BSpline, DEFAULT_CURVE_SAMPLES};
pub use error::{Error, Result};
pub use input::{CurveInput, CurvePlot};
pub use interpolate::{
    evaluate_interpolating, interpolate, InterpolatedCurve, Parametrization,
    DEFAULT_INTERPOLATION_SAMPLES,
};
pub use knots::{KnotVector, KNOT_DECIMALS};
pub use point::{lerp, Point};
pub use point2::Point2;
pub use sample::{linspace, reveal};
pub use spline::Spline;

/// Convert an `f64` constant into the scalar type, NaN if it cannot be represented.
pub(crate) fn cast<T: Float>(v: f64) -> T {
    <T as NumCast>::from(v).unwrap_or_else(T::nan)
}

#[cfg(test)]
pub(crate) const EPSILON: f64 = 1e-10;
