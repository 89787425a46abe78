//! Caller-side curve description: the points, degree and knots an editor
//! collects from its user, turned into renderable point sequences.
//!
//! Degree and knots are optional here because an editor may not have them
//! yet; the operations report which required value is missing.

use rand::Rng;

use crate::bezier::Bezier;
use crate::bspline::BSpline;
use crate::error::{Error, Result};
use crate::interpolate::evaluate_interpolating;
use crate::knots::KnotVector;
use crate::point::Point;
use crate::point2::Point2;
use crate::spline::Spline;

/// Points, degree and knots as supplied by a caller.
///
/// With the `serde` feature this is a JSON object with a `points` array of
/// `{x, y}` records and optional `degree` and `knots` fields.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurveInput {
    pub points: Vec<Point2<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub degree: Option<i64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub knots: Option<Vec<f64>>,
}

/// A sampled B-spline and, if requested, the curve points at its knots.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePlot<P> {
    pub curve: Vec<P>,
    pub knot_markers: Option<Vec<P>>,
}

impl CurveInput {
    pub fn new(points: Vec<Point2<f64>>, degree: Option<i64>, knots: Option<Vec<f64>>) -> Self {
        CurveInput {
            points,
            degree,
            knots,
        }
    }

    /// Random demo data: 2 to 9 points with integer coordinates in `[0, 10)`,
    /// a degree in `[1, points)` and the matching clamped knots.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let count = rng.gen_range(2..10usize);
        let points: Vec<Point2<f64>> = (0..count)
            .map(|_| {
                Point2::new(
                    f64::from(rng.gen_range(0..10u8)),
                    f64::from(rng.gen_range(0..10u8)),
                )
            })
            .collect();
        let degree = rng.gen_range(1..count);
        let knots = KnotVector::<f64>::clamped(count, degree)?;
        Ok(CurveInput {
            points,
            degree: Some(degree as i64),
            knots: Some(knots.into_vec()),
        })
    }

    /// The points, once every coordinate is known to be finite.
    pub fn validated_points(&self) -> Result<&[Point2<f64>]> {
        if self.points.is_empty() {
            return Err(Error::InsufficientPoints {
                required: 1,
                actual: 0,
            });
        }
        if let Some(i) = self.points.iter().position(|p| !p.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "point {} has a non-numeric coordinate",
                i + 1
            )));
        }
        Ok(&self.points)
    }

    pub fn degree(&self) -> Result<usize> {
        match self.degree {
            None => Err(Error::EmptyDegree),
            Some(d) => usize::try_from(d).map_err(|_| Error::InvalidDegree(d)),
        }
    }

    /// The explicitly supplied knot vector.
    pub fn knots(&self) -> Result<KnotVector<f64>> {
        match &self.knots {
            Some(knots) if !knots.is_empty() => KnotVector::new(knots.clone()),
            _ => Err(Error::EmptyKnotVector),
        }
    }

    /// The supplied knots, or a generated clamped knot vector when none were given.
    pub fn knot_vector(&self) -> Result<KnotVector<f64>> {
        match &self.knots {
            Some(knots) if !knots.is_empty() => KnotVector::new(knots.clone()),
            _ => KnotVector::clamped(self.points.len(), self.degree()?),
        }
    }

    /// The B-spline described by this input, generating knots if necessary.
    pub fn bspline(&self) -> Result<BSpline<Point2<f64>>> {
        let points = self.bspline_points()?;
        let degree = self.degree()?;
        BSpline::new(points.to_vec(), degree, self.knot_vector()?)
    }

    /// Sample the B-spline at `sample_count` parameters over its knot domain,
    /// plus the curve points at the knots when `show_knots` is set.
    pub fn plot(&self, sample_count: usize, show_knots: bool) -> Result<CurvePlot<Point2<f64>>> {
        let spline = self.bspline()?;
        let curve = spline.sample(sample_count)?;
        let knot_markers = if show_knots {
            Some(spline.knot_markers()?)
        } else {
            None
        };
        Ok(CurvePlot {
            curve,
            knot_markers,
        })
    }

    /// Sample a B-spline of the given degree that passes through every point.
    pub fn interpolate(&self, sample_count: usize) -> Result<Vec<Point2<f64>>> {
        let points = self.bspline_points()?;
        let degree = self.degree()?;
        evaluate_interpolating(points, degree, sample_count)
    }

    /// The full sample sequence for animating the curve's construction.
    /// Unlike [`CurveInput::plot`] this needs explicitly supplied knots; frames
    /// are prefixes of the result, see [`crate::reveal`].
    pub fn animation(&self, sample_count: usize) -> Result<Vec<Point2<f64>>> {
        let points = self.bspline_points()?;
        let degree = self.degree()?;
        let knots = self.knots()?;
        BSpline::new(points.to_vec(), degree, knots)?.sample(sample_count)
    }

    /// The points as a Bezier control polygon.
    pub fn bezier(&self) -> Result<Bezier<Point2<f64>>> {
        Bezier::new(self.validated_points()?.to_vec())
    }

    fn bspline_points(&self) -> Result<&[Point2<f64>]> {
        let points = self.validated_points()?;
        if points.len() < 2 {
            return Err(Error::InsufficientPoints {
                required: 2,
                actual: points.len(),
            });
        }
        Ok(points)
    }
}
