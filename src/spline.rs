/// spline.rs
/// Trait for common abstractions over all spline types (Bezier, B-Spline)
use super::point::Point;
use crate::error::Result;
use crate::linspace;

pub trait Spline<P: Point> {
    /// Inclusive parameter range the curve is defined on.
    fn domain(&self) -> (P::Scalar, P::Scalar);

    fn eval(&self, t: P::Scalar) -> Result<P>;

    /// Evaluate `count` evenly spaced parameters over the whole domain, in
    /// increasing parameter order.
    fn sample(&self, count: usize) -> Result<Vec<P>> {
        let (min, max) = self.domain();
        linspace(min, max, count).map(|t| self.eval(t)).collect()
    }
}
