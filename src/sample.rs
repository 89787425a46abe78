//! Parameter sampling and incremental reveal of sampled curves.

use num_traits::Float;

use crate::cast;

/// `count` evenly spaced values over `[start, end]`, both ends included.
///
/// A count of zero yields nothing, a count of one yields `start`. The last
/// value is exactly `end` so curves reach their final point.
///
/// ```rust
/// use curvelab::linspace;
///
/// let t: Vec<f64> = linspace(0.0, 1.0, 5).collect();
/// assert_eq!(t, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// ```
pub fn linspace<T: Float>(start: T, end: T, count: usize) -> impl Iterator<Item = T> {
    let last = count.saturating_sub(1);
    let step = if last == 0 {
        T::zero()
    } else {
        (end - start) / cast::<T>(last as f64)
    };
    (0..count).map(move |i| {
        if i == last && last > 0 {
            end
        } else {
            start + step * cast::<T>(i as f64)
        }
    })
}

/// Animation frames over a precomputed sample sequence: the prefixes
/// `samples[..0]`, `samples[..1]`, ..., `samples[..]`.
///
/// Animating a curve's construction needs no evaluator state, each frame
/// just shows one more sample than the previous one.
pub fn reveal<P>(samples: &[P]) -> impl Iterator<Item = &[P]> + '_ {
    (0..=samples.len()).map(move |i| &samples[..i])
}
