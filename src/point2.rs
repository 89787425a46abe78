use core::ops::{Add, Mul, Sub};

use num_traits::Float;

use super::point::Point;

/// A point (or vector) in the plane.
/// Fields are private so a constructed point cannot be altered; arithmetic
/// always produces new values.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point2<T> {
    x: T,
    y: T,
}

impl<T: Copy> Point2<T> {
    pub const fn new(x: T, y: T) -> Self {
        Point2 { x, y }
    }

    pub fn x(&self) -> T {
        self.x
    }

    pub fn y(&self) -> T {
        self.y
    }
}

impl<T: Copy> From<(T, T)> for Point2<T> {
    fn from((x, y): (T, T)) -> Self {
        Point2 { x, y }
    }
}

impl<T: Copy> From<Point2<T>> for (T, T) {
    fn from(p: Point2<T>) -> Self {
        (p.x, p.y)
    }
}

impl<T> Add for Point2<T>
where
    T: Add<Output = T>,
{
    type Output = Self;

    fn add(self, other: Point2<T>) -> Point2<T> {
        Point2 {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl<T> Sub for Point2<T>
where
    T: Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl<T> Mul<T> for Point2<T>
where
    T: Mul<Output = T> + Copy,
{
    type Output = Point2<T>;

    fn mul(self, rhs: T) -> Point2<T> {
        Point2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl<T> Point for Point2<T>
where
    T: Float + Default + core::fmt::Debug,
{
    type Scalar = T;
    const DIM: usize = 2;

    fn axis(&self, index: usize) -> T {
        match index {
            0 => self.x,
            1 => self.y,
            _ => T::nan(),
        }
    }

    fn from_axes<F>(mut f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        let x = f(0);
        let y = f(1);
        Point2 { x, y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_is_component_wise() {
        let a = Point2::new(1.0f64, 2.0);
        let b = Point2::new(4.0f64, -1.0);
        assert_eq!(a + b, Point2::new(5.0, 1.0));
        assert_eq!(b - a, Point2::new(3.0, -3.0));
        assert_eq!(a * 2.0, Point2::new(2.0, 4.0));
    }

    #[test]
    fn axes_round_trip_through_trait() {
        let p = Point2::new(3.0f32, 4.0);
        assert_eq!(p.axis(0), 3.0);
        assert_eq!(p.axis(1), 4.0);
        assert_eq!(p.squared_norm(), 25.0);
        assert_eq!(Point2::from_axes(|i| p.axis(i)), p);
    }

    #[test]
    fn non_finite_coordinates_are_detected() {
        assert!(Point2::new(0.0f64, 1.0).is_finite());
        assert!(!Point2::new(f64::NAN, 1.0).is_finite());
        assert!(!Point2::new(0.0, f64::INFINITY).is_finite());
    }
}
